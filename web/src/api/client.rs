use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared_types::{
    sort_slots, Appointment, AppointmentChange, AppointmentQuery, AppointmentUpdate,
    AvailabilityKey, CancelRequest, NewAppointment, Provider, RescheduleRequest, Review,
    ReviewImage, ReviewImageUpload, ReviewImagesRequest, ReviewRequest, SalonDetail, Slot,
    VendorAction,
};

use super::envelope::decode_envelope;
use super::BookingBackend;
use crate::config::ApiConfig;
use crate::error::BookingError;
use crate::session::SessionStore;

/// HTTP implementation of [`BookingBackend`]. Cheap to clone.
#[derive(Clone)]
pub struct BookingClient {
    http: reqwest::Client,
    config: ApiConfig,
    session: Arc<dyn SessionStore>,
}

impl BookingClient {
    pub fn new(config: ApiConfig, session: Arc<dyn SessionStore>) -> Self {
        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(config.request_timeout);
        let http = builder.build().unwrap_or_else(|err| {
            tracing::warn!(%err, "falling back to a default HTTP client");
            reqwest::Client::new()
        });

        Self {
            http,
            config,
            session,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self.http.request(method, self.config.endpoint(path));
        match self.session.access_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn dispatch(&self, request: RequestBuilder) -> Result<Response, BookingError> {
        #[cfg(target_arch = "wasm32")]
        {
            let millis = self.config.request_timeout.as_millis().min(u32::MAX as u128) as u32;
            let timer = gloo::timers::future::TimeoutFuture::new(millis);
            super::with_deadline(request.send(), timer, self.config.request_timeout)
                .await?
                .map_err(BookingError::from)
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            request.send().await.map_err(BookingError::from)
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        envelope: &str,
    ) -> Result<T, BookingError> {
        let response = self.dispatch(request).await?;
        let status = response.status();
        let url = response.url().path().to_string();
        let body = response.text().await?;

        if status.is_success() {
            decode_envelope(&body, envelope)
        } else {
            tracing::debug!(status = status.as_u16(), %url, "booking backend rejected request");
            Err(BookingError::from_status(status.as_u16(), &body))
        }
    }
}

fn appointment_path(appointment_id: &str, action: &str) -> String {
    format!(
        "/appointments/{}/{}",
        urlencoding::encode(appointment_id),
        action
    )
}

#[async_trait(?Send)]
impl BookingBackend for BookingClient {
    async fn list_appointments(
        &self,
        query: &AppointmentQuery,
    ) -> Result<Vec<Appointment>, BookingError> {
        let request = self
            .request(Method::GET, "/appointments")
            .query(&query.query_pairs());
        self.execute(request, "appointments").await
    }

    async fn fetch_availability(&self, key: &AvailabilityKey) -> Result<Vec<Slot>, BookingError> {
        let request = self
            .request(Method::GET, "/appointments/availability")
            .query(&key.query_pairs());
        let slots: Vec<Slot> = self.execute(request, "slots").await?;
        tracing::debug!(date = %key.date, count = slots.len(), "availability loaded");
        Ok(sort_slots(slots))
    }

    async fn fetch_salon(&self, salon_id: &str) -> Result<SalonDetail, BookingError> {
        let path = format!("/salons/{}", urlencoding::encode(salon_id));
        self.execute(self.request(Method::GET, &path), "salon").await
    }

    async fn list_providers(&self, salon_id: &str) -> Result<Vec<Provider>, BookingError> {
        let path = format!("/salons/{}/employees", urlencoding::encode(salon_id));
        self.execute(self.request(Method::GET, &path), "employees")
            .await
    }

    async fn create_appointment(
        &self,
        payload: &NewAppointment,
    ) -> Result<AppointmentChange, BookingError> {
        let request = self.request(Method::POST, "/appointments/").json(payload);
        self.execute(request, "appointment").await
    }

    async fn update_appointment(
        &self,
        update: &AppointmentUpdate,
    ) -> Result<AppointmentChange, BookingError> {
        let request = self.request(Method::PATCH, "/appointments").json(update);
        self.execute(request, "appointment").await
    }

    async fn reschedule_appointment(
        &self,
        appointment_id: &str,
        request: &RescheduleRequest,
    ) -> Result<AppointmentChange, BookingError> {
        let path = appointment_path(appointment_id, "reschedule");
        let request = self.request(Method::PATCH, &path).json(request);
        self.execute(request, "appointment").await
    }

    async fn cancel_appointment(
        &self,
        appointment_id: &str,
        reason: &str,
    ) -> Result<AppointmentChange, BookingError> {
        let body = CancelRequest {
            reason: reason.to_string(),
        };
        let path = appointment_path(appointment_id, "cancel");
        let request = self.request(Method::PATCH, &path).json(&body);
        self.execute(request, "appointment").await
    }

    async fn vendor_confirm(
        &self,
        appointment_id: &str,
        message: &str,
    ) -> Result<AppointmentChange, BookingError> {
        let body = VendorAction::Confirm {
            message: message.to_string(),
        };
        let path = appointment_path(appointment_id, "action");
        let request = self.request(Method::PATCH, &path).json(&body);
        self.execute(request, "appointment").await
    }

    async fn vendor_deny(
        &self,
        appointment_id: &str,
        reason: &str,
    ) -> Result<AppointmentChange, BookingError> {
        let body = VendorAction::Deny {
            reason: reason.to_string(),
        };
        let path = appointment_path(appointment_id, "action");
        let request = self.request(Method::PATCH, &path).json(&body);
        self.execute(request, "appointment").await
    }

    async fn submit_review(
        &self,
        appointment_id: &str,
        request: &ReviewRequest,
    ) -> Result<Review, BookingError> {
        let path = appointment_path(appointment_id, "review");
        let request = self.request(Method::POST, &path).json(request);
        self.execute(request, "review").await
    }

    async fn upload_review_images(
        &self,
        review_id: &str,
        images: &[ReviewImageUpload],
    ) -> Result<Vec<ReviewImage>, BookingError> {
        let body = ReviewImagesRequest {
            images: images.to_vec(),
        };
        let path = format!("/reviews/{}/images", urlencoding::encode(review_id));
        let request = self.request(Method::POST, &path).json(&body);
        self.execute(request, "images").await
    }
}
