//! Talking to the booking backend.

mod client;
mod deadline;
mod envelope;

use async_trait::async_trait;
use shared_types::{
    Appointment, AppointmentChange, AppointmentQuery, AppointmentUpdate, AvailabilityKey,
    NewAppointment, Provider, RescheduleRequest, Review, ReviewImage, ReviewImageUpload,
    ReviewRequest, SalonDetail, Slot,
};

use crate::error::BookingError;

pub use client::BookingClient;
pub use deadline::with_deadline;
pub use envelope::decode_envelope;

/// Every backend call the booking flows make. `BookingClient` is the HTTP
/// implementation; tests substitute an in-memory one.
///
/// None of these retry. A failed call resolves to a `BookingError` and the
/// caller decides what to show.
#[async_trait(?Send)]
pub trait BookingBackend {
    async fn list_appointments(
        &self,
        query: &AppointmentQuery,
    ) -> Result<Vec<Appointment>, BookingError>;

    /// Slots for one (salon, provider, service, date), ordered by time.
    async fn fetch_availability(&self, key: &AvailabilityKey) -> Result<Vec<Slot>, BookingError>;

    async fn fetch_salon(&self, salon_id: &str) -> Result<SalonDetail, BookingError>;

    async fn list_providers(&self, salon_id: &str) -> Result<Vec<Provider>, BookingError>;

    async fn create_appointment(
        &self,
        payload: &NewAppointment,
    ) -> Result<AppointmentChange, BookingError>;

    async fn update_appointment(
        &self,
        update: &AppointmentUpdate,
    ) -> Result<AppointmentChange, BookingError>;

    /// A taken slot comes back as `BookingError::Conflict`.
    async fn reschedule_appointment(
        &self,
        appointment_id: &str,
        request: &RescheduleRequest,
    ) -> Result<AppointmentChange, BookingError>;

    async fn cancel_appointment(
        &self,
        appointment_id: &str,
        reason: &str,
    ) -> Result<AppointmentChange, BookingError>;

    async fn vendor_confirm(
        &self,
        appointment_id: &str,
        message: &str,
    ) -> Result<AppointmentChange, BookingError>;

    async fn vendor_deny(
        &self,
        appointment_id: &str,
        reason: &str,
    ) -> Result<AppointmentChange, BookingError>;

    /// Creates the review, or updates it in place when `request.review_id`
    /// is set.
    async fn submit_review(
        &self,
        appointment_id: &str,
        request: &ReviewRequest,
    ) -> Result<Review, BookingError>;

    async fn upload_review_images(
        &self,
        review_id: &str,
        images: &[ReviewImageUpload],
    ) -> Result<Vec<ReviewImage>, BookingError>;
}
