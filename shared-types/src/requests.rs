//! Request bodies and query strings for the booking endpoints.

use serde::{Deserialize, Serialize};

use crate::appointment::AppointmentStatus;
use crate::availability::SlotTime;
use crate::calendar::CalendarDate;
use crate::review::ReviewImageUpload;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentWindow {
    Upcoming,
    Past,
}

impl AppointmentWindow {
    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentWindow::Upcoming => "upcoming",
            AppointmentWindow::Past => "past",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppointmentQuery {
    pub when: Option<AppointmentWindow>,
    pub status: Option<AppointmentStatus>,
}

impl AppointmentQuery {
    pub fn window(when: AppointmentWindow) -> Self {
        Self {
            when: Some(when),
            status: None,
        }
    }

    pub fn status(status: AppointmentStatus) -> Self {
        Self {
            when: None,
            status: Some(status),
        }
    }

    pub fn and_status(mut self, status: AppointmentStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(when) = self.when {
            pairs.push(("when", when.as_str().to_string()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        pairs
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAppointment {
    pub salon_id: String,
    #[serde(rename = "barber_id")]
    pub provider_id: String,
    pub service_id: String,
    pub date: CalendarDate,
    pub time: SlotTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Body of `PATCH /appointments`; the id travels in the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentUpdate {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RescheduleRequest {
    pub date: CalendarDate,
    pub time: SlotTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelRequest {
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum VendorAction {
    Confirm { message: String },
    Deny { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub rating: u8,
    pub comment: String,
    /// Present when editing; the server then updates in place.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewImagesRequest {
    pub images: Vec<ReviewImageUpload>,
}
