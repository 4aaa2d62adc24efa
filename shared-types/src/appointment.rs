use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids;
use crate::review::Review;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    AwaitingVendor,
    #[serde(alias = "scheduled")]
    Confirmed,
    Completed,
    #[serde(alias = "canceled")]
    Cancelled,
    RescheduleRequested,
    Denied,
    NoShow,
}

impl AppointmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::AwaitingVendor => "awaiting_vendor",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::RescheduleRequested => "reschedule_requested",
            AppointmentStatus::Denied => "denied",
            AppointmentStatus::NoShow => "no_show",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "Pending",
            AppointmentStatus::AwaitingVendor => "Awaiting salon",
            AppointmentStatus::Confirmed => "Confirmed",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Cancelled => "Cancelled",
            AppointmentStatus::RescheduleRequested => "Reschedule requested",
            AppointmentStatus::Denied => "Denied",
            AppointmentStatus::NoShow => "No-show",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            AppointmentStatus::Completed
                | AppointmentStatus::Cancelled
                | AppointmentStatus::Denied
                | AppointmentStatus::NoShow
        )
    }

    /// Cancel and reschedule are only offered for live appointments.
    pub fn can_modify(self) -> bool {
        !self.is_terminal()
    }

    /// Waiting on the salon to confirm or deny.
    pub fn is_request(self) -> bool {
        matches!(
            self,
            AppointmentStatus::Pending | AppointmentStatus::AwaitingVendor
        )
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    Refunded,
}

impl PaymentStatus {
    pub fn label(self) -> &'static str {
        match self {
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Refunded => "Refunded",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalonRef {
    #[serde(default, deserialize_with = "ids::string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceRef {
    #[serde(default, deserialize_with = "ids::string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(
        default,
        alias = "durationMin",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration_minutes: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderRef {
    #[serde(default, deserialize_with = "ids::string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerRef {
    #[serde(default, deserialize_with = "ids::string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl CustomerRef {
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| "Customer".to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    #[serde(deserialize_with = "ids::string_or_number")]
    pub id: String,
    #[serde(alias = "whenISO")]
    pub start_at: DateTime<Utc>,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub salon: SalonRef,
    #[serde(default)]
    pub service: ServiceRef,
    #[serde(default, alias = "barber", alias = "employee")]
    pub provider: ProviderRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerRef>,
    #[serde(default, alias = "notes", skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, alias = "reason", skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<Review>,
}

impl Appointment {
    /// Falls back to `refunded` for cancelled visits and `paid` otherwise when
    /// the server did not say.
    pub fn payment(&self) -> PaymentStatus {
        self.payment_status.unwrap_or(match self.status {
            AppointmentStatus::Cancelled => PaymentStatus::Refunded,
            _ => PaymentStatus::Paid,
        })
    }

    pub fn can_modify(&self) -> bool {
        self.status.can_modify()
    }

    pub fn can_review(&self) -> bool {
        self.status == AppointmentStatus::Completed
    }

    /// Overlays the fields present in `change`. The caller matches ids.
    pub fn apply(&self, change: &AppointmentChange) -> Appointment {
        let mut next = self.clone();
        if let Some(start_at) = change.start_at {
            next.start_at = start_at;
        }
        if let Some(status) = change.status {
            next.status = status;
        }
        if let Some(salon) = &change.salon {
            next.salon = salon.clone();
        }
        if let Some(service) = &change.service {
            next.service = service.clone();
        }
        if let Some(provider) = &change.provider {
            next.provider = provider.clone();
        }
        if change.note.is_some() {
            next.note = change.note.clone();
        }
        if change.cancellation_reason.is_some() {
            next.cancellation_reason = change.cancellation_reason.clone();
        }
        if change.payment_status.is_some() {
            next.payment_status = change.payment_status;
        }
        if change.review.is_some() {
            next.review = change.review.clone();
        }
        next
    }
}

/// What a mutation endpoint sends back: the id plus whichever fields it chose
/// to include. A full appointment decodes as a change too.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppointmentChange {
    #[serde(deserialize_with = "ids::string_or_number")]
    pub id: String,
    #[serde(default, alias = "whenISO", skip_serializing_if = "Option::is_none")]
    pub start_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salon: Option<SalonRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceRef>,
    #[serde(
        default,
        alias = "barber",
        alias = "employee",
        skip_serializing_if = "Option::is_none"
    )]
    pub provider: Option<ProviderRef>,
    #[serde(default, alias = "notes", skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, alias = "reason", skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<Review>,
}

impl AppointmentChange {
    pub fn for_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}
