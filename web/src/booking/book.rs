use futures_util::future::{join, join4};
use shared_types::{
    Appointment, AppointmentChange, AppointmentQuery, AppointmentStatus, AppointmentWindow, Review,
};

use crate::api::BookingBackend;
use crate::error::BookingError;

/// The customer's appointments, split the way the page shows them.
///
/// Loaded once per visit. Every mutation returns a new book instead of
/// editing in place, and nothing is refetched afterwards: a change made on
/// another device stays invisible until the page reloads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppointmentBook {
    pub upcoming: Vec<Appointment>,
    pub past: Vec<Appointment>,
}

impl AppointmentBook {
    pub fn new(upcoming: Vec<Appointment>, past: Vec<Appointment>) -> Self {
        Self { upcoming, past }
    }

    pub fn find(&self, id: &str) -> Option<&Appointment> {
        self.upcoming
            .iter()
            .chain(self.past.iter())
            .find(|appointment| appointment.id == id)
    }

    pub fn with_created(&self, appointment: Appointment) -> Self {
        let upcoming = std::iter::once(appointment.clone())
            .chain(
                self.upcoming
                    .iter()
                    .filter(|existing| existing.id != appointment.id)
                    .cloned(),
            )
            .collect();
        Self {
            upcoming,
            past: self.past.clone(),
        }
    }

    /// Swaps the appointment with the same id; its position is kept.
    pub fn with_rescheduled(&self, appointment: &Appointment) -> Self {
        Self {
            upcoming: replace_by_id(&self.upcoming, appointment),
            past: self.past.clone(),
        }
    }

    /// Moves the appointment from upcoming to the top of past.
    pub fn with_cancelled(&self, appointment: &Appointment) -> Self {
        Self {
            upcoming: without_id(&self.upcoming, &appointment.id),
            past: std::iter::once(appointment.clone())
                .chain(without_id(&self.past, &appointment.id))
                .collect(),
        }
    }

    pub fn with_review(&self, appointment_id: &str, review: &Review) -> Self {
        let attach = |appointment: &Appointment| {
            if appointment.id == appointment_id {
                Appointment {
                    review: Some(review.clone()),
                    ..appointment.clone()
                }
            } else {
                appointment.clone()
            }
        };
        Self {
            upcoming: self.upcoming.iter().map(attach).collect(),
            past: self.past.iter().map(attach).collect(),
        }
    }

    pub fn with_note(&self, change: &AppointmentChange) -> Self {
        let merge = |appointment: &Appointment| {
            if appointment.id == change.id {
                appointment.apply(change)
            } else {
                appointment.clone()
            }
        };
        Self {
            upcoming: self.upcoming.iter().map(merge).collect(),
            past: self.past.iter().map(merge).collect(),
        }
    }
}

/// A salon's incoming requests and their outcomes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VendorBoard {
    pub pending: Vec<Appointment>,
    pub upcoming: Vec<Appointment>,
    pub denied: Vec<Appointment>,
}

impl VendorBoard {
    pub fn with_confirmed(&self, appointment: &Appointment) -> Self {
        Self {
            pending: without_id(&self.pending, &appointment.id),
            upcoming: std::iter::once(appointment.clone())
                .chain(without_id(&self.upcoming, &appointment.id))
                .collect(),
            denied: self.denied.clone(),
        }
    }

    pub fn with_denied(&self, appointment: &Appointment) -> Self {
        Self {
            pending: without_id(&self.pending, &appointment.id),
            upcoming: self.upcoming.clone(),
            denied: std::iter::once(appointment.clone())
                .chain(without_id(&self.denied, &appointment.id))
                .collect(),
        }
    }
}

/// Overlays a confirm response and forces the confirmed status.
pub fn confirmed(appointment: &Appointment, change: &AppointmentChange) -> Appointment {
    Appointment {
        status: AppointmentStatus::Confirmed,
        ..appointment.apply(change)
    }
}

fn replace_by_id(list: &[Appointment], replacement: &Appointment) -> Vec<Appointment> {
    list.iter()
        .map(|appointment| {
            if appointment.id == replacement.id {
                replacement.clone()
            } else {
                appointment.clone()
            }
        })
        .collect()
}

fn without_id(list: &[Appointment], id: &str) -> Vec<Appointment> {
    list.iter()
        .filter(|appointment| appointment.id != id)
        .cloned()
        .collect()
}

pub async fn load_appointment_book<B>(backend: &B) -> Result<AppointmentBook, BookingError>
where
    B: BookingBackend + ?Sized,
{
    let upcoming_query = AppointmentQuery::window(AppointmentWindow::Upcoming);
    let past_query = AppointmentQuery::window(AppointmentWindow::Past);
    let (upcoming, past) = join(
        backend.list_appointments(&upcoming_query),
        backend.list_appointments(&past_query),
    )
    .await;
    Ok(AppointmentBook::new(upcoming?, past?))
}

pub async fn load_vendor_board<B>(backend: &B) -> Result<VendorBoard, BookingError>
where
    B: BookingBackend + ?Sized,
{
    let pending_query = AppointmentQuery::status(AppointmentStatus::Pending);
    let awaiting_query = AppointmentQuery::status(AppointmentStatus::AwaitingVendor);
    let upcoming_query = AppointmentQuery::window(AppointmentWindow::Upcoming)
        .and_status(AppointmentStatus::Confirmed);
    let denied_query = AppointmentQuery::status(AppointmentStatus::Denied);

    let (pending, awaiting, upcoming, denied) = join4(
        backend.list_appointments(&pending_query),
        backend.list_appointments(&awaiting_query),
        backend.list_appointments(&upcoming_query),
        backend.list_appointments(&denied_query),
    )
    .await;

    let mut pending = pending?;
    pending.extend(awaiting?);
    pending.sort_by_key(|appointment| appointment.start_at);

    Ok(VendorBoard {
        pending,
        upcoming: upcoming?,
        denied: denied?,
    })
}
