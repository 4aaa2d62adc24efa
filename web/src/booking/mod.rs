//! Booking flows as plain state machines. Components own one of these in a
//! signal and feed it backend results; everything here is testable without a
//! browser.

pub mod book;
pub mod reasons;
pub mod reschedule;
pub mod review;
pub mod slots;
pub mod wizard;

use chrono::{DateTime, Local, TimeZone, Utc};
use shared_types::{CalendarDate, SlotTime};

pub use book::{confirmed, load_appointment_book, load_vendor_board, AppointmentBook, VendorBoard};
pub use reasons::{ReasonForm, ReasonKind, CANCEL_REASONS, DENY_REASONS, OTHER_REASON};
pub use reschedule::{RescheduleFlow, RescheduleOutcome};
pub use review::{submit_review_with_images, ReviewForm, ReviewOutcome, ReviewStage};
pub use slots::{AvailabilityQuery, SlotBoard, SlotsState};
pub use wizard::{BookingWizard, ProvidersState, WizardAction, WizardStep};

/// Interprets a picked date and slot in the viewer's timezone. Only used
/// when the server does not echo the stored start time.
pub fn wall_clock_to_utc(date: CalendarDate, time: SlotTime) -> DateTime<Utc> {
    let naive = date.naive().and_time(time.naive());
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(|| naive.and_utc())
}
