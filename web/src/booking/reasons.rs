use shared_types::{Appointment, AppointmentChange, AppointmentStatus, PaymentStatus};

use crate::error::BookingError;

pub const OTHER_REASON: &str = "Other";

pub const CANCEL_REASONS: &[&str] = &[
    "Schedule conflict",
    "Unexpected event",
    "Booked by mistake",
    OTHER_REASON,
];

pub const DENY_REASONS: &[&str] = &[
    "Staff unavailable",
    "Outside working hours",
    "Service not offered at this time",
    OTHER_REASON,
];

/// Customer cancellation or salon denial. Both pick a reason the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReasonKind {
    Cancel,
    Deny,
}

impl ReasonKind {
    pub fn presets(self) -> &'static [&'static str] {
        match self {
            ReasonKind::Cancel => CANCEL_REASONS,
            ReasonKind::Deny => DENY_REASONS,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ReasonKind::Cancel => "Cancel appointment",
            ReasonKind::Deny => "Deny booking request",
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            ReasonKind::Cancel => "Let the salon know why you're cancelling.",
            ReasonKind::Deny => "Tell the customer why this request can't be accepted.",
        }
    }

    pub fn confirm_label(self) -> &'static str {
        match self {
            ReasonKind::Cancel => "Cancel appointment",
            ReasonKind::Deny => "Deny request",
        }
    }

    pub fn busy_label(self) -> &'static str {
        match self {
            ReasonKind::Cancel => "Cancelling…",
            ReasonKind::Deny => "Denying…",
        }
    }

    pub fn dismiss_label(self) -> &'static str {
        match self {
            ReasonKind::Cancel => "Keep appointment",
            ReasonKind::Deny => "Go back",
        }
    }

    fn allows(self, status: AppointmentStatus) -> bool {
        match self {
            ReasonKind::Cancel => status.can_modify(),
            ReasonKind::Deny => status.is_request(),
        }
    }
}

/// Preset choice plus the free-text "Other" reason.
#[derive(Debug, Clone, PartialEq)]
pub struct ReasonForm {
    kind: ReasonKind,
    appointment: Appointment,
    choice: usize,
    other_text: String,
    /// The reason in flight, exactly as sent.
    pending: Option<String>,
    error: Option<BookingError>,
}

impl ReasonForm {
    pub fn open(kind: ReasonKind, appointment: Appointment) -> Result<Self, BookingError> {
        if !kind.allows(appointment.status) {
            return Err(BookingError::validation(format!(
                "This appointment is {} and can't be changed.",
                appointment.status.label().to_lowercase()
            )));
        }
        Ok(Self {
            kind,
            appointment,
            choice: 0,
            other_text: String::new(),
            pending: None,
            error: None,
        })
    }

    pub fn kind(&self) -> ReasonKind {
        self.kind
    }

    pub fn appointment(&self) -> &Appointment {
        &self.appointment
    }

    pub fn choice(&self) -> usize {
        self.choice
    }

    pub fn other_text(&self) -> &str {
        &self.other_text
    }

    pub fn is_saving(&self) -> bool {
        self.pending.is_some()
    }

    pub fn error(&self) -> Option<&BookingError> {
        self.error.as_ref()
    }

    pub fn choose(&mut self, index: usize) {
        if !self.is_saving() && index < self.kind.presets().len() {
            self.choice = index;
        }
    }

    pub fn set_other_text(&mut self, text: impl Into<String>) {
        if !self.is_saving() {
            self.other_text = text.into();
        }
    }

    pub fn is_other(&self) -> bool {
        self.kind.presets().get(self.choice) == Some(&OTHER_REASON)
    }

    /// The text that will be sent, exactly as entered. `None` while "Other"
    /// is chosen with nothing typed.
    pub fn reason(&self) -> Option<String> {
        if self.is_other() {
            (!self.other_text.trim().is_empty()).then(|| self.other_text.clone())
        } else {
            self.kind
                .presets()
                .get(self.choice)
                .map(|preset| preset.to_string())
        }
    }

    pub fn can_confirm(&self) -> bool {
        !self.is_saving() && self.reason().is_some()
    }

    pub fn confirm(&mut self) -> Option<String> {
        if !self.can_confirm() {
            return None;
        }
        let reason = self.reason()?;
        self.pending = Some(reason.clone());
        self.error = None;
        Some(reason)
    }

    /// On success returns the appointment as the list should now show it,
    /// carrying the reason that was sent.
    pub fn finish(&mut self, result: Result<AppointmentChange, BookingError>) -> Option<Appointment> {
        let reason = self.pending.take()?;
        let change = match result {
            Ok(change) => change,
            Err(err) => {
                self.error = Some(err);
                return None;
            }
        };
        let mut patched = self.appointment.apply(&change);
        match self.kind {
            ReasonKind::Cancel => {
                patched.status = AppointmentStatus::Cancelled;
                patched.payment_status = Some(PaymentStatus::Refunded);
            }
            ReasonKind::Deny => patched.status = AppointmentStatus::Denied,
        }
        patched.cancellation_reason = Some(reason);
        Some(patched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn appointment(status: AppointmentStatus) -> Appointment {
        Appointment {
            id: "A1".into(),
            start_at: Utc::now(),
            status,
            salon: Default::default(),
            service: Default::default(),
            provider: Default::default(),
            customer: None,
            note: None,
            cancellation_reason: None,
            payment_status: None,
            review: None,
        }
    }

    fn other_index(kind: ReasonKind) -> usize {
        kind.presets().len() - 1
    }

    #[test]
    fn presets_end_with_other() {
        assert_eq!(CANCEL_REASONS.len(), 4);
        assert_eq!(DENY_REASONS[0], "Staff unavailable");
        assert_eq!(ReasonKind::Cancel.presets().last(), Some(&OTHER_REASON));
        assert_eq!(ReasonKind::Deny.presets().last(), Some(&OTHER_REASON));
    }

    #[test]
    fn other_with_blank_text_disables_confirm() {
        let mut form =
            ReasonForm::open(ReasonKind::Cancel, appointment(AppointmentStatus::Confirmed)).unwrap();
        assert!(form.can_confirm());

        form.choose(other_index(ReasonKind::Cancel));
        assert!(form.is_other());
        assert!(!form.can_confirm());
        form.set_other_text("   ");
        assert!(!form.can_confirm());
        assert_eq!(form.confirm(), None);

        form.set_other_text("Moving away ");
        assert_eq!(form.confirm().as_deref(), Some("Moving away "));
        assert!(!form.can_confirm());
    }

    #[test]
    fn cancel_success_marks_cancelled_refunded_with_verbatim_reason() {
        let mut form =
            ReasonForm::open(ReasonKind::Cancel, appointment(AppointmentStatus::Confirmed)).unwrap();
        form.choose(other_index(ReasonKind::Cancel));
        form.set_other_text("Car broke down");
        form.confirm().unwrap();

        let patched = form.finish(Ok(AppointmentChange::for_id("A1"))).unwrap();
        assert_eq!(patched.status, AppointmentStatus::Cancelled);
        assert_eq!(patched.payment(), PaymentStatus::Refunded);
        assert_eq!(patched.cancellation_reason.as_deref(), Some("Car broke down"));
    }

    #[test]
    fn edits_while_saving_do_not_change_the_recorded_reason() {
        let mut form =
            ReasonForm::open(ReasonKind::Cancel, appointment(AppointmentStatus::Confirmed)).unwrap();
        form.choose(other_index(ReasonKind::Cancel));
        form.set_other_text("Car broke down");
        let sent = form.confirm().unwrap();

        form.set_other_text("Car broke down, also sick");
        form.choose(0);
        assert_eq!(form.other_text(), "Car broke down");
        assert!(form.is_other());

        let patched = form.finish(Ok(AppointmentChange::for_id("A1"))).unwrap();
        assert_eq!(patched.cancellation_reason.as_deref(), Some(sent.as_str()));
        assert!(!form.is_saving());
    }

    #[test]
    fn finish_without_confirm_is_ignored() {
        let mut form =
            ReasonForm::open(ReasonKind::Deny, appointment(AppointmentStatus::AwaitingVendor)).unwrap();
        assert_eq!(form.finish(Ok(AppointmentChange::for_id("A1"))), None);
        assert!(form.error().is_none());
    }

    #[test]
    fn deny_only_applies_to_requests() {
        assert!(ReasonForm::open(ReasonKind::Deny, appointment(AppointmentStatus::Confirmed)).is_err());

        let mut form =
            ReasonForm::open(ReasonKind::Deny, appointment(AppointmentStatus::AwaitingVendor)).unwrap();
        form.choose(1);
        form.confirm().unwrap();
        let patched = form.finish(Ok(AppointmentChange::for_id("A1"))).unwrap();
        assert_eq!(patched.status, AppointmentStatus::Denied);
        assert_eq!(patched.cancellation_reason.as_deref(), Some("Outside working hours"));
    }

    #[test]
    fn failure_keeps_the_choice_for_retry() {
        let mut form =
            ReasonForm::open(ReasonKind::Cancel, appointment(AppointmentStatus::Pending)).unwrap();
        form.choose(2);
        form.confirm().unwrap();
        assert_eq!(form.finish(Err(BookingError::Network("offline".into()))), None);
        assert_eq!(form.choice(), 2);
        assert!(form.error().is_some());
        assert!(form.can_confirm());
    }

    #[test]
    fn terminal_appointments_cannot_be_cancelled() {
        assert!(ReasonForm::open(ReasonKind::Cancel, appointment(AppointmentStatus::Completed)).is_err());
    }
}
