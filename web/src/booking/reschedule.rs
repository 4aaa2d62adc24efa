use shared_types::{
    Appointment, AppointmentChange, AppointmentStatus, AvailabilityKey, CalendarDate,
    RescheduleRequest, Slot, SlotTime,
};

use super::slots::{AvailabilityQuery, SlotBoard};
use super::wall_clock_to_utc;
use crate::error::BookingError;

#[derive(Debug, Clone, PartialEq)]
pub enum RescheduleOutcome {
    /// Hand this to the list; the modal can close.
    Rescheduled(Appointment),
    /// The slot was taken. Load this query before letting the user retry.
    Refetch(AvailabilityQuery),
    Failed,
}

/// State behind the reschedule modal for one appointment.
#[derive(Debug, Clone, PartialEq)]
pub struct RescheduleFlow {
    appointment: Appointment,
    date: CalendarDate,
    slots: SlotBoard,
    selected: Option<SlotTime>,
    pending: Option<RescheduleRequest>,
    error: Option<BookingError>,
}

impl RescheduleFlow {
    /// Terminal appointments cannot be moved.
    pub fn open(appointment: Appointment, date: CalendarDate) -> Result<Self, BookingError> {
        if !appointment.can_modify() {
            return Err(BookingError::validation(format!(
                "A {} appointment can no longer be rescheduled.",
                appointment.status.label().to_lowercase()
            )));
        }
        Ok(Self {
            appointment,
            date,
            slots: SlotBoard::default(),
            selected: None,
            pending: None,
            error: None,
        })
    }

    pub fn appointment(&self) -> &Appointment {
        &self.appointment
    }

    pub fn date(&self) -> CalendarDate {
        self.date
    }

    pub fn selected(&self) -> Option<SlotTime> {
        self.selected
    }

    pub fn slots(&self) -> &SlotBoard {
        &self.slots
    }

    pub fn error(&self) -> Option<&BookingError> {
        self.error.as_ref()
    }

    pub fn is_saving(&self) -> bool {
        self.pending.is_some()
    }

    pub fn availability_key(&self) -> AvailabilityKey {
        AvailabilityKey {
            salon_id: self.appointment.salon.id.clone(),
            provider_id: self.appointment.provider.id.clone(),
            service_id: self.appointment.service.id.clone(),
            date: self.date,
        }
    }

    pub fn select_date(&mut self, date: CalendarDate) {
        if !self.is_saving() && self.date != date {
            self.date = date;
            self.selected = None;
        }
    }

    pub fn begin_availability(&mut self) -> AvailabilityQuery {
        self.selected = None;
        self.slots.begin(self.availability_key())
    }

    pub fn apply_availability(
        &mut self,
        query: &AvailabilityQuery,
        result: Result<Vec<Slot>, BookingError>,
    ) -> bool {
        self.slots.resolve(query, result)
    }

    pub fn select_time(&mut self, time: SlotTime) -> bool {
        if self.is_saving() || self.slots.free_slot(time).is_none() {
            return false;
        }
        self.selected = Some(time);
        true
    }

    pub fn can_confirm(&self) -> bool {
        self.selected.is_some() && !self.is_saving()
    }

    pub fn confirm(&mut self) -> Option<RescheduleRequest> {
        if !self.can_confirm() {
            return None;
        }
        let request = RescheduleRequest {
            date: self.date,
            time: self.selected?,
        };
        self.pending = Some(request);
        self.error = None;
        Some(request)
    }

    pub fn finish(&mut self, result: Result<AppointmentChange, BookingError>) -> RescheduleOutcome {
        let Some(request) = self.pending.take() else {
            return RescheduleOutcome::Failed;
        };
        match result {
            Ok(change) => {
                let mut patched = self.appointment.apply(&change);
                if change.start_at.is_none() {
                    patched.start_at = wall_clock_to_utc(request.date, request.time);
                }
                patched.status = change.status.unwrap_or(AppointmentStatus::Confirmed);
                self.appointment = patched.clone();
                RescheduleOutcome::Rescheduled(patched)
            }
            Err(err) if err.is_conflict() => {
                self.error = Some(err);
                RescheduleOutcome::Refetch(self.begin_availability())
            }
            Err(err) => {
                self.error = Some(err);
                RescheduleOutcome::Failed
            }
        }
    }
}
