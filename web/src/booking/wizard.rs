use shared_types::{
    Appointment, AppointmentChange, AppointmentStatus, AvailabilityKey, CalendarDate,
    NewAppointment, Provider, ProviderRef, SalonDetail, SalonRef, ServiceOffering, ServiceRef,
    Slot, SlotTime,
};

use super::slots::{AvailabilityQuery, SlotBoard};
use super::wall_clock_to_utc;
use crate::error::BookingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WizardStep {
    SelectProvider,
    SelectService,
    SelectDateTime,
    Notes,
    PaymentStub,
}

impl WizardStep {
    pub const COUNT: u8 = 5;

    pub fn number(self) -> u8 {
        match self {
            WizardStep::SelectProvider => 1,
            WizardStep::SelectService => 2,
            WizardStep::SelectDateTime => 3,
            WizardStep::Notes => 4,
            WizardStep::PaymentStub => 5,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::SelectProvider => "Choose your stylist",
            WizardStep::SelectService => "Pick a service",
            WizardStep::SelectDateTime => "Pick a date & time",
            WizardStep::Notes => "Anything we should know?",
            WizardStep::PaymentStub => "Review & confirm",
        }
    }

    fn next(self) -> Option<Self> {
        match self {
            WizardStep::SelectProvider => Some(WizardStep::SelectService),
            WizardStep::SelectService => Some(WizardStep::SelectDateTime),
            WizardStep::SelectDateTime => Some(WizardStep::Notes),
            WizardStep::Notes => Some(WizardStep::PaymentStub),
            WizardStep::PaymentStub => None,
        }
    }

    fn previous(self) -> Option<Self> {
        match self {
            WizardStep::SelectProvider => None,
            WizardStep::SelectService => Some(WizardStep::SelectProvider),
            WizardStep::SelectDateTime => Some(WizardStep::SelectService),
            WizardStep::Notes => Some(WizardStep::SelectDateTime),
            WizardStep::PaymentStub => Some(WizardStep::Notes),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProvidersState {
    Loading,
    Ready,
    Failed(BookingError),
}

/// What Continue did.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardAction {
    /// Guard not met, or a submission is already running.
    Stay,
    Advanced(WizardStep),
    /// Step 5 passed: send this to `create_appointment`.
    Submit(NewAppointment),
}

/// Selection state behind the booking modal. It is dropped when the modal
/// closes, so nothing leaks into the next booking.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingWizard {
    salon: SalonRef,
    services: Vec<ServiceOffering>,
    providers: Vec<Provider>,
    providers_state: ProvidersState,
    step: WizardStep,
    provider: Option<Provider>,
    service: Option<ServiceOffering>,
    date: CalendarDate,
    slot: Option<SlotTime>,
    note: String,
    slots: SlotBoard,
    submitting: bool,
    error: Option<BookingError>,
}

impl BookingWizard {
    pub fn new(salon: &SalonDetail, today: CalendarDate) -> Self {
        let (providers, providers_state) = match &salon.employees {
            Some(team) => (team.clone(), ProvidersState::Ready),
            None => (Vec::new(), ProvidersState::Loading),
        };
        Self {
            salon: SalonRef::from(salon),
            services: salon.services.clone(),
            providers,
            providers_state,
            step: WizardStep::SelectProvider,
            provider: None,
            service: None,
            date: today,
            slot: None,
            note: String::new(),
            slots: SlotBoard::default(),
            submitting: false,
            error: None,
        }
    }

    pub fn needs_providers(&self) -> bool {
        self.providers_state == ProvidersState::Loading
    }

    pub fn set_providers(&mut self, providers: Vec<Provider>) {
        self.providers = providers;
        self.providers_state = ProvidersState::Ready;
    }

    pub fn providers_failed(&mut self, err: BookingError) {
        self.providers_state = ProvidersState::Failed(err);
    }

    pub fn salon(&self) -> &SalonRef {
        &self.salon
    }

    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    pub fn providers_state(&self) -> &ProvidersState {
        &self.providers_state
    }

    pub fn services(&self) -> &[ServiceOffering] {
        &self.services
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn provider(&self) -> Option<&Provider> {
        self.provider.as_ref()
    }

    pub fn service(&self) -> Option<&ServiceOffering> {
        self.service.as_ref()
    }

    pub fn date(&self) -> CalendarDate {
        self.date
    }

    pub fn slot(&self) -> Option<SlotTime> {
        self.slot
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn slots(&self) -> &SlotBoard {
        &self.slots
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&BookingError> {
        self.error.as_ref()
    }

    pub fn progress_percent(&self) -> u8 {
        self.step.number() * 100 / WizardStep::COUNT
    }

    pub fn select_provider(&mut self, provider: Provider) {
        if self.provider.as_ref().map(|p| &p.id) != Some(&provider.id) {
            self.provider = Some(provider);
            self.slot = None;
        }
    }

    pub fn select_service(&mut self, service: ServiceOffering) {
        if self.service.as_ref().map(|s| &s.id) != Some(&service.id) {
            self.service = Some(service);
            self.slot = None;
        }
    }

    pub fn select_date(&mut self, date: CalendarDate) {
        if self.date != date {
            self.date = date;
            self.slot = None;
        }
    }

    /// Only free slots from the current list can be picked.
    pub fn select_slot(&mut self, time: SlotTime) -> bool {
        if self.slots.free_slot(time).is_none() {
            return false;
        }
        self.slot = Some(time);
        true
    }

    pub fn set_note(&mut self, note: impl Into<String>) {
        self.note = note.into();
    }

    pub fn can_continue(&self) -> bool {
        if self.submitting {
            return false;
        }
        match self.step {
            WizardStep::SelectProvider => self.provider.is_some(),
            WizardStep::SelectService => self.service.is_some(),
            WizardStep::SelectDateTime => self.slot.is_some(),
            WizardStep::Notes | WizardStep::PaymentStub => true,
        }
    }

    pub fn can_go_back(&self) -> bool {
        !self.submitting && self.step.previous().is_some()
    }

    /// The key slots should be loaded for. `None` outside step 3, so the
    /// other steps never fetch.
    pub fn availability_key(&self) -> Option<AvailabilityKey> {
        if self.step != WizardStep::SelectDateTime {
            return None;
        }
        let provider = self.provider.as_ref()?;
        let service = self.service.as_ref()?;
        Some(AvailabilityKey {
            salon_id: self.salon.id.clone(),
            provider_id: provider.id.clone(),
            service_id: service.id.clone(),
            date: self.date,
        })
    }

    /// Starts a fresh load; whatever slot was picked belonged to the old list.
    pub fn begin_availability(&mut self, key: AvailabilityKey) -> AvailabilityQuery {
        self.slot = None;
        self.slots.begin(key)
    }

    pub fn apply_availability(
        &mut self,
        query: &AvailabilityQuery,
        result: Result<Vec<Slot>, BookingError>,
    ) -> bool {
        self.slots.resolve(query, result)
    }

    pub fn advance(&mut self) -> WizardAction {
        if !self.can_continue() {
            return WizardAction::Stay;
        }
        match self.step.next() {
            Some(next) => {
                self.step = next;
                WizardAction::Advanced(next)
            }
            None => match self.payload() {
                Ok(payload) => {
                    self.submitting = true;
                    self.error = None;
                    WizardAction::Submit(payload)
                }
                Err(err) => {
                    self.error = Some(err);
                    WizardAction::Stay
                }
            },
        }
    }

    pub fn back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        let Some(previous) = self.step.previous() else {
            return false;
        };
        if self.step == WizardStep::SelectDateTime {
            self.slots.reset();
        }
        self.step = previous;
        self.error = None;
        true
    }

    pub fn payload(&self) -> Result<NewAppointment, BookingError> {
        let provider = self
            .provider
            .as_ref()
            .ok_or_else(|| BookingError::validation("Please choose a stylist."))?;
        let service = self
            .service
            .as_ref()
            .ok_or_else(|| BookingError::validation("Please choose a service."))?;
        let time = self
            .slot
            .ok_or_else(|| BookingError::validation("Please choose a time."))?;
        let note = self.note.trim();

        Ok(NewAppointment {
            salon_id: self.salon.id.clone(),
            provider_id: provider.id.clone(),
            service_id: service.id.clone(),
            date: self.date,
            time,
            notes: (!note.is_empty()).then(|| note.to_string()),
        })
    }

    /// Leaves every selection in place so the user can retry.
    pub fn submission_failed(&mut self, err: BookingError) {
        self.submitting = false;
        self.error = Some(err);
    }

    /// Builds the appointment the caller prepends to its list: what the
    /// user picked, overlaid with whatever the server echoed back.
    pub fn complete(&mut self, change: AppointmentChange) -> Option<Appointment> {
        self.submitting = false;
        let provisional = self.provisional(change.id.clone())?;
        Some(provisional.apply(&change))
    }

    fn provisional(&self, id: String) -> Option<Appointment> {
        let provider = self.provider.as_ref()?;
        let service = self.service.as_ref()?;
        let time = self.slot?;
        let note = self.note.trim();
        Some(Appointment {
            id,
            start_at: wall_clock_to_utc(self.date, time),
            status: AppointmentStatus::Pending,
            salon: self.salon.clone(),
            service: ServiceRef::from(service),
            provider: ProviderRef::from(provider),
            customer: None,
            note: (!note.is_empty()).then(|| note.to_string()),
            cancellation_reason: None,
            payment_status: None,
            review: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn salon() -> SalonDetail {
        SalonDetail {
            id: "s1".into(),
            name: "Fade Factory".into(),
            address: Some("12 Main St".into()),
            hours: None,
            services: vec![ServiceOffering {
                id: "cut".into(),
                name: "Haircut".into(),
                duration_minutes: Some(30),
                price: Some(35.0),
            }],
            employees: Some(vec![marco(), Provider {
                id: "b2".into(),
                name: "Lena".into(),
                avatar: None,
                specialties: vec![],
            }]),
        }
    }

    fn marco() -> Provider {
        Provider {
            id: "b1".into(),
            name: "Marco".into(),
            avatar: None,
            specialties: vec![],
        }
    }

    fn today() -> CalendarDate {
        CalendarDate::parse("2025-11-01").unwrap()
    }

    fn ten() -> SlotTime {
        SlotTime::from_hm(10, 0).unwrap()
    }

    /// Drives a wizard to step 3 with the 10:00 slot loaded.
    fn at_date_step() -> BookingWizard {
        let mut wizard = BookingWizard::new(&salon(), today());
        wizard.select_provider(marco());
        wizard.advance();
        wizard.select_service(salon().services[0].clone());
        wizard.advance();
        let key = wizard.availability_key().unwrap();
        let query = wizard.begin_availability(key);
        assert!(wizard.apply_availability(&query, Ok(vec![Slot::free(ten())])));
        wizard
    }

    #[test]
    fn continue_without_provider_is_a_no_op() {
        let mut wizard = BookingWizard::new(&salon(), today());
        assert_eq!(wizard.advance(), WizardAction::Stay);
        assert_eq!(wizard.step(), WizardStep::SelectProvider);

        wizard.select_provider(marco());
        assert_eq!(
            wizard.advance(),
            WizardAction::Advanced(WizardStep::SelectService)
        );
    }

    #[test]
    fn only_the_date_step_produces_an_availability_key() {
        let mut wizard = BookingWizard::new(&salon(), today());
        wizard.select_provider(marco());
        assert_eq!(wizard.availability_key(), None);
        wizard.advance();
        wizard.select_service(salon().services[0].clone());
        assert_eq!(wizard.availability_key(), None);
        wizard.advance();

        let key = wizard.availability_key().unwrap();
        assert_eq!(key.provider_id, "b1");
        assert_eq!(key.date, today());

        wizard.select_date(today().add_days(2));
        assert_eq!(wizard.availability_key().unwrap().date, today().add_days(2));
    }

    #[test]
    fn changing_date_clears_the_slot_and_blocks_continue() {
        let mut wizard = at_date_step();
        assert!(wizard.select_slot(ten()));
        assert!(wizard.can_continue());

        wizard.select_date(today().add_days(1));
        assert_eq!(wizard.slot(), None);
        assert!(!wizard.can_continue());
    }

    #[test]
    fn unknown_or_taken_slots_cannot_be_picked() {
        let mut wizard = at_date_step();
        assert!(!wizard.select_slot(SlotTime::from_hm(13, 0).unwrap()));
        assert_eq!(wizard.slot(), None);
    }

    #[test]
    fn back_from_date_step_drops_in_flight_slots() {
        let mut wizard = at_date_step();
        let key = wizard.availability_key().unwrap();
        let late = wizard.begin_availability(key);
        assert!(wizard.back());
        assert_eq!(wizard.step(), WizardStep::SelectService);
        assert!(!wizard.apply_availability(&late, Ok(vec![Slot::free(ten())])));
    }

    #[test]
    fn final_continue_builds_payload_and_locks_the_wizard() {
        let mut wizard = at_date_step();
        wizard.select_slot(ten());
        wizard.advance();
        wizard.set_note("  short on time  ");
        wizard.advance();
        assert_eq!(wizard.step(), WizardStep::PaymentStub);

        let WizardAction::Submit(payload) = wizard.advance() else {
            panic!("expected a submission");
        };
        assert_eq!(payload.provider_id, "b1");
        assert_eq!(payload.time, ten());
        assert_eq!(payload.notes.as_deref(), Some("short on time"));
        assert!(wizard.is_submitting());
        assert_eq!(wizard.advance(), WizardAction::Stay);
        assert!(!wizard.back());
    }

    #[test]
    fn failed_submission_keeps_every_selection() {
        let mut wizard = at_date_step();
        wizard.select_slot(ten());
        wizard.advance();
        wizard.advance();
        wizard.advance();

        wizard.submission_failed(BookingError::Conflict("taken".into()));
        assert_eq!(wizard.step(), WizardStep::PaymentStub);
        assert_eq!(wizard.slot(), Some(ten()));
        assert_eq!(wizard.provider().map(|p| p.name.as_str()), Some("Marco"));
        assert_eq!(wizard.error(), Some(&BookingError::Conflict("taken".into())));
        assert!(matches!(wizard.advance(), WizardAction::Submit(_)));
    }

    #[test]
    fn completion_merges_server_fields() {
        let mut wizard = at_date_step();
        wizard.select_slot(ten());
        wizard.advance();
        wizard.advance();
        wizard.advance();

        let mut change = AppointmentChange::for_id("A9");
        change.status = Some(AppointmentStatus::AwaitingVendor);
        let appointment = wizard.complete(change).unwrap();
        assert_eq!(appointment.id, "A9");
        assert_eq!(appointment.status, AppointmentStatus::AwaitingVendor);
        assert_eq!(appointment.provider.name, "Marco");
        assert_eq!(appointment.service.price, Some(35.0));
        assert!(!wizard.is_submitting());
    }

    #[test]
    fn salons_without_an_embedded_team_wait_for_providers() {
        let mut detail = salon();
        detail.employees = None;
        let mut wizard = BookingWizard::new(&detail, today());
        assert!(wizard.needs_providers());
        wizard.set_providers(vec![marco()]);
        assert!(!wizard.needs_providers());
        assert_eq!(wizard.providers().len(), 1);
    }
}
