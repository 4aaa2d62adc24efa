pub mod appointment_card;
pub mod booking_wizard_modal;
pub mod calendar_picker;
pub mod error;
pub mod loading;
pub mod navbar;
pub mod note_editor;
pub mod reason_modal;
pub mod reschedule_modal;
pub mod review_form;
pub mod time_slot_picker;

// Re-export commonly used types
pub use appointment_card::{track_appointment, AppointmentCard, StatusBadge};
pub use booking_wizard_modal::BookingWizardModal;
pub use calendar_picker::CalendarPicker;
pub use note_editor::NoteEditor;
pub use reason_modal::ReasonModal;
pub use reschedule_modal::RescheduleModal;
pub use review_form::ReviewPanel;
pub use time_slot_picker::TimeSlotPicker;
