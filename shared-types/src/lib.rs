//! Wire and domain types shared by the salon booking client.

pub mod appointment;
pub mod availability;
pub mod calendar;
mod ids;
pub mod requests;
pub mod review;
pub mod salon;

pub use appointment::{
    Appointment, AppointmentChange, AppointmentStatus, CustomerRef, PaymentStatus, ProviderRef,
    SalonRef, ServiceRef,
};
pub use availability::{sort_slots, AvailabilityKey, Slot, SlotStatus, SlotTime};
pub use calendar::{month_grid, CalendarCell, CalendarDate, CalendarError, MonthGrid};
pub use requests::{
    AppointmentQuery, AppointmentUpdate, AppointmentWindow, CancelRequest, NewAppointment,
    RescheduleRequest, ReviewImagesRequest, ReviewRequest, VendorAction,
};
pub use review::{ImageLabel, Review, ReviewImage, ReviewImageUpload};
pub use salon::{format_price, Provider, SalonDetail, ServiceOffering};
