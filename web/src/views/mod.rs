pub mod appointments;
pub mod home;
pub mod not_found;
pub mod salon_booking;
pub mod vendor_appointments;
