pub mod availability;
pub mod roster;

pub use availability::{AvailabilityService, day_of_week, free_slots_for, works_on};
pub use roster::DoctorRoster;
