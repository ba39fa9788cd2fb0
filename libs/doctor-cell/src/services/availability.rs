use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::models::{Availability, Doctor, SlotBooking, TimeSlot, UnavailableReason};
use crate::services::roster::DoctorRoster;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Weekday number with Sunday = 0 .. Saturday = 6.
pub fn day_of_week(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

pub fn works_on(doctor: &Doctor, date: NaiveDate) -> bool {
    doctor.works_on_day(day_of_week(date))
}

/// Master slots minus those held by a non-cancelled booking for this doctor
/// and date, in master order. Does not look at the doctor's work days.
pub fn free_slots_for<B: SlotBooking>(doctor: &Doctor, date: NaiveDate, bookings: &[B]) -> Vec<TimeSlot> {
    let taken: HashSet<TimeSlot> = bookings
        .iter()
        .filter(|booking| {
            booking.doctor_name() == doctor.name
                && booking.booked_date() == date
                && !booking.is_cancelled()
        })
        .map(|booking| booking.booked_slot())
        .collect();

    TimeSlot::ALL
        .iter()
        .copied()
        .filter(|slot| !taken.contains(slot))
        .collect()
}

/// Answers "can this doctor be booked on this date, and when" for the booking
/// form and the staff calendar. Selections arrive as raw form values; an
/// empty string counts as unset.
#[derive(Debug, Clone)]
pub struct AvailabilityService {
    roster: Arc<DoctorRoster>,
}

impl AvailabilityService {
    pub fn new(roster: Arc<DoctorRoster>) -> Self {
        Self { roster }
    }

    pub fn roster(&self) -> &DoctorRoster {
        &self.roster
    }

    /// True iff the date's weekday is one of the doctor's work days. Unknown
    /// doctors and malformed dates are never available.
    pub fn is_date_available(&self, doctor: Option<&str>, date: Option<&str>) -> bool {
        match self.resolve(doctor, date) {
            Ok((doctor, date)) => works_on(doctor, date),
            Err(reason) => {
                debug!("Date availability check failed: {:?}", reason);
                false
            }
        }
    }

    /// Bookable slots for the selection, empty when the selection is
    /// incomplete or invalid or the doctor does not work that day.
    pub fn available_slots<B: SlotBooking>(
        &self,
        doctor: Option<&str>,
        date: Option<&str>,
        bookings: &[B],
    ) -> Vec<TimeSlot> {
        match self.check_availability(doctor, date, bookings) {
            Availability::Available { slots } => slots,
            Availability::Unavailable { .. } => Vec::new(),
        }
    }

    /// Slots not held by a non-cancelled booking, ignoring work days.
    pub fn free_slots<B: SlotBooking>(
        &self,
        doctor: Option<&str>,
        date: Option<&str>,
        bookings: &[B],
    ) -> Vec<TimeSlot> {
        match self.resolve(doctor, date) {
            Ok((doctor, date)) => free_slots_for(doctor, date, bookings),
            Err(_) => Vec::new(),
        }
    }

    pub fn check_availability<B: SlotBooking>(
        &self,
        doctor: Option<&str>,
        date: Option<&str>,
        bookings: &[B],
    ) -> Availability {
        let (doctor, date) = match self.resolve(doctor, date) {
            Ok(selection) => selection,
            Err(reason) => return Availability::Unavailable { reason },
        };

        if !works_on(doctor, date) {
            debug!("{} does not work on {} ({})", doctor.name, date, date.weekday());
            return Availability::Unavailable {
                reason: UnavailableReason::NotAWorkDay,
            };
        }

        let slots = free_slots_for(doctor, date, bookings);
        debug!("{} has {} free slots on {}", doctor.name, slots.len(), date);

        if slots.is_empty() {
            Availability::Unavailable {
                reason: UnavailableReason::FullyBooked,
            }
        } else {
            Availability::Available { slots }
        }
    }

    fn resolve<'a>(
        &'a self,
        doctor: Option<&str>,
        date: Option<&str>,
    ) -> Result<(&'a Doctor, NaiveDate), UnavailableReason> {
        let doctor = doctor.map(str::trim).filter(|name| !name.is_empty());
        let date = date.map(str::trim).filter(|date| !date.is_empty());

        let (Some(doctor), Some(date)) = (doctor, date) else {
            return Err(UnavailableReason::UnsetSelection);
        };

        let doctor = self
            .roster
            .find(doctor)
            .ok_or(UnavailableReason::UnknownDoctor)?;
        let date = NaiveDate::parse_from_str(date, DATE_FORMAT)
            .map_err(|_| UnavailableReason::MalformedDate)?;

        Ok((doctor, date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_of_week_counts_from_sunday() {
        // 2024-06-02 was a Sunday.
        let sunday = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
        assert_eq!(day_of_week(sunday), 0);
        assert_eq!(day_of_week(sunday.succ_opt().unwrap()), 1);
        assert_eq!(day_of_week(NaiveDate::from_ymd_opt(2024, 6, 8).unwrap()), 6);
    }

    #[test]
    fn unset_selection_takes_precedence_over_unknown_doctor() {
        let service = AvailabilityService::new(Arc::new(DoctorRoster::default()));
        assert_eq!(
            service.resolve(Some("Nobody"), Some("")).unwrap_err(),
            UnavailableReason::UnsetSelection
        );
        assert_eq!(
            service.resolve(Some("Nobody"), Some("2024-06-04")).unwrap_err(),
            UnavailableReason::UnknownDoctor
        );
        assert_eq!(
            service.resolve(Some("Sarah Johnson"), Some("2024-13-40")).unwrap_err(),
            UnavailableReason::MalformedDate
        );
    }
}
