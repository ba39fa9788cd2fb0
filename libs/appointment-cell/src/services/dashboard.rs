use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Appointment, AppointmentError, AppointmentStatus};
use crate::services::repository::AppointmentRepository;
use crate::state::AppointmentState;

pub const DASHBOARD_LIST_LIMIT: usize = 4;

pub const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub date: NaiveDate,
    pub stats: DashboardStats,
    pub today_appointments: Vec<Appointment>,
    pub appointment_requests: Vec<Appointment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub day: u32,
    pub date: NaiveDate,
    pub is_today: bool,
    pub is_selected: bool,
    pub has_appointments: bool,
    pub appointment_count: usize,
}

/// Month grid starting on Sunday. Leading `None` cells pad the weekdays
/// before the first of the month.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub days: Vec<Option<CalendarDay>>,
}

pub fn dashboard_stats(records: &[Appointment]) -> DashboardStats {
    DashboardStats {
        total: records.len(),
        pending: records.iter().filter(|r| r.status == AppointmentStatus::Pending).count(),
        completed: records.iter().filter(|r| r.status == AppointmentStatus::Completed).count(),
    }
}

/// Appointments on `date` in slot order.
pub fn appointments_on(records: &[Appointment], date: NaiveDate) -> Vec<Appointment> {
    let mut day: Vec<Appointment> = records.iter().filter(|r| r.date == date).cloned().collect();
    day.sort_by_key(|r| r.time);
    day
}

pub fn summarize(records: &[Appointment], today: NaiveDate) -> DashboardSummary {
    let mut today_appointments = appointments_on(records, today);
    today_appointments.truncate(DASHBOARD_LIST_LIMIT);

    let appointment_requests = records
        .iter()
        .filter(|r| r.status == AppointmentStatus::Pending)
        .take(DASHBOARD_LIST_LIMIT)
        .cloned()
        .collect();

    DashboardSummary {
        date: today,
        stats: dashboard_stats(records),
        today_appointments,
        appointment_requests,
    }
}

pub fn calendar_month(
    records: &[Appointment],
    year: i32,
    month: u32,
    today: NaiveDate,
    selected: Option<NaiveDate>,
) -> Result<CalendarMonth, AppointmentError> {
    let invalid = || AppointmentError::ValidationError(format!("invalid calendar month {}-{}", year, month));

    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(invalid)?;

    let leading = first.weekday().num_days_from_sunday() as usize;
    let mut days: Vec<Option<CalendarDay>> = vec![None; leading];

    for date in first.iter_days().take_while(|date| *date < next_first) {
        let appointment_count = records.iter().filter(|r| r.date == date).count();
        days.push(Some(CalendarDay {
            day: date.day(),
            date,
            is_today: date == today,
            is_selected: selected == Some(date),
            has_appointments: appointment_count > 0,
            appointment_count,
        }));
    }

    Ok(CalendarMonth {
        year,
        month,
        month_name: MONTH_NAMES[(month - 1) as usize].to_string(),
        days,
    })
}

pub struct DashboardService {
    repository: AppointmentRepository,
}

impl DashboardService {
    pub fn new(state: &AppointmentState) -> Self {
        Self {
            repository: state.repository.clone(),
        }
    }

    pub async fn summary(&self, today: NaiveDate) -> Result<DashboardSummary, AppointmentError> {
        debug!("Building dashboard summary for {}", today);
        let records = self.repository.list().await?;
        Ok(summarize(&records, today))
    }

    pub async fn calendar(
        &self,
        year: i32,
        month: u32,
        today: NaiveDate,
        selected: Option<NaiveDate>,
    ) -> Result<CalendarMonth, AppointmentError> {
        let records = self.repository.list().await?;
        calendar_month(&records, year, month, today, selected)
    }

    pub async fn day(&self, date: NaiveDate) -> Result<Vec<Appointment>, AppointmentError> {
        let records = self.repository.list().await?;
        Ok(appointments_on(&records, date))
    }
}
