use chrono::{Days, NaiveDate};

use doctor_cell::models::TimeSlot;

use crate::models::{Appointment, AppointmentStatus};

struct DemoRecord {
    patient_name: &'static str,
    patient_email: &'static str,
    patient_phone: &'static str,
    days_from_today: u64,
    time: TimeSlot,
    doctor: &'static str,
    department: &'static str,
    reason: &'static str,
    status: AppointmentStatus,
    notes: &'static str,
}

const DEMO_RECORDS: [DemoRecord; 5] = [
    DemoRecord {
        patient_name: "John Smith",
        patient_email: "john.smith@email.com",
        patient_phone: "(555) 123-4567",
        days_from_today: 0,
        time: TimeSlot::Am0900,
        doctor: "Sarah Johnson",
        department: "General Medicine",
        reason: "Regular checkup",
        status: AppointmentStatus::Confirmed,
        notes: "Patient has no known allergies",
    },
    DemoRecord {
        patient_name: "Emma Wilson",
        patient_email: "emma.wilson@email.com",
        patient_phone: "(555) 234-5678",
        days_from_today: 0,
        time: TimeSlot::Am1030,
        doctor: "Michael Chen",
        department: "Cardiology",
        reason: "Heart consultation",
        status: AppointmentStatus::Pending,
        notes: "",
    },
    DemoRecord {
        patient_name: "James Brown",
        patient_email: "james.brown@email.com",
        patient_phone: "(555) 345-6789",
        days_from_today: 0,
        time: TimeSlot::Pm0200,
        doctor: "Sarah Johnson",
        department: "General Medicine",
        reason: "Flu symptoms",
        status: AppointmentStatus::Confirmed,
        notes: "Patient requested afternoon slot",
    },
    DemoRecord {
        patient_name: "Lisa Anderson",
        patient_email: "lisa.anderson@email.com",
        patient_phone: "(555) 456-7890",
        days_from_today: 1,
        time: TimeSlot::Am1100,
        doctor: "David Martinez",
        department: "Dermatology",
        reason: "Skin rash examination",
        status: AppointmentStatus::Confirmed,
        notes: "",
    },
    DemoRecord {
        patient_name: "Robert Taylor",
        patient_email: "robert.taylor@email.com",
        patient_phone: "(555) 567-8901",
        days_from_today: 1,
        time: TimeSlot::Pm0330,
        doctor: "Sarah Johnson",
        department: "General Medicine",
        reason: "Follow-up appointment",
        status: AppointmentStatus::Pending,
        notes: "Follow-up after last week's visit",
    },
];

/// Sample bookings used to initialise an empty store, dated relative to
/// `today`.
pub fn demo_appointments(today: NaiveDate) -> Vec<Appointment> {
    DEMO_RECORDS
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let id = (index + 1).to_string();
            Appointment {
                patient_id: format!("p{}", id),
                id,
                patient_name: record.patient_name.to_string(),
                patient_email: record.patient_email.to_string(),
                patient_phone: record.patient_phone.to_string(),
                date: today
                    .checked_add_days(Days::new(record.days_from_today))
                    .unwrap_or(today),
                time: record.time,
                doctor: record.doctor.to_string(),
                department: record.department.to_string(),
                reason: record.reason.to_string(),
                status: record.status,
                notes: record.notes.to_string(),
            }
        })
        .collect()
}
