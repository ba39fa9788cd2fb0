mod common;

use assert_matches::assert_matches;

use appointment_cell::models::{
    AppointmentError, AppointmentSearchQuery, AppointmentStatus, UpdateAppointmentRequest,
};
use appointment_cell::services::demo::demo_appointments;
use appointment_cell::services::management::{filter_appointments, parse_status_filter};
use appointment_cell::services::{AppointmentManagementService, BookingService};
use doctor_cell::models::TimeSlot;

use common::*;

#[test]
fn search_covers_patient_doctor_and_reason() {
    let records = demo_appointments(date(TUESDAY));

    let by_patient = filter_appointments(&records, Some("emma"), None);
    assert_eq!(by_patient.len(), 1);

    let by_doctor = filter_appointments(&records, Some("SARAH"), None);
    assert_eq!(by_doctor.len(), 3);

    let by_reason = filter_appointments(&records, Some("rash"), None);
    assert_eq!(by_reason[0].patient_name, "Lisa Anderson");

    let pending_for_sarah = filter_appointments(&records, Some("sarah"), Some(AppointmentStatus::Pending));
    assert_eq!(pending_for_sarah.len(), 1);
    assert_eq!(pending_for_sarah[0].patient_name, "Robert Taylor");

    assert_eq!(filter_appointments(&records, None, None).len(), records.len());
}

#[test]
fn status_filter_accepts_all_and_status_names() {
    assert_eq!(parse_status_filter(None).unwrap(), None);
    assert_eq!(parse_status_filter(Some("all")).unwrap(), None);
    assert_eq!(
        parse_status_filter(Some("Confirmed")).unwrap(),
        Some(AppointmentStatus::Confirmed)
    );
    assert_matches!(parse_status_filter(Some("archived")), Err(AppointmentError::ValidationError(_)));
}

#[tokio::test]
async fn accept_and_reject_follow_the_transition_table() {
    let state = test_state();
    let booking = BookingService::new(&state);
    let staff = AppointmentManagementService::new(&state);

    let first = booking
        .book(booking_request("Emily Roberts", MONDAY, TimeSlot::Am0900))
        .await
        .unwrap();
    let second = booking
        .book(booking_request("Emily Roberts", MONDAY, TimeSlot::Am0930))
        .await
        .unwrap();

    assert_eq!(staff.accept(&first.id).await.unwrap().status, AppointmentStatus::Confirmed);
    assert_eq!(staff.reject(&second.id).await.unwrap().status, AppointmentStatus::Cancelled);

    // rejected requests stay rejected
    assert_matches!(
        staff.accept(&second.id).await,
        Err(AppointmentError::InvalidStatusTransition {
            from: AppointmentStatus::Cancelled,
            to: AppointmentStatus::Confirmed
        })
    );
    assert_matches!(staff.accept("missing").await, Err(AppointmentError::NotFound(_)));
}

#[tokio::test]
async fn detail_edit_updates_status_and_notes() {
    let state = test_state();
    let booking = BookingService::new(&state);
    let staff = AppointmentManagementService::new(&state);

    let appointment = booking
        .book(booking_request("David Martinez", WEDNESDAY, TimeSlot::Pm0300))
        .await
        .unwrap();

    let notes_only = staff
        .update(
            &appointment.id,
            UpdateAppointmentRequest {
                status: Some(AppointmentStatus::Pending),
                notes: Some("Bring previous prescriptions".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(notes_only.status, AppointmentStatus::Pending);
    assert_eq!(notes_only.notes, "Bring previous prescriptions");

    // pending cannot jump straight to completed
    assert_matches!(
        staff
            .update(
                &appointment.id,
                UpdateAppointmentRequest {
                    status: Some(AppointmentStatus::Completed),
                    notes: None,
                },
            )
            .await,
        Err(AppointmentError::InvalidStatusTransition { .. })
    );

    staff.accept(&appointment.id).await.unwrap();
    let completed = staff
        .update(
            &appointment.id,
            UpdateAppointmentRequest {
                status: Some(AppointmentStatus::Completed),
                notes: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(completed.status, AppointmentStatus::Completed);
    assert_eq!(completed.notes, "Bring previous prescriptions");

    let listed = staff
        .search(&AppointmentSearchQuery {
            search: None,
            status: Some("completed".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
}
