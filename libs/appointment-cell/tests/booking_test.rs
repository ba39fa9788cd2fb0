mod common;

use assert_matches::assert_matches;

use appointment_cell::models::{
    AppointmentError, AppointmentStatus, AvailabilityQuery, PatientLookupQuery,
    UpdateAppointmentRequest,
};
use appointment_cell::services::{AppointmentManagementService, BookingService};
use doctor_cell::models::{Availability, TimeSlot, UnavailableReason};

use common::*;

fn availability_query(doctor: &str, on: &str) -> AvailabilityQuery {
    AvailabilityQuery {
        doctor: Some(doctor.to_string()),
        date: Some(on.to_string()),
    }
}

#[tokio::test]
async fn booking_creates_a_pending_record_with_roster_department() {
    let state = test_state();
    let service = BookingService::new(&state);

    let appointment = service
        .book(booking_request("Michael Chen", TUESDAY, TimeSlot::Am0900))
        .await
        .unwrap();

    assert_eq!(appointment.status, AppointmentStatus::Pending);
    assert_eq!(appointment.department, "Cardiology");
    assert_eq!(appointment.patient_id, format!("p{}", appointment.id));
    assert!(appointment.notes.is_empty());

    let stored = service.get(&appointment.id).await.unwrap();
    assert_eq!(stored, appointment);
}

#[tokio::test]
async fn booked_slot_disappears_from_availability() {
    let state = test_state();
    let service = BookingService::new(&state);

    service
        .book(booking_request("Michael Chen", TUESDAY, TimeSlot::Am0900))
        .await
        .unwrap();

    let response = service
        .availability(&availability_query("Michael Chen", TUESDAY))
        .await
        .unwrap();

    assert!(response.is_date_available);
    assert_eq!(response.available_slots, TimeSlot::ALL[1..].to_vec());
    assert!(response.message.is_none());
}

#[tokio::test]
async fn availability_explains_why_nothing_is_offered() {
    let state = test_state();
    let service = BookingService::new(&state);

    let response = service
        .availability(&availability_query("Sarah Johnson", SUNDAY))
        .await
        .unwrap();
    assert!(!response.is_date_available);
    assert!(response.available_slots.is_empty());
    assert_eq!(
        response.availability,
        Availability::Unavailable {
            reason: UnavailableReason::NotAWorkDay
        }
    );

    let response = service.availability(&AvailabilityQuery::default()).await.unwrap();
    assert_eq!(
        response.availability,
        Availability::Unavailable {
            reason: UnavailableReason::UnsetSelection
        }
    );
    assert!(response.message.is_some());
}

#[tokio::test]
async fn ids_follow_creation_order() {
    let state = test_state();
    let service = BookingService::new(&state);

    let first = service
        .book(booking_request("Sarah Johnson", MONDAY, TimeSlot::Am0900))
        .await
        .unwrap();
    let second = service
        .book(booking_request("Sarah Johnson", MONDAY, TimeSlot::Am0930))
        .await
        .unwrap();

    assert!(second.id.parse::<u64>().unwrap() > first.id.parse::<u64>().unwrap());
}

#[tokio::test]
async fn unknown_doctor_and_missing_fields_are_rejected() {
    let state = test_state();
    let service = BookingService::new(&state);

    let result = service
        .book(booking_request("Gregory House", TUESDAY, TimeSlot::Am0900))
        .await;
    assert_matches!(result, Err(AppointmentError::UnknownDoctor(_)));

    let mut request = booking_request("Michael Chen", TUESDAY, TimeSlot::Am0900);
    request.reason = String::new();
    assert_matches!(service.book(request).await, Err(AppointmentError::ValidationError(_)));

    let mut request = booking_request("Michael Chen", TUESDAY, TimeSlot::Am0900);
    request.patient_email = "john at email".to_string();
    assert_matches!(service.book(request).await, Err(AppointmentError::ValidationError(_)));
}

#[tokio::test]
async fn default_policy_accepts_double_booking_at_submission() {
    let state = test_state();
    let service = BookingService::new(&state);

    service
        .book(booking_request("Michael Chen", TUESDAY, TimeSlot::Am0900))
        .await
        .unwrap();
    let second = service
        .book(booking_request("Michael Chen", TUESDAY, TimeSlot::Am0900))
        .await;
    assert!(second.is_ok());

    let off_day = service
        .book(booking_request("Michael Chen", MONDAY, TimeSlot::Am0900))
        .await;
    assert!(off_day.is_ok());
}

#[tokio::test]
async fn enforcing_policy_rejects_taken_slots_and_off_days() {
    let state = enforcing_state();
    let service = BookingService::new(&state);

    service
        .book(booking_request("Michael Chen", TUESDAY, TimeSlot::Am0900))
        .await
        .unwrap();

    let taken = service
        .book(booking_request("Michael Chen", TUESDAY, TimeSlot::Am0900))
        .await;
    assert_matches!(taken, Err(AppointmentError::SlotTaken { time: TimeSlot::Am0900, .. }));

    let off_day = service
        .book(booking_request("Michael Chen", MONDAY, TimeSlot::Am0900))
        .await;
    assert_matches!(off_day, Err(AppointmentError::DoctorNotAvailable { .. }));
}

#[tokio::test]
async fn cancelling_reopens_the_slot() {
    let state = enforcing_state();
    let service = BookingService::new(&state);

    let booked = service
        .book(booking_request("James Wilson", "2024-06-06", TimeSlot::Pm0430))
        .await
        .unwrap();

    let cancelled = service.cancel(&booked.id).await.unwrap();
    assert_eq!(cancelled.status, AppointmentStatus::Cancelled);

    let response = service
        .availability(&availability_query("James Wilson", "2024-06-06"))
        .await
        .unwrap();
    assert_eq!(response.available_slots, TimeSlot::ALL.to_vec());

    // the slot can be booked again even with enforcement on
    assert!(service
        .book(booking_request("James Wilson", "2024-06-06", TimeSlot::Pm0430))
        .await
        .is_ok());

    // cancelling again leaves the record as it was
    let again = service.cancel(&booked.id).await.unwrap();
    assert_eq!(again, cancelled);
}

#[tokio::test]
async fn completed_appointments_cannot_be_cancelled_by_the_patient() {
    let state = test_state();
    let service = BookingService::new(&state);
    let staff = AppointmentManagementService::new(&state);

    let booked = service
        .book(booking_request("Emily Roberts", MONDAY, TimeSlot::Am1130))
        .await
        .unwrap();
    staff.accept(&booked.id).await.unwrap();
    staff
        .update(
            &booked.id,
            UpdateAppointmentRequest {
                status: Some(AppointmentStatus::Completed),
                notes: None,
            },
        )
        .await
        .unwrap();

    assert_matches!(
        service.cancel(&booked.id).await,
        Err(AppointmentError::InvalidStatusTransition {
            from: AppointmentStatus::Completed,
            to: AppointmentStatus::Cancelled
        })
    );
}

#[tokio::test]
async fn lookup_matches_email_exactly_and_phone_partially() {
    let state = test_state();
    let service = BookingService::new(&state);

    service
        .book(booking_request("Sarah Johnson", MONDAY, TimeSlot::Am0900))
        .await
        .unwrap();
    let mut other = booking_request("Sarah Johnson", MONDAY, TimeSlot::Am1000);
    other.patient_email = "emma.wilson@email.com".to_string();
    other.patient_phone = "(555) 234-5678".to_string();
    service.book(other).await.unwrap();

    let by_email = service
        .lookup(&PatientLookupQuery {
            email: Some("JOHN.SMITH@email.com".to_string()),
            phone: None,
        })
        .await
        .unwrap();
    assert_eq!(by_email.len(), 1);
    assert_eq!(by_email[0].time, TimeSlot::Am0900);

    let by_phone = service
        .lookup(&PatientLookupQuery {
            email: None,
            phone: Some("234-56".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(by_phone.len(), 1);
    assert_eq!(by_phone[0].patient_email, "emma.wilson@email.com");

    let both_must_match = service
        .lookup(&PatientLookupQuery {
            email: Some("john.smith@email.com".to_string()),
            phone: Some("234-56".to_string()),
        })
        .await
        .unwrap();
    assert!(both_must_match.is_empty());

    let partial_email = service
        .lookup(&PatientLookupQuery {
            email: Some("john".to_string()),
            phone: None,
        })
        .await
        .unwrap();
    assert!(partial_email.is_empty());

    assert_matches!(
        service.lookup(&PatientLookupQuery::default()).await,
        Err(AppointmentError::ValidationError(_))
    );
}
