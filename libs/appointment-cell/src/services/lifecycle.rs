// libs/appointment-cell/src/services/lifecycle.rs
use tracing::{debug, warn};

use crate::models::{AppointmentError, AppointmentStatus};

/// Guards appointment status changes.
///
/// ```text
/// pending   -> confirmed | cancelled
/// confirmed -> completed | cancelled
/// completed, cancelled: terminal
/// ```
///
/// Setting a status to its current value is accepted as a no-op so staff can
/// save notes without changing status.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppointmentLifecycleService;

impl AppointmentLifecycleService {
    pub fn new() -> Self {
        Self
    }

    /// Validate that a status transition is allowed
    pub fn validate_status_transition(
        &self,
        current_status: AppointmentStatus,
        new_status: AppointmentStatus,
    ) -> Result<(), AppointmentError> {
        debug!("Validating status transition from {} to {}", current_status, new_status);

        if current_status == new_status {
            return Ok(());
        }

        if !self.get_valid_transitions(current_status).contains(&new_status) {
            warn!("Invalid status transition attempted: {} -> {}", current_status, new_status);
            return Err(AppointmentError::InvalidStatusTransition {
                from: current_status,
                to: new_status,
            });
        }

        Ok(())
    }

    /// Get all valid next statuses for a given current status
    pub fn get_valid_transitions(&self, current_status: AppointmentStatus) -> &'static [AppointmentStatus] {
        match current_status {
            AppointmentStatus::Pending => &[AppointmentStatus::Confirmed, AppointmentStatus::Cancelled],
            AppointmentStatus::Confirmed => &[AppointmentStatus::Completed, AppointmentStatus::Cancelled],
            // Terminal states - no transitions allowed
            AppointmentStatus::Completed => &[],
            AppointmentStatus::Cancelled => &[],
        }
    }

    /// Whether a patient may still cancel from the self-service page.
    pub fn can_patient_cancel(&self, status: AppointmentStatus) -> bool {
        self.get_valid_transitions(status).contains(&AppointmentStatus::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use AppointmentStatus::*;

    #[test]
    fn transition_table_matches_lifecycle() {
        let lifecycle = AppointmentLifecycleService::new();
        let allowed = [
            (Pending, Confirmed),
            (Pending, Cancelled),
            (Confirmed, Completed),
            (Confirmed, Cancelled),
        ];

        for from in AppointmentStatus::ALL {
            for to in AppointmentStatus::ALL {
                let result = lifecycle.validate_status_transition(from, to);
                if from == to || allowed.contains(&(from, to)) {
                    assert!(result.is_ok(), "{} -> {} should be allowed", from, to);
                } else {
                    assert_eq!(
                        result,
                        Err(AppointmentError::InvalidStatusTransition { from, to })
                    );
                }
            }
        }
    }

    #[test]
    fn patients_can_cancel_until_completed() {
        let lifecycle = AppointmentLifecycleService::new();
        assert!(lifecycle.can_patient_cancel(Pending));
        assert!(lifecycle.can_patient_cancel(Confirmed));
        assert!(!lifecycle.can_patient_cancel(Completed));
    }
}
