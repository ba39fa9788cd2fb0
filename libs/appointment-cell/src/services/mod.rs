pub mod booking;
pub mod dashboard;
pub mod demo;
pub mod lifecycle;
pub mod management;
pub mod repository;

pub use booking::{BookingPolicy, BookingService};
pub use dashboard::DashboardService;
pub use lifecycle::AppointmentLifecycleService;
pub use management::AppointmentManagementService;
pub use repository::AppointmentRepository;
