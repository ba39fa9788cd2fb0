pub mod directory;

pub use directory::{collect_patients, search_patients, PatientService};
