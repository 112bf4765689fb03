pub mod admissions;
pub mod postgres;
pub mod profiles;

pub use admissions::{AdmissionFilter, AdmissionRepository, PgAdmissionRepository};
pub use postgres::{create_pool, run_migrations};
pub use profiles::{PgProfileRepository, ProfileRepository};
