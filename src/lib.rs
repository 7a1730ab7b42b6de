pub mod adapters;
#[cfg(feature = "cli")]
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{InMemoryRepository, RestRepository};
#[cfg(feature = "cli")]
pub use config::{Cli, Command};
pub use config::HospitalConfig;
pub use core::directory::{NurseChanges, NurseDirectory, RegistrationForm};
pub use domain::model::{LoginRequest, Nurse, NurseAccount, NurseDraft, ProfilePicture};
pub use domain::ports::{BackendKind, ConfigProvider, NurseRepository};
pub use utils::error::{HospitalError, Result};
