pub mod directory;

pub use crate::domain::model::{
    LoginRequest, Nurse, NurseAccount, NurseDraft, ProfilePicture, PRESET_AVATARS,
};
pub use crate::domain::ports::{BackendKind, ConfigProvider, NurseRepository};
pub use crate::utils::error::Result;
