use crate::domain::model::{LoginRequest, NurseAccount, NurseDraft};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Memory,
    Remote,
}

pub trait ConfigProvider: Send + Sync {
    fn backend_kind(&self) -> BackendKind;
    fn base_url(&self) -> Option<&str>;
    fn timeout(&self) -> Duration;
    fn seed_sample_data(&self) -> bool;
}

/// 護理師資料的存取介面；記憶體與 REST 後端各有一份實作
#[async_trait]
pub trait NurseRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<NurseAccount>>;
    async fn find_by_id(&self, id: i64) -> Result<Option<NurseAccount>>;
    async fn find_by_name(&self, name: &str) -> Result<Option<NurseAccount>>;
    async fn find_by_user(&self, user: &str) -> Result<Option<NurseAccount>>;
    async fn create(&self, draft: NurseDraft) -> Result<()>;
    async fn update(&self, id: i64, draft: NurseDraft) -> Result<NurseAccount>;
    async fn delete(&self, id: i64) -> Result<()>;
    async fn login(&self, request: &LoginRequest) -> Result<bool>;
}
