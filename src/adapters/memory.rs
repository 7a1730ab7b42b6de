use crate::core::{
    LoginRequest, Nurse, NurseAccount, NurseDraft, NurseRepository, ProfilePicture,
};
use crate::utils::error::{HospitalError, Result};
use crate::utils::validation::same_ignoring_case;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// 以記憶體保存護理師資料；複製後共享同一份資料
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    accounts: Arc<RwLock<Vec<NurseAccount>>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_accounts(accounts: Vec<NurseAccount>) -> Self {
        Self {
            accounts: Arc::new(RwLock::new(accounts)),
        }
    }

    /// 預先放入示範用的八位護理師
    pub fn with_sample_data() -> Self {
        Self::with_accounts(sample_nurses())
    }

    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

pub fn sample_nurses() -> Vec<NurseAccount> {
    let rows: [(i64, &str, &str, &str, &str, u8); 8] = [
        (1, "Alice", "Johnson", "alice.j", "pass123", 0),
        (2, "Alina", "Kovacs", "alina.k", "qwerty", 1),
        (3, "Bob", "Smith", "bob.s", "abc123", 2),
        (4, "Charlie", "Brown", "charlie.b", "password123", 1),
        (5, "David", "Lee", "david.l", "letmein", 5),
        (6, "Emma", "Wilson", "emma.w", "secure456", 4),
        (7, "Fiona", "Garcia", "fiona.g", "medical789", 4),
        (8, "George", "Miller", "george.m", "hospital321", 0),
    ];

    rows.into_iter()
        .map(|(id, name, surname, user, password, avatar)| {
            let email = format!(
                "{}.{}@fatfox.com",
                name.to_lowercase(),
                surname.to_lowercase()
            );
            NurseAccount::new(
                Nurse::new(id, name, surname, user, password),
                email,
                ProfilePicture::preset(avatar),
            )
        })
        .collect()
}

#[async_trait]
impl NurseRepository for InMemoryRepository {
    async fn list_all(&self) -> Result<Vec<NurseAccount>> {
        Ok(self.accounts.read().await.clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<NurseAccount>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.iter().find(|a| a.id() == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<NurseAccount>> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .iter()
            .find(|a| same_ignoring_case(a.nurse.name(), name))
            .cloned())
    }

    async fn find_by_user(&self, user: &str) -> Result<Option<NurseAccount>> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .iter()
            .find(|a| same_ignoring_case(a.nurse.user(), user))
            .cloned())
    }

    async fn create(&self, draft: NurseDraft) -> Result<()> {
        let mut accounts = self.accounts.write().await;
        let id = accounts
            .iter()
            .map(|a| a.id())
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or_else(|| HospitalError::validation("no nurse id left to assign"))?;
        tracing::debug!("Storing nurse '{}' with id {}", draft.user, id);
        accounts.push(draft.into_account(id));
        Ok(())
    }

    async fn update(&self, id: i64, draft: NurseDraft) -> Result<NurseAccount> {
        let mut accounts = self.accounts.write().await;
        let slot = accounts
            .iter_mut()
            .find(|a| a.id() == id)
            .ok_or_else(|| HospitalError::not_found(id))?;
        *slot = draft.into_account(id);
        Ok(slot.clone())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut accounts = self.accounts.write().await;
        let before = accounts.len();
        accounts.retain(|a| a.id() != id);
        if accounts.len() == before {
            return Err(HospitalError::not_found(id));
        }
        Ok(())
    }

    async fn login(&self, request: &LoginRequest) -> Result<bool> {
        let accounts = self.accounts.read().await;
        Ok(accounts.iter().any(|a| {
            a.nurse.user() == request.user && a.nurse.password() == request.password
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(user: &str) -> NurseDraft {
        NurseDraft {
            name: "Hana".to_string(),
            surname: "Ito".to_string(),
            email: format!("{}@fatfox.com", user),
            user: user.to_string(),
            password: "pw".to_string(),
            profile: ProfilePicture::default(),
        }
    }

    #[test]
    fn test_sample_data_is_seeded() {
        let repo = InMemoryRepository::with_sample_data();
        let accounts = tokio_test::block_on(repo.list_all()).unwrap();
        assert_eq!(accounts.len(), 8);
        assert_eq!(accounts[0].email, "alice.johnson@fatfox.com");
        assert_eq!(accounts[4].profile, ProfilePicture::Preset(5));
        assert_eq!(accounts[7].nurse.password(), "hospital321");
    }

    #[tokio::test]
    async fn test_create_assigns_next_id() {
        let repo = InMemoryRepository::new();
        repo.create(draft("first")).await.unwrap();
        assert_eq!(repo.find_by_user("first").await.unwrap().unwrap().id(), 1);

        let repo = InMemoryRepository::with_sample_data();
        repo.delete(3).await.unwrap();
        repo.create(draft("ninth")).await.unwrap();
        assert_eq!(repo.find_by_user("ninth").await.unwrap().unwrap().id(), 9);
    }

    #[tokio::test]
    async fn test_create_refuses_to_overflow_ids() {
        let repo = InMemoryRepository::with_accounts(vec![NurseAccount::new(
            Nurse::new(i64::MAX, "Max", "Id", "max.id", "pw"),
            "max.id@fatfox.com",
            ProfilePicture::default(),
        )]);

        let err = repo.create(draft("next")).await.unwrap_err();
        assert!(matches!(err, HospitalError::ValidationError { .. }));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_negative_ids_still_get_next_id() {
        let repo = InMemoryRepository::with_accounts(vec![NurseAccount::new(
            Nurse::new(-5, "A", "B", "c", "d"),
            "c@fatfox.com",
            ProfilePicture::default(),
        )]);

        repo.create(draft("next")).await.unwrap();
        assert_eq!(repo.find_by_user("next").await.unwrap().unwrap().id(), -4);
    }

    #[tokio::test]
    async fn test_clones_share_storage() {
        let repo = InMemoryRepository::new();
        let other = repo.clone();
        repo.create(draft("shared")).await.unwrap();
        assert_eq!(other.len().await, 1);
    }

    #[tokio::test]
    async fn test_lookups() {
        let repo = InMemoryRepository::with_sample_data();
        assert_eq!(repo.find_by_id(5).await.unwrap().unwrap().nurse.name(), "David");
        assert!(repo.find_by_id(42).await.unwrap().is_none());
        assert_eq!(repo.find_by_name("emma").await.unwrap().unwrap().id(), 6);
        assert_eq!(repo.find_by_user("FIONA.G").await.unwrap().unwrap().id(), 7);

        let repo = InMemoryRepository::with_accounts(vec![NurseAccount::new(
            Nurse::new(1, "Élodie", "Moreau", "josé", "pw"),
            "jose@fatfox.com",
            ProfilePicture::default(),
        )]);
        assert_eq!(repo.find_by_user("JOSÉ").await.unwrap().unwrap().id(), 1);
        assert_eq!(repo.find_by_name("ÉLODIE").await.unwrap().unwrap().id(), 1);
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_id() {
        let repo = InMemoryRepository::with_sample_data();
        assert!(matches!(
            repo.update(42, draft("x")).await.unwrap_err(),
            HospitalError::NurseNotFound { .. }
        ));
        assert!(matches!(
            repo.delete(42).await.unwrap_err(),
            HospitalError::NurseNotFound { .. }
        ));
        assert_eq!(repo.len().await, 8);
    }

    #[tokio::test]
    async fn test_login_is_exact() {
        let repo = InMemoryRepository::with_sample_data();
        assert!(repo.login(&LoginRequest::new("bob.s", "abc123")).await.unwrap());
        assert!(!repo.login(&LoginRequest::new("bob.s", "ABC123")).await.unwrap());
        assert!(!repo.login(&LoginRequest::new("nobody", "abc123")).await.unwrap());
    }
}
