use crate::core::{LoginRequest, NurseAccount, NurseDraft, NurseRepository, ProfilePicture};
use crate::utils::error::{HospitalError, Result};
use crate::utils::validation::{is_blank, same_ignoring_case, validate_email};

/// 註冊表單，欄位對應註冊畫面的輸入框
#[derive(Clone, Default)]
pub struct RegistrationForm {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub username: String,
    pub password: String,
    pub profile: u8,
}

/// Partial update; `None` keeps the stored value.
#[derive(Clone, Default)]
pub struct NurseChanges {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub profile: Option<u8>,
}

impl NurseChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.surname.is_none()
            && self.email.is_none()
            && self.user.is_none()
            && self.password.is_none()
            && self.profile.is_none()
    }

    fn apply(self, mut draft: NurseDraft) -> NurseDraft {
        if let Some(name) = self.name {
            draft.name = name.trim().to_string();
        }
        if let Some(surname) = self.surname {
            draft.surname = surname.trim().to_string();
        }
        if let Some(email) = self.email {
            draft.email = email.trim().to_string();
        }
        if let Some(user) = self.user {
            draft.user = user.trim().to_string();
        }
        if let Some(password) = self.password {
            draft.password = password;
        }
        if let Some(profile) = self.profile {
            draft.profile = ProfilePicture::preset(profile);
        }
        draft
    }
}

/// 護理師名冊服務：搜尋、登入與註冊規則都在這一層，
/// 實體本身保持不做檢查。
pub struct NurseDirectory<R: NurseRepository> {
    repository: R,
}

impl<R: NurseRepository> NurseDirectory<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub async fn list(&self) -> Result<Vec<NurseAccount>> {
        let nurses = self.repository.list_all().await?;
        tracing::debug!("Loaded {} nurses", nurses.len());
        Ok(nurses)
    }

    pub async fn show(&self, id: i64) -> Result<NurseAccount> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| HospitalError::not_found(id))
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<NurseAccount>> {
        self.repository.find_by_name(name).await
    }

    pub async fn find_by_user(&self, user: &str) -> Result<Option<NurseAccount>> {
        self.repository.find_by_user(user).await
    }

    /// 不分大小寫比對名字、姓氏或帳號；空白查詢直接回傳空結果
    pub async fn search(&self, query: &str) -> Result<Vec<NurseAccount>> {
        if is_blank(query) {
            return Ok(Vec::new());
        }

        let needle = query.to_lowercase();
        let matches: Vec<NurseAccount> = self
            .repository
            .list_all()
            .await?
            .into_iter()
            .filter(|account| {
                account.nurse.name().to_lowercase().contains(&needle)
                    || account.nurse.surname().to_lowercase().contains(&needle)
                    || account.nurse.user().to_lowercase().contains(&needle)
            })
            .collect();

        tracing::debug!("Search '{}' matched {} nurses", query, matches.len());
        Ok(matches)
    }

    pub async fn authenticate(&self, user: &str, password: &str) -> Result<bool> {
        let request = LoginRequest::new(user, password);
        let accepted = self.repository.login(&request).await?;

        if accepted {
            tracing::info!("✅ Login succeeded for '{}'", user);
        } else {
            tracing::warn!("🔒 Login rejected for '{}'", user);
        }
        Ok(accepted)
    }

    pub async fn register(&self, form: RegistrationForm) -> Result<()> {
        let draft = NurseDraft {
            name: form.name.trim().to_string(),
            surname: form.surname.trim().to_string(),
            email: form.email.trim().to_string(),
            user: form.username.trim().to_string(),
            password: form.password,
            profile: ProfilePicture::preset(form.profile),
        };

        self.check_draft(&draft, None).await?;

        let user = draft.user.clone();
        self.repository.create(draft).await?;
        tracing::info!("✅ Registered nurse '{}'", user);
        Ok(())
    }

    /// 合併後的資料套用與註冊相同的檢查，重複比對時略過自己
    pub async fn update(&self, id: i64, changes: NurseChanges) -> Result<NurseAccount> {
        let current = self.show(id).await?;
        let draft = changes.apply(current.to_draft());
        self.check_draft(&draft, Some(id)).await?;

        let updated = self.repository.update(id, draft).await?;
        tracing::info!("✅ Updated nurse #{}", id);
        Ok(updated)
    }

    async fn check_draft(&self, draft: &NurseDraft, own_id: Option<i64>) -> Result<()> {
        if [
            &draft.name,
            &draft.surname,
            &draft.email,
            &draft.user,
            &draft.password,
        ]
        .iter()
        .any(|field| is_blank(field))
        {
            return Err(HospitalError::validation("all fields are required"));
        }

        validate_email(&draft.email)?;

        let existing = self.repository.list_all().await?;
        let others = || existing.iter().filter(|account| Some(account.id()) != own_id);

        if others().any(|account| same_ignoring_case(&account.email, &draft.email)) {
            tracing::warn!("Nurse rejected: email '{}' in use", draft.email);
            return Err(HospitalError::DuplicateEmail {
                email: draft.email.clone(),
            });
        }
        if others().any(|account| same_ignoring_case(account.nurse.user(), &draft.user)) {
            tracing::warn!("Nurse rejected: username '{}' in use", draft.user);
            return Err(HospitalError::DuplicateUser {
                user: draft.user.clone(),
            });
        }

        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.repository.delete(id).await?;
        tracing::info!("🗑️ Deleted nurse #{}", id);
        Ok(())
    }
}
