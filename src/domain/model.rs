use serde::{Deserialize, Serialize};
use std::fmt;

/// 護理師實體：五個欄位在建構時一次給定，之後不可變更。
///
/// 實體本身不做任何檢查：空字串、0 或負數 id 都照單全收。
/// 密碼以明文保存並原樣回傳，正式環境不應以這種方式保存憑證。
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Nurse {
    id: i64,
    name: String,
    surname: String,
    user: String,
    password: String,
}

impl Nurse {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        surname: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            surname: surname.into(),
            user: user.into(),
            password: password.into(),
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn surname(&self) -> &str {
        &self.surname
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

// 密碼不進日誌
impl fmt::Debug for Nurse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Nurse")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("surname", &self.surname)
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

/// Number of built-in avatars a preset profile index can point at.
pub const PRESET_AVATARS: u8 = 6;

#[derive(Clone, PartialEq, Eq)]
pub enum ProfilePicture {
    Preset(u8),
    Image(Vec<u8>),
}

impl ProfilePicture {
    /// 超出範圍的索引退回第一張預設頭像
    pub fn preset(index: u8) -> Self {
        if index < PRESET_AVATARS {
            ProfilePicture::Preset(index)
        } else {
            ProfilePicture::Preset(0)
        }
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        match bytes.len() {
            0 => ProfilePicture::Preset(0),
            1 => ProfilePicture::preset(bytes[0]),
            _ => ProfilePicture::Image(bytes),
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            ProfilePicture::Preset(index) => vec![*index],
            ProfilePicture::Image(bytes) => bytes.clone(),
        }
    }
}

impl Default for ProfilePicture {
    fn default() -> Self {
        ProfilePicture::Preset(0)
    }
}

impl fmt::Debug for ProfilePicture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfilePicture::Preset(index) => write!(f, "Preset({})", index),
            ProfilePicture::Image(bytes) => write!(f, "Image({} bytes)", bytes.len()),
        }
    }
}

impl fmt::Display for ProfilePicture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfilePicture::Preset(index) => write!(f, "avatar {}", index),
            ProfilePicture::Image(bytes) => write!(f, "image ({} bytes)", bytes.len()),
        }
    }
}

/// A stored nurse together with the contact and profile data kept next to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NurseAccount {
    pub nurse: Nurse,
    pub email: String,
    pub profile: ProfilePicture,
}

impl NurseAccount {
    pub fn new(nurse: Nurse, email: impl Into<String>, profile: ProfilePicture) -> Self {
        Self {
            nurse,
            email: email.into(),
            profile,
        }
    }

    pub fn id(&self) -> i64 {
        self.nurse.id()
    }

    pub fn to_draft(&self) -> NurseDraft {
        NurseDraft {
            name: self.nurse.name().to_string(),
            surname: self.nurse.surname().to_string(),
            email: self.email.clone(),
            user: self.nurse.user().to_string(),
            password: self.nurse.password().to_string(),
            profile: self.profile.clone(),
        }
    }
}

impl fmt::Display for NurseAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} ({}) {}",
            self.nurse.id(),
            self.nurse.name(),
            self.nurse.surname(),
            self.nurse.user(),
            self.email
        )
    }
}

/// 尚未分配 id 的護理師資料（註冊與更新時送出）
#[derive(Clone, PartialEq, Eq)]
pub struct NurseDraft {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub user: String,
    pub password: String,
    pub profile: ProfilePicture,
}

impl NurseDraft {
    pub fn into_account(self, id: i64) -> NurseAccount {
        NurseAccount {
            nurse: Nurse::new(id, self.name, self.surname, self.user, self.password),
            email: self.email,
            profile: self.profile,
        }
    }
}

impl fmt::Debug for NurseDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NurseDraft")
            .field("name", &self.name)
            .field("surname", &self.surname)
            .field("email", &self.email)
            .field("user", &self.user)
            .field("profile", &self.profile)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub user: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_return_constructor_values() {
        let nurse = Nurse::new(1, "Jane", "Doe", "jdoe", "secret123");
        assert_eq!(nurse.id(), 1);
        assert_eq!(nurse.name(), "Jane");
        assert_eq!(nurse.surname(), "Doe");
        assert_eq!(nurse.user(), "jdoe");
        assert_eq!(nurse.password(), "secret123");
    }

    #[test]
    fn test_empty_and_zero_values_are_accepted() {
        let nurse = Nurse::new(0, "", "", "", "");
        assert_eq!(nurse.id(), 0);
        assert_eq!(nurse.name(), "");
        assert_eq!(nurse.surname(), "");
        assert_eq!(nurse.user(), "");
        assert_eq!(nurse.password(), "");
    }

    #[test]
    fn test_negative_id_is_accepted() {
        let nurse = Nurse::new(-5, "A", "B", "c", "d");
        assert_eq!(nurse.id(), -5);
    }

    #[test]
    fn test_values_are_kept_verbatim() {
        let nurse = Nurse::new(7, "  Fiona ", "García", "FIONA.g", " pa ss ");
        assert_eq!(nurse.name(), "  Fiona ");
        assert_eq!(nurse.surname(), "García");
        assert_eq!(nurse.user(), "FIONA.g");
        assert_eq!(nurse.password(), " pa ss ");
    }

    #[test]
    fn test_identical_inputs_build_equal_independent_values() {
        let first = Nurse::new(3, "Bob", "Smith", "bob.s", "abc123");
        let second = Nurse::new(3, "Bob", "Smith", "bob.s", "abc123");
        assert_eq!(first, second);
        assert!(!std::ptr::eq(&first, &second));
        assert!(!std::ptr::eq(first.name(), second.name()));
    }

    #[test]
    fn test_debug_hides_password() {
        let nurse = Nurse::new(1, "Jane", "Doe", "jdoe", "secret123");
        let rendered = format!("{:?}", nurse);
        assert!(rendered.contains("jdoe"));
        assert!(!rendered.contains("secret123"));

        let request = LoginRequest::new("jdoe", "secret123");
        assert!(!format!("{:?}", request).contains("secret123"));
    }

    #[test]
    fn test_profile_picture_from_bytes() {
        assert_eq!(ProfilePicture::from_bytes(vec![]), ProfilePicture::Preset(0));
        assert_eq!(ProfilePicture::from_bytes(vec![4]), ProfilePicture::Preset(4));
        assert_eq!(ProfilePicture::from_bytes(vec![9]), ProfilePicture::Preset(0));
        assert_eq!(
            ProfilePicture::from_bytes(vec![0x89, 0x50, 0x4e]),
            ProfilePicture::Image(vec![0x89, 0x50, 0x4e])
        );
        assert_eq!(ProfilePicture::Preset(2).to_bytes(), vec![2]);
    }

    #[test]
    fn test_account_display_and_draft() {
        let account = NurseAccount::new(
            Nurse::new(2, "Alina", "Kovacs", "alina.k", "qwerty"),
            "alina.kovacs@fatfox.com",
            ProfilePicture::Preset(1),
        );
        assert_eq!(
            account.to_string(),
            "#2 Alina Kovacs (alina.k) alina.kovacs@fatfox.com"
        );
        assert_eq!(account.to_draft().into_account(2), account);
    }
}
