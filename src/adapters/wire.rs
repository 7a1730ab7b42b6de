use crate::core::{Nurse, NurseAccount, NurseDraft, ProfilePicture};
use serde::{Deserialize, Serialize};

/// 後端 `nurse/` API 使用的 JSON 格式
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NurseDto {
    pub id: Option<i64>,
    pub name: String,
    pub surname: String,
    #[serde(default)]
    pub email: String,
    pub user: String,
    pub password: String,
    #[serde(default, with = "profile_base64")]
    pub profile: Option<Vec<u8>>,
}

impl NurseDto {
    pub fn from_draft(draft: NurseDraft, id: Option<i64>) -> Self {
        Self {
            id,
            name: draft.name,
            surname: draft.surname,
            email: draft.email,
            user: draft.user,
            password: draft.password,
            profile: Some(draft.profile.to_bytes()),
        }
    }

    /// 伺服器沒給 id 時以 0 代替
    pub fn into_account(self) -> NurseAccount {
        NurseAccount::new(
            Nurse::new(
                self.id.unwrap_or_default(),
                self.name,
                self.surname,
                self.user,
                self.password,
            ),
            self.email,
            self.profile
                .map(ProfilePicture::from_bytes)
                .unwrap_or_default(),
        )
    }
}

mod profile_base64 {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(bytes) => serializer.serialize_str(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded: Option<String> = Option::deserialize(deserializer)?;
        encoded
            .map(|text| {
                STANDARD
                    .decode(text)
                    .map_err(<D::Error as serde::de::Error>::custom)
            })
            .transpose()
    }
}
