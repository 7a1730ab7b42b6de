use crate::adapters::wire::NurseDto;
use crate::core::{LoginRequest, NurseAccount, NurseDraft, NurseRepository};
use crate::utils::error::{HospitalError, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use std::time::Duration;
use url::Url;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// 透過醫院後端的 REST API 存取護理師資料
#[derive(Debug, Clone)]
pub struct RestRepository {
    base_url: Url,
    client: Client,
    timeout: Duration,
}

impl RestRepository {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(HospitalError::InvalidConfigValueError {
                field: "backend.base_url".to_string(),
                value: base_url.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            });
        }
        // 確保結尾有斜線，路徑才會接在後面
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            base_url,
            client: Client::new(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("nurse").extend(segments);
        }
        url
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.timeout(self.timeout).send().await?;
        tracing::debug!("API response status: {}", response.status());
        Ok(response)
    }

    async fn fetch_optional(&self, url: Url) -> Result<Option<NurseAccount>> {
        tracing::debug!("Making API request to: {}", url);
        let response = self.send(self.client.get(url)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body = error_for_status(response).await?.text().await?;
        parse_optional_nurse(&body)
    }
}

async fn error_for_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = match response.text().await {
        Ok(text) => text,
        Err(e) => {
            tracing::debug!("Could not read error body for status {}: {}", status, e);
            String::new()
        }
    };
    tracing::error!("API error {}: {}", status, message);
    Err(HospitalError::ApiStatus {
        status: status.as_u16(),
        message,
    })
}

// 後端查無資料時可能回 200 加空內容或 null
fn parse_optional_nurse(body: &str) -> Result<Option<NurseAccount>> {
    let body = body.trim();
    if body.is_empty() || body == "null" {
        return Ok(None);
    }
    let dto: NurseDto = serde_json::from_str(body)?;
    Ok(Some(dto.into_account()))
}

#[async_trait]
impl NurseRepository for RestRepository {
    async fn list_all(&self) -> Result<Vec<NurseAccount>> {
        let url = self.endpoint(&["index"]);
        tracing::debug!("Making API request to: {}", url);

        let response = error_for_status(self.send(self.client.get(url)).await?).await?;
        let nurses: Vec<NurseDto> = response.json().await?;
        Ok(nurses.into_iter().map(NurseDto::into_account).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<NurseAccount>> {
        self.fetch_optional(self.endpoint(&[&id.to_string()])).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<NurseAccount>> {
        self.fetch_optional(self.endpoint(&["name", name])).await
    }

    async fn find_by_user(&self, user: &str) -> Result<Option<NurseAccount>> {
        self.fetch_optional(self.endpoint(&["user", user])).await
    }

    async fn create(&self, draft: NurseDraft) -> Result<()> {
        let url = self.endpoint(&["new"]);
        tracing::debug!("Registering nurse '{}' at {}", draft.user, url);

        let body = NurseDto::from_draft(draft, None);
        error_for_status(self.send(self.client.post(url).json(&body)).await?).await?;
        Ok(())
    }

    async fn update(&self, id: i64, draft: NurseDraft) -> Result<NurseAccount> {
        let url = self.endpoint(&[&id.to_string()]);
        let body = NurseDto::from_draft(draft.clone(), Some(id));

        let response = self.send(self.client.put(url).json(&body)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(HospitalError::not_found(id));
        }

        let text = error_for_status(response).await?.text().await?;
        Ok(parse_optional_nurse(&text)?.unwrap_or_else(|| draft.into_account(id)))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let url = self.endpoint(&[&id.to_string()]);
        let response = self.send(self.client.delete(url)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(HospitalError::not_found(id));
        }

        error_for_status(response).await?;
        Ok(())
    }

    async fn login(&self, request: &LoginRequest) -> Result<bool> {
        let url = self.endpoint(&["login"]);
        tracing::debug!("Authenticating '{}' at {}", request.user, url);

        let response = error_for_status(self.send(self.client.post(url).json(request)).await?).await?;
        Ok(response.json::<bool>().await?)
    }
}
