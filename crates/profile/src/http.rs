use std::time::Duration;

use async_trait::async_trait;
use campus_config::ProfileServiceConfig;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::service::{ProfileError, ProfileKind, ProfileRecord, ProfileService};

/// [`ProfileService`] talking to the platform's REST profile endpoints.
#[derive(Debug, Clone)]
pub struct HttpProfileService {
    client: Client,
    base_url: String,
    college_path: String,
    student_path: String,
    jobseeker_path: String,
}

impl HttpProfileService {
    pub fn new(config: &ProfileServiceConfig) -> Result<Self, ProfileError> {
        let mut builder = Client::builder().user_agent("campus-access");
        if let Some(seconds) = config.request_timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            college_path: config.college_path.clone(),
            student_path: config.student_path.clone(),
            jobseeker_path: config.jobseeker_path.clone(),
        })
    }

    pub fn url_for(&self, kind: ProfileKind) -> String {
        let path = match kind {
            ProfileKind::College => &self.college_path,
            ProfileKind::Student => &self.student_path,
            ProfileKind::JobSeeker => &self.jobseeker_path,
        };
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl ProfileService for HttpProfileService {
    async fn fetch_profile(
        &self,
        kind: ProfileKind,
        token: &str,
    ) -> Result<Option<ProfileRecord>, ProfileError> {
        let url = self.url_for(kind);

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!(%url, ?kind, "profile not found");
            return Ok(None);
        }

        let body = response.error_for_status()?.bytes().await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            debug!(%url, ?kind, "empty profile response");
            return Ok(None);
        }

        let value: Value = serde_json::from_slice(&body)?;
        ProfileRecord::from_value(value)
    }
}
