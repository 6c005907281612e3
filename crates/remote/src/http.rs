use std::env;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};
use serde::Serialize;

use study_core::model::{SetId, UserId};

use crate::api::{ProviderError, RewardError, RewardService, StudySetProvider, StudySetRecord};

/// Connection settings for the study API.
#[derive(Clone, Debug)]
pub struct RemoteConfig {
    pub base_url: String,
}

impl RemoteConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Reads `STUDY_API_URL`; returns `None` when unset or blank.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let base_url = env::var("STUDY_API_URL").ok()?;
        if base_url.trim().is_empty() {
            return None;
        }
        Some(Self::new(base_url))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }
}

//
// ─── STUDY SET PROVIDER ────────────────────────────────────────────────────────
//

/// `StudySetProvider` backed by the remote study API.
#[derive(Clone)]
pub struct HttpStudySetProvider {
    client: Client,
    config: RemoteConfig,
}

impl HttpStudySetProvider {
    #[must_use]
    pub fn new(config: RemoteConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl StudySetProvider for HttpStudySetProvider {
    async fn fetch(&self, set_id: &SetId) -> Result<StudySetRecord, ProviderError> {
        let url = self.config.endpoint(&format!("/study-set/{}", set_id.as_str()));
        debug!("fetching study set {set_id} from {url}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| ProviderError::Network(err.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ProviderError::NotFound);
        }
        if !response.status().is_success() {
            return Err(ProviderError::Network(format!(
                "unexpected status {}",
                response.status()
            )));
        }

        response
            .json::<StudySetRecord>()
            .await
            .map_err(|err| ProviderError::Decode(err.to_string()))
    }
}

//
// ─── REWARD SERVICE ────────────────────────────────────────────────────────────
//

#[derive(Debug, Serialize)]
struct AwardRequest<'a> {
    user_id: &'a str,
    points: u32,
}

/// `RewardService` posting point credits to the study API.
#[derive(Clone)]
pub struct HttpRewardService {
    client: Client,
    config: RemoteConfig,
}

impl HttpRewardService {
    #[must_use]
    pub fn new(config: RemoteConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl RewardService for HttpRewardService {
    async fn award(&self, user_id: &UserId, points: u32) -> Result<(), RewardError> {
        let url = self.config.endpoint("/award-cr");
        let payload = AwardRequest {
            user_id: user_id.as_str(),
            points,
        };

        let response = self
            .client
            .post(url)
            .json(&payload)
            .send()
            .await
            .map_err(|err| RewardError::Network(err.to_string()))?;

        if !response.status().is_success() {
            return Err(RewardError::Rejected(response.status().as_u16()));
        }

        debug!("awarded {points} points to {user_id}");
        Ok(())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let config = RemoteConfig::new("https://api.example.com/");
        assert_eq!(
            config.endpoint("/study-set/abc"),
            "https://api.example.com/study-set/abc"
        );

        let config = RemoteConfig::new("https://api.example.com");
        assert_eq!(config.endpoint("/award-cr"), "https://api.example.com/award-cr");
    }

    #[test]
    fn award_request_serializes_wire_shape() {
        let payload = AwardRequest {
            user_id: "user-1",
            points: 20,
        };
        let body = serde_json::to_value(&payload).unwrap();
        assert_eq!(body, serde_json::json!({"user_id": "user-1", "points": 20}));
    }
}
