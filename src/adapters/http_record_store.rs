use std::collections::HashMap;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use crate::config::constants::duration_secs;
use crate::errors::{HerovaultError, HerovaultResult};
use crate::structs::config::api_config::ApiConfig;
use crate::structs::fix_outcome::FixOutcome;
use crate::structs::hero_record::HeroRecord;
use crate::structs::remediation_target::RemediationTarget;
use crate::traits::record_store::RecordStore;

/// `RecordStore` backed by the tracker's REST API.
pub struct HttpRecordStore {
    client: Client,
    base_url: String,
    token: String,
}

impl HttpRecordStore {

    pub fn new(config: &ApiConfig, token: String) -> HerovaultResult<Self> {
        let client = Client::builder()
            .timeout(duration_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| HerovaultError::system_error("http client setup", &e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn check_status(&self, operation: &str, url: &str, response: Response) -> HerovaultResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let reason = if body.is_empty() {
            status.canonical_reason().unwrap_or("request failed").to_string()
        } else {
            body
        };
        Err(HerovaultError::network_error(operation, Some(url), Some(status.as_u16()), &reason))
    }
}

#[async_trait]
impl RecordStore for HttpRecordStore {

    async fn update_record(&self, key: &str, fields: HashMap<String, Value>) -> HerovaultResult<HeroRecord> {
        let url = self.url(&format!("heroes/{}", key));
        log::debug!("PATCH {} ({} fields)", url, fields.len());

        let response = self.client
            .patch(&url)
            .bearer_auth(&self.token)
            .json(&fields)
            .send()
            .await
            .map_err(|e| HerovaultError::network_error("update record", Some(&url), e.status().map(|s| s.as_u16()), &e.to_string()))?;

        let response = self.check_status("update record", &url, response).await?;
        response.json::<HeroRecord>()
            .await
            .map_err(|e| HerovaultError::network_error("update record", Some(&url), None, &format!("invalid response body: {}", e)))
    }

    async fn apply_fix(&self, action_id: &str) -> HerovaultResult<FixOutcome> {
        let url = self.url(&format!("admin/fixes/{}", action_id));
        log::debug!("POST {}", url);

        let response = self.client
            .post(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| HerovaultError::network_error("apply fix", Some(&url), e.status().map(|s| s.as_u16()), &e.to_string()))?;

        let response = self.check_status("apply fix", &url, response).await?;
        response.json::<FixOutcome>()
            .await
            .map_err(|e| HerovaultError::network_error("apply fix", Some(&url), None, &format!("invalid response body: {}", e)))
    }

    async fn scan_targets(&self) -> HerovaultResult<Vec<RemediationTarget>> {
        let url = self.url("admin/diagnostics");
        log::debug!("GET {}", url);

        let response = self.client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| HerovaultError::network_error("diagnostic scan", Some(&url), e.status().map(|s| s.as_u16()), &e.to_string()))?;

        let response = self.check_status("diagnostic scan", &url, response).await?;
        response.json::<Vec<RemediationTarget>>()
            .await
            .map_err(|e| HerovaultError::network_error("diagnostic scan", Some(&url), None, &format!("invalid response body: {}", e)))
    }
}
