//! Client for the external maintenance-prediction service

use std::time::Duration;

use serde_json::{json, Value};
use tracing::debug;

use crate::config::PredictionConfig;
use crate::shared::errors::InfraError;

/// Result of a call that reached the prediction service
#[derive(Debug)]
pub enum PredictionReply {
    /// 2xx with a JSON body (or the raw text wrapped in a string)
    Success(Value),
    /// Non-success status relayed to the caller
    Upstream { status: u16, body: String },
}

pub struct PredictionClient {
    http: reqwest::Client,
    url: String,
}

impl PredictionClient {
    pub fn new(config: &PredictionConfig) -> Result<Self, InfraError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            url: config.url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// POST `{"equipmentId": "<id>"}`. Transport failures are errors; any
    /// HTTP response is a reply.
    pub async fn predict_maintenance(&self, equipment_id: &str) -> Result<PredictionReply, InfraError> {
        debug!(url = %self.url, equipment_id, "Requesting maintenance prediction");
        let response = self
            .http
            .post(&self.url)
            .json(&json!({ "equipmentId": equipment_id }))
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            let value = serde_json::from_str(&text).unwrap_or(Value::String(text));
            Ok(PredictionReply::Success(value))
        } else {
            Ok(PredictionReply::Upstream {
                status: status.as_u16(),
                body: text,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_service_is_a_transport_error() {
        let client = PredictionClient::new(&PredictionConfig {
            url: "http://127.0.0.1:9/predict".into(),
            timeout_secs: 2,
        })
        .unwrap();
        assert!(client.predict_maintenance("42").await.is_err());
    }
}
