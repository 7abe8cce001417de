//! reqwest-based RoutineService implementation.

use crate::dto::{ApiEnvelope, RecordRequestDto, RoutineListDto, UpdateRoutineDto};
use anyhow::Context;
use async_trait::async_trait;
use liftlog_core::LiftlogError;
use liftlog_core::config::LiftlogConfig;
use liftlog_core::error::Result;
use liftlog_core::routine::{RoutineService, RoutineTemplate};
use liftlog_core::session::Session;
use serde_json::Value;
use std::time::Duration;

/// Shown to the user when a routine cannot be loaded and the backend gave no reason.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load routine information.";
const RECORD_FAILED_MESSAGE: &str = "Failed to record the workout.";
const UPDATE_FAILED_MESSAGE: &str = "Failed to update the routine.";

/// Routine backend reached over HTTP.
pub struct HttpRoutineService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRoutineService {
    /// Creates a client for `base_url` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn from_config(config: &LiftlogConfig) -> anyhow::Result<Self> {
        Self::new(
            config.api_base_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    fn routine_path(routine_id: &str, member_id: Option<&str>) -> String {
        match member_id {
            Some(member_id) => format!("routine/trainer/{}/{}", routine_id, member_id),
            None => format!("routine/{}", routine_id),
        }
    }

    async fn send_ack(&self, request: reqwest::RequestBuilder, fallback: &str) -> Result<()> {
        let response = request.send().await.map_err(|e| {
            tracing::error!("[HttpRoutineService] Request failed: {}", e);
            LiftlogError::remote(fallback)
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LiftlogError::remote(format!("{} (HTTP {})", fallback, status)));
        }

        let envelope: ApiEnvelope<Value> = response
            .json()
            .await
            .map_err(|e| LiftlogError::remote(format!("{}: {}", fallback, e)))?;
        envelope.into_ack(fallback).map_err(LiftlogError::Remote)
    }
}

#[async_trait]
impl RoutineService for HttpRoutineService {
    async fn fetch_routine(
        &self,
        routine_id: &str,
        member_id: Option<&str>,
    ) -> Result<RoutineTemplate> {
        let url = self.url(&Self::routine_path(routine_id, member_id));
        tracing::debug!("[HttpRoutineService] GET {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::error!("[HttpRoutineService] GET {} failed: {}", url, e);
            LiftlogError::load_failed(LOAD_FAILED_MESSAGE)
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("[HttpRoutineService] GET {} returned {}", url, status);
            return Err(LiftlogError::load_failed(LOAD_FAILED_MESSAGE));
        }

        let envelope: ApiEnvelope<RoutineListDto> = response.json().await.map_err(|e| {
            tracing::error!("[HttpRoutineService] Unreadable routine body: {}", e);
            LiftlogError::load_failed(LOAD_FAILED_MESSAGE)
        })?;

        let routine = envelope
            .into_payload(LOAD_FAILED_MESSAGE)
            .map_err(LiftlogError::load_failed)?;
        Ok(routine.into_domain(routine_id))
    }

    async fn record_session(&self, session: &Session) -> Result<()> {
        let body = RecordRequestDto::from_domain(session);
        let request = self.client.post(self.url("routine/record")).json(&body);
        self.send_ack(request, RECORD_FAILED_MESSAGE).await
    }

    async fn update_routine(&self, session: &Session) -> Result<()> {
        let body = UpdateRoutineDto::from_domain(session)?;
        let path = format!("routine/update/{}", body.routine_list_idx);
        let request = self.client.put(self.url(&path)).json(&body);
        self.send_ack(request, UPDATE_FAILED_MESSAGE).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routine_paths() {
        assert_eq!(HttpRoutineService::routine_path("12", None), "routine/12");
        assert_eq!(
            HttpRoutineService::routine_path("12", Some("204")),
            "routine/trainer/12/204"
        );
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let service =
            HttpRoutineService::new("http://localhost:8080/", Duration::from_secs(1)).unwrap();
        assert_eq!(service.url("routine/12"), "http://localhost:8080/routine/12");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_a_load_failure() {
        // Nothing listens on the discard port of the loopback interface
        let service =
            HttpRoutineService::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();

        let err = service.fetch_routine("12", None).await.unwrap_err();

        assert!(err.is_load_failed());
        assert_eq!(err, LiftlogError::load_failed(LOAD_FAILED_MESSAGE));
    }
}
