//! OCI Speech REST client.

use super::client::{OciHttpClient, Payload};
use super::{CreateTranscriptionJobDetails, SpeechService, TranscriptionJob};
use crate::error::{Result, TranscribeError};
use async_trait::async_trait;
use reqwest::Method;
use tracing::instrument;
use url::Url;

const API_VERSION: &str = "20220101";

/// Client for `https://speech.aiservice.{region}.oci.oraclecloud.com`.
pub struct SpeechClient {
    client: OciHttpClient,
    endpoint: Url,
}

impl SpeechClient {
    /// Create a client for the regional endpoint.
    pub fn for_region(client: OciHttpClient, region: &str) -> Result<Self> {
        let endpoint = Url::parse(&format!(
            "https://speech.aiservice.{}.oci.oraclecloud.com",
            region
        ))
        .map_err(|e| TranscribeError::Config(format!("invalid region '{}': {}", region, e)))?;
        Ok(Self::with_endpoint(client, endpoint))
    }

    /// Create a client against an explicit endpoint.
    pub fn with_endpoint(client: OciHttpClient, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    fn jobs_url(&self, job_id: Option<&str>) -> Result<Url> {
        jobs_url(&self.endpoint, job_id)
    }
}

fn jobs_url(endpoint: &Url, job_id: Option<&str>) -> Result<Url> {
    let mut url = endpoint.clone();
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| TranscribeError::Config(format!("invalid endpoint: {}", endpoint)))?;
        segments.clear().push(API_VERSION).push("transcriptionJobs");
        if let Some(id) = job_id {
            segments.push(id);
        }
    }
    Ok(url)
}

#[async_trait]
impl SpeechService for SpeechClient {
    #[instrument(skip(self, details), fields(display_name = %details.display_name))]
    async fn create_transcription_job(
        &self,
        details: &CreateTranscriptionJobDetails,
    ) -> Result<TranscriptionJob> {
        let url = self.jobs_url(None)?;
        let body = serde_json::to_vec(details)?;
        let response = self
            .client
            .send(Method::POST, url, Payload::Json(&body))
            .await?;
        Ok(response.json().await?)
    }

    #[instrument(skip(self))]
    async fn get_transcription_job(&self, job_id: &str) -> Result<TranscriptionJob> {
        let url = self.jobs_url(Some(job_id))?;
        let response = self.client.send(Method::GET, url, Payload::Empty).await?;
        Ok(response.json().await?)
    }
}
