//! OCI service access.
//!
//! Object Storage and Speech are reached through their REST APIs with signed
//! requests. The rest of the crate only sees the [`ObjectStore`] and
//! [`SpeechService`] traits, so every pipeline stage can run against fakes.

mod client;
mod models;
mod object_storage;
mod signer;
mod speech;

pub use client::{create_http_client, OciHttpClient, ServiceError};
pub use models::{
    CreateTranscriptionJobDetails, InputLocation, JobState, ModelDetails, ObjectLocation,
    OutputLocation, TranscriptionJob,
};
pub use object_storage::ObjectStorageClient;
pub use signer::RequestSigner;
pub use speech::SpeechClient;

use crate::error::Result;
use async_trait::async_trait;

/// Object Storage operations used by the pipeline.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch the tenancy's Object Storage namespace.
    async fn namespace(&self) -> Result<String>;

    /// Upload a single object in one request.
    async fn put_object(
        &self,
        namespace: &str,
        bucket: &str,
        object_name: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<()>;

    /// List object names under a prefix, in the order the service returns them.
    async fn list_objects(&self, namespace: &str, bucket: &str, prefix: &str)
        -> Result<Vec<String>>;

    /// Download an object's contents.
    async fn get_object(&self, namespace: &str, bucket: &str, object_name: &str)
        -> Result<Vec<u8>>;
}

/// Speech service operations used by the pipeline.
#[async_trait]
pub trait SpeechService: Send + Sync {
    /// Submit a transcription job.
    async fn create_transcription_job(
        &self,
        details: &CreateTranscriptionJobDetails,
    ) -> Result<TranscriptionJob>;

    /// Fetch a job's current snapshot.
    async fn get_transcription_job(&self, job_id: &str) -> Result<TranscriptionJob>;
}
