//! Wire models for the OCI Speech transcription job API.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a transcription job.
///
/// `Accepted`, `InProgress` and `Canceling` are the submitted phase; only
/// `Succeeded`, `Failed` and `Canceled` end a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobState {
    Accepted,
    InProgress,
    Canceling,
    Succeeded,
    Failed,
    Canceled,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for JobState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            JobState::Accepted => "ACCEPTED",
            JobState::InProgress => "IN_PROGRESS",
            JobState::Canceling => "CANCELING",
            JobState::Succeeded => "SUCCEEDED",
            JobState::Failed => "FAILED",
            JobState::Canceled => "CANCELED",
            JobState::Unknown => "UNKNOWN",
        };
        write!(f, "{}", s)
    }
}

/// Location of one or more objects in a bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectLocation {
    pub namespace_name: String,
    pub bucket_name: String,
    pub object_names: Vec<String>,
}

/// Job input: an inline list of object locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "locationType", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InputLocation {
    #[serde(rename_all = "camelCase")]
    ObjectListInlineInputLocation {
        object_locations: Vec<ObjectLocation>,
    },
}

/// Where the service writes result fragments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputLocation {
    pub namespace_name: String,
    pub bucket_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

/// Model selection for a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDetails {
    pub domain: String,
    pub language_code: String,
}

/// Request body for `POST /transcriptionJobs`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTranscriptionJobDetails {
    pub compartment_id: String,
    pub display_name: String,
    pub input_location: InputLocation,
    pub output_location: OutputLocation,
    pub model_details: ModelDetails,
}

/// A transcription job snapshot as reported by the service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptionJob {
    pub id: String,
    pub lifecycle_state: JobState,
    #[serde(default)]
    pub lifecycle_details: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub output_location: Option<OutputLocation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_details_wire_format() {
        let details = CreateTranscriptionJobDetails {
            compartment_id: "ocid1.compartment.oc1..c".to_string(),
            display_name: "Transcription_20240101_120000".to_string(),
            input_location: InputLocation::ObjectListInlineInputLocation {
                object_locations: vec![ObjectLocation {
                    namespace_name: "ns".to_string(),
                    bucket_name: "bucket".to_string(),
                    object_names: vec!["clip.wav".to_string()],
                }],
            },
            output_location: OutputLocation {
                namespace_name: "ns".to_string(),
                bucket_name: "bucket".to_string(),
                prefix: Some("transcription_output/".to_string()),
            },
            model_details: ModelDetails {
                domain: "GENERIC".to_string(),
                language_code: "en-US".to_string(),
            },
        };

        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(
            json["inputLocation"]["locationType"],
            "OBJECT_LIST_INLINE_INPUT_LOCATION"
        );
        assert_eq!(
            json["inputLocation"]["objectLocations"][0]["objectNames"][0],
            "clip.wav"
        );
        assert_eq!(json["outputLocation"]["prefix"], "transcription_output/");
        assert_eq!(json["modelDetails"]["languageCode"], "en-US");
        assert_eq!(json["compartmentId"], "ocid1.compartment.oc1..c");
    }

    #[test]
    fn test_job_parsing_tolerates_unknown_state() {
        let job: TranscriptionJob = serde_json::from_str(
            r#"{"id":"ocid1.job.oc1.iad.abc","lifecycleState":"PAUSED","extra":1}"#,
        )
        .unwrap();
        assert_eq!(job.lifecycle_state, JobState::Unknown);
        assert!(job.lifecycle_details.is_none());
    }
}
