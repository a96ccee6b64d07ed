//! Collecting transcript fragments written by a finished job.

use super::OUTPUT_PREFIX;
use crate::config::RunConfig;
use crate::error::{Result, TranscribeError};
use crate::oci::ObjectStore;
use serde::Deserialize;
use tracing::{info, instrument, warn};

/// One result file written by the Speech service.
#[derive(Debug, Deserialize)]
struct ResultDocument {
    #[serde(default)]
    transcriptions: Vec<ResultEntry>,
}

#[derive(Debug, Deserialize)]
struct ResultEntry {
    #[serde(default)]
    transcription: Option<String>,
}

/// Prefix under which a job's output lands: `transcription_output/job-{suffix}`.
///
/// `suffix` is the last `.`-separated part of the job id. This mirrors how the
/// service names its output folder today; if the id format changes, lookups
/// find nothing rather than failing.
pub fn output_prefix_for(job_id: &str) -> String {
    let suffix = job_id.rsplit('.').next().unwrap_or(job_id);
    format!("{}job-{}", OUTPUT_PREFIX, suffix)
}

/// Extract transcript texts from one JSON result file, in order.
pub fn parse_fragments(bytes: &[u8]) -> Result<Vec<String>> {
    let doc: ResultDocument = serde_json::from_slice(bytes)?;
    Ok(doc
        .transcriptions
        .into_iter()
        .filter_map(|t| t.transcription)
        .collect())
}

/// Download every `.json` result for `job_id` and join the texts with newlines.
///
/// Fragments keep the order the listing returned them in. Finding no result
/// files yields an empty string.
#[instrument(skip(store, config))]
pub async fn collect_transcript(
    store: &dyn ObjectStore,
    config: &RunConfig,
    job_id: &str,
) -> Result<String> {
    let prefix = output_prefix_for(job_id);
    info!("Looking for results in: {}", prefix);

    let names = store
        .list_objects(&config.namespace, &config.bucket, &prefix)
        .await
        .map_err(|e| TranscribeError::ResultFetchFailed(format!("listing {}: {}", prefix, e)))?;

    let mut fragments = Vec::new();
    for name in names.iter().filter(|n| n.ends_with(".json")) {
        info!("Found result file: {}", name);
        let bytes = store
            .get_object(&config.namespace, &config.bucket, name)
            .await
            .map_err(|e| TranscribeError::ResultFetchFailed(format!("downloading {}: {}", name, e)))?;
        let texts = parse_fragments(&bytes)
            .map_err(|e| TranscribeError::ResultFetchFailed(format!("parsing {}: {}", name, e)))?;
        fragments.extend(texts);
    }

    if fragments.is_empty() {
        warn!("No transcription text found under {}", prefix);
    }

    Ok(fragments.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{run_config, FakeObjectStore, TEST_JOB_ID};

    #[test]
    fn test_prefix_uses_last_dot_segment() {
        assert_eq!(
            output_prefix_for("ocid1.aispeechtranscriptionjob.oc1.iad.amaaaaaaxyz"),
            "transcription_output/job-amaaaaaaxyz"
        );
        assert_eq!(output_prefix_for("plainid"), "transcription_output/job-plainid");
    }

    #[test]
    fn test_parse_skips_entries_without_text() {
        let texts = parse_fragments(
            br#"{"status":"SUCCESS","transcriptions":[{"transcription":"a"},{"confidence":"0.9"},{"transcription":"b"}]}"#,
        )
        .unwrap();
        assert_eq!(texts, vec!["a", "b"]);
        assert!(parse_fragments(br#"{"audioFormatDetails":{}}"#).unwrap().is_empty());
        assert!(parse_fragments(b"not json").is_err());
    }

    #[tokio::test]
    async fn test_fragments_joined_in_listing_order() {
        let prefix = output_prefix_for(TEST_JOB_ID);
        // Deliberately unsorted: listing order wins.
        let store = FakeObjectStore::default()
            .with_object(
                &format!("{}/testns_speech-audio-bucket_z.json", prefix),
                br#"{"transcriptions":[{"transcription":"hello"}]}"#,
            )
            .with_object(&format!("{}/readme.txt", prefix), b"ignored")
            .with_object(
                &format!("{}/testns_speech-audio-bucket_a.json", prefix),
                br#"{"transcriptions":[{"transcription":"world"}]}"#,
            )
            .with_object(
                "transcription_output/job-other/x.json",
                br#"{"transcriptions":[{"transcription":"nope"}]}"#,
            );

        let text = collect_transcript(&store, &run_config(), TEST_JOB_ID).await.unwrap();
        assert_eq!(text, "hello\nworld");
    }

    #[tokio::test]
    async fn test_single_file_with_two_entries() {
        let prefix = output_prefix_for(TEST_JOB_ID);
        let store = FakeObjectStore::default().with_object(
            &format!("{}/out.json", prefix),
            br#"{"transcriptions":[{"transcription":"hello"},{"transcription":"world"}]}"#,
        );
        let text = collect_transcript(&store, &run_config(), TEST_JOB_ID).await.unwrap();
        assert_eq!(text, "hello\nworld");
    }

    #[tokio::test]
    async fn test_no_results_is_empty_text() {
        let store = FakeObjectStore::default();
        let text = collect_transcript(&store, &run_config(), TEST_JOB_ID).await.unwrap();
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn test_malformed_result_is_an_error() {
        let prefix = output_prefix_for(TEST_JOB_ID);
        let store = FakeObjectStore::default().with_object(&format!("{}/bad.json", prefix), b"{");
        let err = collect_transcript(&store, &run_config(), TEST_JOB_ID).await.unwrap_err();
        assert!(matches!(err, TranscribeError::ResultFetchFailed(_)));
    }
}
