//! Object Storage REST client.

use super::client::{OciHttpClient, Payload};
use super::ObjectStore;
use crate::error::{Result, TranscribeError};
use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

/// Client for `https://objectstorage.{region}.oraclecloud.com`.
pub struct ObjectStorageClient {
    client: OciHttpClient,
    endpoint: Url,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListObjects {
    #[serde(default)]
    objects: Vec<ObjectSummary>,
    #[serde(default)]
    next_start_with: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ObjectSummary {
    name: String,
}

impl ObjectStorageClient {
    /// Create a client for the regional endpoint.
    pub fn for_region(client: OciHttpClient, region: &str) -> Result<Self> {
        let endpoint = Url::parse(&format!("https://objectstorage.{}.oraclecloud.com", region))
            .map_err(|e| TranscribeError::Config(format!("invalid region '{}': {}", region, e)))?;
        Ok(Self::with_endpoint(client, endpoint))
    }

    /// Create a client against an explicit endpoint.
    pub fn with_endpoint(client: OciHttpClient, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    /// Build `/n/{namespace}/...` with each segment percent-encoded.
    fn url(&self, segments: &[&str]) -> Result<Url> {
        build_url(&self.endpoint, segments)
    }
}

fn build_url(endpoint: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = endpoint.clone();
    url.path_segments_mut()
        .map_err(|_| TranscribeError::Config(format!("invalid endpoint: {}", endpoint)))?
        .clear()
        .extend(segments);
    Ok(url)
}

#[async_trait]
impl ObjectStore for ObjectStorageClient {
    #[instrument(skip(self))]
    async fn namespace(&self) -> Result<String> {
        // Trailing empty segment keeps the slash in `/n/`.
        let url = self.url(&["n", ""])?;
        let response = self.client.send(Method::GET, url, Payload::Empty).await?;
        let namespace: String = response.json().await?;
        Ok(namespace)
    }

    #[instrument(skip(self, body), fields(bytes = body.len()))]
    async fn put_object(
        &self,
        namespace: &str,
        bucket: &str,
        object_name: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        let url = self.url(&["n", namespace, "b", bucket, "o", object_name])?;
        self.client
            .send(
                Method::PUT,
                url,
                Payload::Unsigned {
                    bytes: body,
                    content_type,
                },
            )
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_objects(
        &self,
        namespace: &str,
        bucket: &str,
        prefix: &str,
    ) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut start: Option<String> = None;

        loop {
            let mut url = self.url(&["n", namespace, "b", bucket, "o"])?;
            {
                let mut query = url.query_pairs_mut();
                query.append_pair("prefix", prefix);
                if let Some(start) = &start {
                    query.append_pair("start", start);
                }
            }

            let response = self.client.send(Method::GET, url, Payload::Empty).await?;
            let page: ListObjects = response.json().await?;
            debug!("Listed {} objects", page.objects.len());
            names.extend(page.objects.into_iter().map(|o| o.name));

            match page.next_start_with {
                Some(next) if !next.is_empty() => start = Some(next),
                _ => break,
            }
        }

        Ok(names)
    }

    #[instrument(skip(self))]
    async fn get_object(
        &self,
        namespace: &str,
        bucket: &str,
        object_name: &str,
    ) -> Result<Vec<u8>> {
        let url = self.url(&["n", namespace, "b", bucket, "o", object_name])?;
        let response = self.client.send(Method::GET, url, Payload::Empty).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint() -> Url {
        Url::parse("https://objectstorage.us-phoenix-1.oraclecloud.com").unwrap()
    }

    #[test]
    fn test_namespace_url_keeps_trailing_slash() {
        let url = build_url(&endpoint(), &["n", ""]).unwrap();
        assert_eq!(url.as_str(), "https://objectstorage.us-phoenix-1.oraclecloud.com/n/");
    }

    #[test]
    fn test_object_names_are_percent_encoded() {
        let url = build_url(
            &endpoint(),
            &["n", "ns", "b", "speech-audio-bucket", "o", "New Recording.m4a"],
        )
        .unwrap();
        assert_eq!(url.path(), "/n/ns/b/speech-audio-bucket/o/New%20Recording.m4a");

        let url = build_url(&endpoint(), &["n", "ns", "b", "b", "o", "transcription_output/job-x/a.json"]).unwrap();
        assert_eq!(url.path(), "/n/ns/b/b/o/transcription_output%2Fjob-x%2Fa.json");
    }

    #[test]
    fn test_list_page_parsing() {
        let page: ListObjects = serde_json::from_str(
            r#"{"objects":[{"name":"a.json","size":10},{"name":"b.json"}],"nextStartWith":"c.json"}"#,
        )
        .unwrap();
        assert_eq!(page.objects.len(), 2);
        assert_eq!(page.objects[1].name, "b.json");
        assert_eq!(page.next_start_with.as_deref(), Some("c.json"));

        let last: ListObjects = serde_json::from_str(r#"{"objects":[]}"#).unwrap();
        assert!(last.next_start_with.is_none());
    }
}
