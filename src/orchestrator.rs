//! Submit / poll / download orchestration against the Veo API.
//!
//! One call walks a fixed pipeline: validate the request, encode the seed
//! image, submit the generation job, poll the long-running operation until
//! it is done, then download the referenced video. Every suspension point
//! (timers and HTTP round-trips) races the caller's cancellation token.

use crate::error::{ReelGenError, Result};
use crate::media::{VideoHandle, VideoMetadata};
use crate::progress::{Progress, ProgressSender};
use crate::types::{ImageInput, VideoModel, VideoRequest};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Inline payload cap for seed images.
const DEFAULT_MAX_IMAGE_BYTES: usize = 20 * 1024 * 1024;

/// Builder for [`Orchestrator`].
#[derive(Debug, Clone)]
pub struct OrchestratorBuilder {
    api_key: Option<String>,
    model: VideoModel,
    poll_interval: Duration,
    max_wait: Duration,
    max_image_bytes: usize,
    base_url: String,
}

impl Default for OrchestratorBuilder {
    fn default() -> Self {
        Self {
            api_key: None,
            model: VideoModel::default(),
            poll_interval: Duration::from_secs(10),
            max_wait: Duration::from_secs(600), // 10 minutes for video
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl OrchestratorBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key. Falls back to `GOOGLE_API_KEY` env var.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the Veo model variant.
    pub fn model(mut self, model: VideoModel) -> Self {
        self.model = model;
        self
    }

    /// Sets the interval between status checks.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Sets the maximum time to wait for generation to finish.
    pub fn max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = max_wait;
        self
    }

    /// Sets the seed image size cap in bytes.
    pub fn max_image_bytes(mut self, cap: usize) -> Self {
        self.max_image_bytes = cap;
        self
    }

    /// Overrides the service endpoint. Mainly useful for tests.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Builds the orchestrator, resolving the API key.
    pub fn build(self) -> Result<Orchestrator> {
        let api_key = self
            .api_key
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok())
            .ok_or_else(|| {
                ReelGenError::Auth("GOOGLE_API_KEY not set and no API key provided".into())
            })?;

        Ok(Orchestrator {
            client: reqwest::Client::new(),
            api_key,
            model: self.model,
            poll_interval: self.poll_interval,
            max_wait: self.max_wait,
            max_image_bytes: self.max_image_bytes,
            base_url: self.base_url.trim_end_matches('/').to_string(),
        })
    }
}

/// Video generation orchestrator.
///
/// Holds the credential and tuning knobs; each [`generate`] call is an
/// independent pipeline with no shared mutable state, so one orchestrator
/// can serve concurrent calls.
///
/// [`generate`]: Orchestrator::generate
pub struct Orchestrator {
    client: reqwest::Client,
    api_key: String,
    model: VideoModel,
    poll_interval: Duration,
    max_wait: Duration,
    max_image_bytes: usize,
    base_url: String,
}

impl Orchestrator {
    /// Creates a new `OrchestratorBuilder`.
    pub fn builder() -> OrchestratorBuilder {
        OrchestratorBuilder::new()
    }

    /// Generates a video from the given request.
    ///
    /// Convenience form: progress events are discarded and the call cannot
    /// be cancelled externally (the `max_wait` bound still applies).
    pub async fn generate(&self, request: &VideoRequest) -> Result<VideoHandle> {
        self.generate_with(request, &ProgressSender::disabled(), &CancellationToken::new())
            .await
    }

    /// Generates a video, emitting milestones into `progress` and honoring
    /// `cancel` at every suspension point.
    pub async fn generate_with(
        &self,
        request: &VideoRequest,
        progress: &ProgressSender,
        cancel: &CancellationToken,
    ) -> Result<VideoHandle> {
        let start = Instant::now();

        request.validate(self.max_image_bytes)?;

        if request.image.is_some() {
            progress.emit(Progress::EncodingImage);
        }
        let body = GenerateVideosRequest::from_request(request);

        progress.emit(Progress::Submitting);
        let operation = race(cancel, self.submit(&body)).await?;
        tracing::debug!(operation = %operation.name, "submitted video generation request");
        progress.emit(Progress::WarmingUp);

        let uri = self.poll_until_done(operation, progress, cancel).await?;
        tracing::debug!(uri = %uri, "video generation complete");

        progress.emit(Progress::Downloading);
        let data = race(cancel, self.download(&uri)).await?;
        tracing::debug!(bytes = data.len(), "downloaded generated video");

        progress.emit(Progress::Finalizing);
        Ok(VideoHandle::new(
            data,
            "video/mp4",
            VideoMetadata {
                model: Some(self.model.as_str().to_string()),
                elapsed_ms: Some(start.elapsed().as_millis() as u64),
            },
        ))
    }

    /// Submit the generation job; returns the initial operation state.
    async fn submit(&self, body: &GenerateVideosRequest) -> Result<Operation> {
        let url = format!(
            "{}/models/{}:predictLongRunning",
            self.base_url,
            self.model.as_str(),
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(self.parse_error(status.as_u16(), &text));
        }

        Ok(response.json().await?)
    }

    /// Poll until the operation reaches a terminal state; returns the video
    /// URI on success.
    async fn poll_until_done(
        &self,
        mut operation: Operation,
        progress: &ProgressSender,
        cancel: &CancellationToken,
    ) -> Result<String> {
        let url = format!("{}/{}", self.base_url, operation.name);
        let start = Instant::now();

        loop {
            // A structured error means the job itself failed, whether or not
            // the done flag is set.
            if let Some(err) = operation.error.take() {
                return Err(ReelGenError::JobFailed(
                    err.message.unwrap_or_else(|| "unknown error".into()),
                ));
            }

            if operation.done.unwrap_or(false) {
                return extract_video_uri(operation);
            }

            if start.elapsed() > self.max_wait {
                return Err(ReelGenError::Timeout(self.max_wait));
            }

            race(cancel, async {
                tokio::time::sleep(self.poll_interval).await;
                Ok(())
            })
            .await?;

            progress.emit(Progress::CheckingStatus);
            tracing::debug!(
                operation = %operation.name,
                elapsed_secs = start.elapsed().as_secs(),
                "polling video generation"
            );
            operation = race(cancel, self.fetch_operation(&url)).await?;
        }
    }

    /// Re-fetch the operation state.
    async fn fetch_operation(&self, url: &str) -> Result<Operation> {
        let response = self
            .client
            .get(url)
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(self.parse_error(status.as_u16(), &text));
        }

        Ok(response.json().await?)
    }

    /// Download the video, appending the API key as a query parameter.
    async fn download(&self, uri: &str) -> Result<Vec<u8>> {
        let url = append_key(uri, &self.api_key);

        let response = self
            .client
            .get(&url)
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReelGenError::Download {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }

    fn parse_error(&self, status: u16, text: &str) -> ReelGenError {
        if status == 401 || status == 403 {
            return ReelGenError::Auth(text.to_string());
        }
        ReelGenError::Submission {
            status,
            message: text.to_string(),
        }
    }
}

/// Race a pipeline step against the cancellation token.
async fn race<T, F>(cancel: &CancellationToken, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ReelGenError::Cancelled),
        result = fut => result,
    }
}

/// Append the API key as a query parameter to a download URI.
fn append_key(uri: &str, key: &str) -> String {
    if uri.contains('?') {
        format!("{uri}&key={key}")
    } else {
        format!("{uri}?key={key}")
    }
}

/// Pull the video URI out of a terminal operation.
fn extract_video_uri(operation: Operation) -> Result<String> {
    if let Some(resp) = operation.response {
        let samples = resp.generated_videos.or_else(|| {
            resp.generate_video_response
                .and_then(|r| r.generated_samples)
        });
        if let Some(samples) = samples {
            if let Some(first) = samples.into_iter().next() {
                if let Some(uri) = first.video.and_then(|v| v.uri) {
                    return Ok(uri);
                }
            }
        }
    }
    Err(ReelGenError::EmptyResult)
}

// ── Wire format ─────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateVideosRequest {
    instances: Vec<VideoInstance>,
    parameters: VideoParameters,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VideoInstance {
    prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<InlinePayload>,
}

/// Media payload wrapping `inlineData` (`{"inlineData": {"mimeType": "...", "data": "..."}}`).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlinePayload {
    inline_data: InlineData,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

impl InlinePayload {
    /// Base64-encode a seed image into the self-contained wire form.
    fn encode(image: &ImageInput) -> Self {
        use base64::Engine;
        Self {
            inline_data: InlineData {
                mime_type: image.mime_type.clone(),
                data: base64::engine::general_purpose::STANDARD.encode(&image.data),
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VideoParameters {
    number_of_videos: u32,
}

impl GenerateVideosRequest {
    fn from_request(request: &VideoRequest) -> Self {
        Self {
            instances: vec![VideoInstance {
                prompt: request.prompt.clone(),
                image: request.image.as_ref().map(InlinePayload::encode),
            }],
            parameters: VideoParameters { number_of_videos: 1 },
        }
    }
}

#[derive(Debug, Deserialize)]
struct Operation {
    name: String,
    #[serde(default)]
    done: Option<bool>,
    #[serde(default)]
    response: Option<OperationResponse>,
    #[serde(default)]
    error: Option<OperationError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OperationResponse {
    #[serde(default)]
    generated_videos: Option<Vec<GeneratedSample>>,
    /// Older response shape nests the samples one level deeper.
    #[serde(default)]
    generate_video_response: Option<GenerateVideoResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateVideoResponse {
    #[serde(default)]
    generated_samples: Option<Vec<GeneratedSample>>,
}

#[derive(Debug, Deserialize)]
struct GeneratedSample {
    #[serde(default)]
    video: Option<VideoRef>,
}

#[derive(Debug, Deserialize)]
struct VideoRef {
    #[serde(default)]
    uri: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OperationError {
    #[serde(default)]
    message: Option<String>,
}
