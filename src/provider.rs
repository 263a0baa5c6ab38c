//! Image Provider Abstraction
//!
//! Unified interface for the Google Generative Language image models. Two wire
//! protocols are in play: Imagen's `:predict` endpoint for straight
//! text-to-image panels, and Gemini's `:generateContent` endpoint for
//! image-capable models that accept an inline reference image for style
//! transfer. Both return base64 image bytes inside JSON.

use crate::error::GenerateError;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Aspect ratio of the requested asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    /// Wide panels for website backgrounds
    Wide16x9,
    /// Square sprites
    Square1x1,
}

impl AspectRatio {
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Wide16x9 => "16:9",
            AspectRatio::Square1x1 => "1:1",
        }
    }
}

/// Reference image attached to a style-transfer request
#[derive(Debug, Clone)]
pub struct ReferenceImage {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// One generation request
#[derive(Debug, Clone)]
pub struct ImageRequest {
    pub prompt: String,
    pub aspect: AspectRatio,
    pub reference: Option<ReferenceImage>,
}

/// One generated image
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub bytes: Vec<u8>,
    /// File extension derived from the response MIME type
    pub extension: &'static str,
    /// Model that actually produced the image
    pub model: String,
}

/// Image provider client trait
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Generate one image from a request
    async fn generate(&self, request: &ImageRequest) -> Result<GeneratedImage, GenerateError>;

    /// Get the provider name
    fn provider_name(&self) -> &str;

    /// Get the preferred model name
    fn model_name(&self) -> &str;
}

const PROVIDER_HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const PROVIDER_HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(180);

fn build_provider_http_client() -> Result<Client, GenerateError> {
    Client::builder()
        .connect_timeout(PROVIDER_HTTP_CONNECT_TIMEOUT)
        .timeout(PROVIDER_HTTP_REQUEST_TIMEOUT)
        .build()
        .map_err(|e| GenerateError::ProviderError(format!("Failed to create HTTP client: {}", e)))
}

// Helper function to map HTTP transport errors to GenerateError
fn map_http_error(error: reqwest::Error) -> GenerateError {
    if error.is_timeout() {
        GenerateError::ProviderRequestFailed(format!("Request timeout: {}", error))
    } else if error.is_connect() {
        GenerateError::ProviderRequestFailed(format!("Connection error: {}", error))
    } else {
        GenerateError::ProviderError(format!("HTTP error: {}", error))
    }
}

// Helper function to map non-success HTTP statuses to GenerateError
fn map_status_error(status: reqwest::StatusCode, body: &str) -> GenerateError {
    match status.as_u16() {
        401 | 403 => {
            GenerateError::ProviderAuthFailed(format!("status {}: {}", status, snippet(body)))
        }
        429 => GenerateError::ProviderRateLimit(format!("status {}: {}", status, snippet(body))),
        _ => GenerateError::ProviderRequestFailed(format!("status {}: {}", status, snippet(body))),
    }
}

// Error bodies can be pages long; keep the leading part only
fn snippet(body: &str) -> &str {
    let end = body
        .char_indices()
        .nth(300)
        .map(|(i, _)| i)
        .unwrap_or(body.len());
    body[..end].trim_end()
}

/// Map a response MIME type to an output file extension
pub fn extension_for_mime(mime: &str) -> &'static str {
    if mime.contains("jpeg") || mime.contains("jpg") {
        "jpg"
    } else {
        "png"
    }
}

// Imagen predict API request/response structures

#[derive(Serialize)]
struct PredictRequest {
    instances: Vec<PredictInstance>,
    parameters: PredictParameters,
}

#[derive(Serialize)]
struct PredictInstance {
    prompt: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PredictParameters {
    sample_count: u32,
    aspect_ratio: String,
    person_generation: String,
}

#[derive(Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    #[serde(default)]
    bytes_base64_encoded: Option<String>,
    #[serde(default)]
    mime_type: Option<String>,
}

/// Imagen client: one model, `:predict` endpoint. Has no slot for a
/// reference image; one attached to a request is ignored.
pub struct ImagenClient {
    client: Client,
    model: String,
    api_key: String,
    base_url: String,
}

impl ImagenClient {
    pub fn new(model: String, api_key: String, base_url: String) -> Result<Self, GenerateError> {
        let client = build_provider_http_client()?;
        Ok(Self {
            client,
            model,
            api_key,
            base_url,
        })
    }
}

#[async_trait]
impl ImageProvider for ImagenClient {
    async fn generate(&self, request: &ImageRequest) -> Result<GeneratedImage, GenerateError> {
        if request.reference.is_some() {
            tracing::debug!(model = %self.model, "Imagen predict has no reference slot; ignoring reference image");
        }

        let body = PredictRequest {
            instances: vec![PredictInstance {
                prompt: request.prompt.clone(),
            }],
            parameters: PredictParameters {
                sample_count: 1,
                aspect_ratio: request.aspect.as_str().to_string(),
                person_generation: "dont_allow".to_string(),
            },
        };

        let url = format!("{}/models/{}:predict", self.base_url, self.model);
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(map_http_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(map_status_error(status, &error_text));
        }

        let parsed: PredictResponse = response
            .json()
            .await
            .map_err(|e| GenerateError::ProviderError(format!("Failed to parse response: {}", e)))?;

        let prediction = parsed.predictions.first().ok_or_else(|| {
            GenerateError::EmptyGeneration(format!(
                "{} returned no predictions (prompt may have been filtered)",
                self.model
            ))
        })?;

        let encoded = prediction.bytes_base64_encoded.as_deref().ok_or_else(|| {
            GenerateError::EmptyGeneration(format!(
                "{} prediction carried no image bytes",
                self.model
            ))
        })?;

        let bytes = BASE64
            .decode(encoded)
            .map_err(|e| GenerateError::ProviderError(format!("Invalid base64 image data: {}", e)))?;

        let mime = prediction.mime_type.as_deref().unwrap_or("image/png");
        Ok(GeneratedImage {
            bytes,
            extension: extension_for_mime(mime),
            model: self.model.clone(),
        })
    }

    fn provider_name(&self) -> &str {
        "imagen"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

// Gemini generateContent API request/response structures

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<RequestPart>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
enum RequestPart {
    InlineData(InlineData),
    Text(String),
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(alias = "mime_type")]
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<String>,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    #[serde(default, alias = "inline_data")]
    inline_data: Option<InlineData>,
    #[serde(default)]
    text: Option<String>,
}

const STYLE_TRANSFER_PREFIX: &str = "Using this image as a reference for the composition and \
scene layout, create a new image in Pixar animation style:";

const STYLE_TRANSFER_SUFFIX: &str = "IMPORTANT: Transform this photorealistic scene into \
Pixar-style animation art. Keep the same general composition but make it look like a frame \
from a Pixar animated film - stylized, warm, inviting, with painterly textures.";

/// Gemini image client: `:generateContent` endpoint with an ordered model
/// fallback list. Models come and go on preview churn; the first one that
/// yields an image wins.
pub struct GeminiImageClient {
    client: Client,
    models: Vec<String>,
    api_key: String,
    base_url: String,
}

impl GeminiImageClient {
    pub fn new(
        models: Vec<String>,
        api_key: String,
        base_url: String,
    ) -> Result<Self, GenerateError> {
        if models.is_empty() {
            return Err(GenerateError::ProviderError(
                "Gemini client needs at least one model".to_string(),
            ));
        }
        let client = build_provider_http_client()?;
        Ok(Self {
            client,
            models,
            api_key,
            base_url,
        })
    }

    fn build_parts(&self, request: &ImageRequest) -> Vec<RequestPart> {
        match &request.reference {
            Some(reference) => vec![
                RequestPart::InlineData(InlineData {
                    mime_type: reference.mime_type.clone(),
                    data: BASE64.encode(&reference.bytes),
                }),
                RequestPart::Text(format!(
                    "{}\n\n{}\n\n{}",
                    STYLE_TRANSFER_PREFIX, request.prompt, STYLE_TRANSFER_SUFFIX
                )),
            ],
            None => vec![RequestPart::Text(request.prompt.clone())],
        }
    }

    async fn generate_with_model(
        &self,
        model: &str,
        request: &ImageRequest,
    ) -> Result<GeneratedImage, GenerateError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: self.build_parts(request),
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["IMAGE".to_string(), "TEXT".to_string()],
            },
        };

        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(map_http_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(map_status_error(status, &error_text));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenerateError::ProviderError(format!("Failed to parse response: {}", e)))?;

        for candidate in &parsed.candidates {
            let Some(content) = &candidate.content else {
                continue;
            };
            for part in &content.parts {
                if let Some(inline) = &part.inline_data {
                    let bytes = BASE64.decode(&inline.data).map_err(|e| {
                        GenerateError::ProviderError(format!("Invalid base64 image data: {}", e))
                    })?;
                    return Ok(GeneratedImage {
                        bytes,
                        extension: extension_for_mime(&inline.mime_type),
                        model: model.to_string(),
                    });
                }
                if let Some(text) = &part.text {
                    tracing::debug!(model, text = %snippet(text), "text part in image response");
                }
            }
        }

        Err(GenerateError::EmptyGeneration(format!(
            "{} returned no image part",
            model
        )))
    }
}

#[async_trait]
impl ImageProvider for GeminiImageClient {
    async fn generate(&self, request: &ImageRequest) -> Result<GeneratedImage, GenerateError> {
        let mut attempts = Vec::new();
        for model in &self.models {
            match self.generate_with_model(model, request).await {
                Ok(image) => return Ok(image),
                Err(err) => {
                    tracing::warn!(model = %model, error = %err, "model did not yield an image, trying next");
                    attempts.push(format!("{}: {}", model, err));
                }
            }
        }
        Err(GenerateError::EmptyGeneration(format!(
            "no model in the fallback list produced an image ({})",
            attempts.join("; ")
        )))
    }

    fn provider_name(&self) -> &str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.models[0]
    }
}
