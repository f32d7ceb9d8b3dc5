use std::time::Duration;

use async_trait::async_trait;
use base64ct::{Base64, Encoding};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::dto::NutritionAnalysis;
use super::error::NutritionError;
use super::extract::parse_analysis;
use super::extractor::{prompt_for, NutritionExtractor, NutritionInput};
use crate::config::GeminiConfig;

/// Client for the Gemini `generateContent` REST endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(cfg: &GeminiConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            model: cfg.model.clone(),
            api_key: cfg.api_key.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
enum Part<'a> {
    InlineData(InlineData<'a>),
    Text(String),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'a str,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    response_mime_type: &'static str,
}

impl<'a> GenerateRequest<'a> {
    fn for_input(input: &'a NutritionInput) -> Self {
        let mut parts = Vec::with_capacity(2);
        if let NutritionInput::Media { data, mime_type } = input {
            parts.push(Part::InlineData(InlineData {
                mime_type,
                data: Base64::encode_string(data),
            }));
        }
        parts.push(Part::Text(prompt_for(input)));
        Self {
            contents: vec![Content { role: "user", parts }],
            generation_config: GenerationConfig {
                temperature: 0.2,
                response_mime_type: "application/json",
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first candidate, parts concatenated.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.iter().filter_map(|p| p.text.as_deref()).collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl NutritionExtractor for GeminiClient {
    async fn analyze(&self, input: NutritionInput) -> Result<NutritionAnalysis, NutritionError> {
        let key = self.api_key.as_deref().ok_or(NutritionError::NotConfigured)?;

        let body = GenerateRequest::for_input(&input);
        let resp = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            warn!(%status, model = %self.model, "gemini request failed");
            let detail: String = detail.chars().take(200).collect();
            return Err(NutritionError::Upstream(format!("{status}: {detail}")));
        }

        let parsed: GenerateResponse = resp.json().await?;
        let text = parsed.text();
        debug!(kind = input.kind(), chars = text.len(), "gemini answered");
        parse_analysis(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meals::MealType;
    use bytes::Bytes;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(base_url: &str, api_key: Option<&str>) -> GeminiClient {
        GeminiClient::new(&GeminiConfig {
            api_key: api_key.map(str::to_string),
            model: "test-model".into(),
            base_url: format!("{base_url}/"),
            timeout_secs: 5,
        })
        .expect("client")
    }

    fn answer(text: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": text }] },
                "finishReason": "STOP"
            }]
        })
    }

    #[test]
    fn request_carries_inline_media_then_prompt() {
        let input = NutritionInput::media(Bytes::from_static(b"abc"), "audio/webm").unwrap();
        let json = serde_json::to_value(GenerateRequest::for_input(&input)).unwrap();
        let parts = &json["contents"][0]["parts"];
        assert_eq!(parts[0]["inlineData"]["mimeType"], "audio/webm");
        assert_eq!(parts[0]["inlineData"]["data"], "YWJj");
        assert!(parts[1]["text"].as_str().unwrap().contains("nutritionist"));
        assert_eq!(json["generationConfig"]["responseMimeType"], "application/json");
    }

    #[test]
    fn text_request_has_a_single_part() {
        let input = NutritionInput::Text("a banana".into());
        let json = serde_json::to_value(GenerateRequest::for_input(&input)).unwrap();
        assert_eq!(json["contents"][0]["parts"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn analyzes_model_answer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/test-model:generateContent"))
            .and(header("x-goog-api-key", "secret"))
            .and(body_partial_json(serde_json::json!({
                "generationConfig": { "responseMimeType": "application/json" }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(answer(
                "```json\n{\"meal_type\":\"breakfast\",\"name\":\"Oatmeal\",\"grams\":250,\"calories\":300,\"protein\":10,\"carbs\":50,\"fats\":6,\"items\":[]}\n```",
            )))
            .mount(&server)
            .await;

        let analysis = client(&server.uri(), Some("secret"))
            .analyze(NutritionInput::Text("a bowl of oatmeal".into()))
            .await
            .unwrap();
        assert_eq!(analysis.meal_type, MealType::Breakfast);
        assert_eq!(analysis.name, "Oatmeal");
        assert_eq!(analysis.calories, 300.0);
    }

    #[tokio::test]
    async fn upstream_error_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
            .mount(&server)
            .await;

        let err = client(&server.uri(), Some("secret"))
            .analyze(NutritionInput::Text("soup".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, NutritionError::Upstream(ref m) if m.contains("429")));
        assert_eq!(err.status(), axum::http::StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn empty_answer_has_no_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let err = client(&server.uri(), Some("secret"))
            .analyze(NutritionInput::Text("soup".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, NutritionError::NoJson));
    }

    #[tokio::test]
    async fn missing_key_is_not_configured() {
        let err = client("http://127.0.0.1:9", None)
            .analyze(NutritionInput::Text("soup".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, NutritionError::NotConfigured));
    }
}
