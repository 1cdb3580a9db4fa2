use async_trait::async_trait;
use intentrs_core::{LLMProvider, LLMResponse, StructuredRequest, Usage};
use reqwest::Client;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const ZHIPU_BASE_URL: &str = "https://open.bigmodel.cn/api/paas/v4";

/// Provider for any endpoint speaking the OpenAI chat-completions dialect
/// with JSON-schema structured output.
pub struct OpenAiCompatibleProvider {
    client: Client,
    api_key: String,
    base_url: String,
    name: String,
}

impl OpenAiCompatibleProvider {
    pub fn new(api_key: String) -> Self {
        info!("Creating OpenAiCompatibleProvider");
        Self {
            client: Client::new(),
            api_key,
            base_url: OPENAI_BASE_URL.to_string(),
            name: "openai".to_string(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: String) -> Self {
        self.name = name;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_body(request: &StructuredRequest) -> Value {
        json!({
            "model": request.model,
            "messages": request.messages,
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": request.output.name,
                    "description": request.output.description,
                    "schema": request.output.schema,
                    "strict": true
                }
            }
        })
    }

    async fn try_send(&self, body: &Value) -> anyhow::Result<Value> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        Ok(response)
    }
}

/// Pull the structured payload out of a chat-completions response.
///
/// Function-call arguments win over message content. Text that is not JSON
/// is passed through as a string, and a message with no text at all (a
/// refusal) as `null`, so the caller can reject either as malformed.
fn extract_payload(response: &Value) -> anyhow::Result<Value> {
    let message = &response["choices"][0]["message"];
    if message.is_null() {
        anyhow::bail!("Invalid response format: missing choices[0].message");
    }

    let Some(text) = message["tool_calls"][0]["function"]["arguments"]
        .as_str()
        .or_else(|| message["content"].as_str())
    else {
        if let Some(refusal) = message["refusal"].as_str() {
            warn!("Model refused structured output: {refusal}");
        }
        return Ok(Value::Null);
    };

    Ok(serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string())))
}

fn extract_usage(response: &Value) -> Option<Usage> {
    let counter = |u: &serde_json::Map<String, Value>, key: &str| {
        u32::try_from(u.get(key).and_then(Value::as_u64).unwrap_or(0)).unwrap_or(0)
    };

    response["usage"].as_object().map(|u| Usage {
        prompt_tokens: counter(u, "prompt_tokens"),
        completion_tokens: counter(u, "completion_tokens"),
        total_tokens: counter(u, "total_tokens"),
    })
}

#[async_trait]
impl LLMProvider for OpenAiCompatibleProvider {
    async fn complete(&self, request: &StructuredRequest) -> anyhow::Result<LLMResponse> {
        let body = Self::build_body(request);

        info!(
            "Sending request to {}: model={}, schema={}",
            self.name, request.model, request.output.name
        );

        let response = self.try_send(&body).await?;
        let value = extract_payload(&response)?;
        let usage = extract_usage(&response);

        debug!("Received response from {}", self.name);
        Ok(LLMResponse { value, usage })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intentrs_core::{ChatMessage, ClassificationResult};

    fn sample_request() -> StructuredRequest {
        StructuredRequest {
            messages: vec![
                ChatMessage::system("classify"),
                ChatMessage::user("Message: 'hi'\nCategory:"),
            ],
            model: "gpt-test".to_string(),
            max_tokens: 5000,
            temperature: 0.0,
            output: ClassificationResult::output_schema(),
        }
    }

    #[test]
    fn body_requests_strict_json_schema() {
        let body = OpenAiCompatibleProvider::build_body(&sample_request());

        assert_eq!(body["model"], "gpt-test");
        assert_eq!(body["max_tokens"], 5000);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["response_format"]["type"], "json_schema");
        assert_eq!(
            body["response_format"]["json_schema"]["name"],
            "classifier_output"
        );
        assert_eq!(body["response_format"]["json_schema"]["strict"], true);
    }

    #[test]
    fn payload_is_parsed_from_content() {
        let response = json!({
            "choices": [{
                "message": {
                    "content": "{\"message\":\"hi\",\"category\":\"Order Tracking\"}"
                }
            }]
        });

        let payload = extract_payload(&response).unwrap_or(Value::Null);
        assert_eq!(payload["category"], "Order Tracking");
    }

    #[test]
    fn tool_call_arguments_take_precedence() {
        let response = json!({
            "choices": [{
                "message": {
                    "content": null,
                    "tool_calls": [{
                        "function": { "arguments": "{\"category\":\"Refund/Exchange\"}" }
                    }]
                }
            }]
        });

        let payload = extract_payload(&response).unwrap_or(Value::Null);
        assert_eq!(payload["category"], "Refund/Exchange");
    }

    #[test]
    fn non_json_content_is_passed_through_as_text() {
        let response = json!({
            "choices": [{ "message": { "content": "Order Tracking" } }]
        });

        let payload = extract_payload(&response).unwrap_or(Value::Null);
        assert_eq!(payload, Value::String("Order Tracking".to_string()));
    }

    #[test]
    fn message_without_content_yields_null_payload() {
        let response = json!({
            "choices": [{
                "message": { "content": null, "refusal": "I can't help with that." }
            }]
        });

        assert!(matches!(extract_payload(&response), Ok(Value::Null)));
    }

    #[test]
    fn missing_message_is_an_error() {
        assert!(extract_payload(&json!({ "choices": [] })).is_err());
    }

    #[test]
    fn usage_is_read_when_present() {
        let response = json!({
            "usage": { "prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15 }
        });

        let usage = extract_usage(&response);
        assert_eq!(usage.map(|u| u.total_tokens), Some(15));
        assert!(extract_usage(&json!({})).is_none());
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let provider = OpenAiCompatibleProvider::new("key".to_string())
            .with_base_url(format!("{ZHIPU_BASE_URL}/"));

        assert_eq!(provider.base_url(), ZHIPU_BASE_URL);
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_transport_error() {
        let provider = OpenAiCompatibleProvider::new("key".to_string())
            .with_base_url("http://127.0.0.1:9".to_string());

        assert!(provider.complete(&sample_request()).await.is_err());
    }
}
