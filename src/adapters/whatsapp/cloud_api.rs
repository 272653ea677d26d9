//! WhatsApp Cloud API adapter. Implements WaGateway over the Graph HTTP API.
//!
//! One POST per send, no retries. Non-2xx responses are classified using the
//! Graph error envelope when it parses, falling back to the raw body.

use crate::domain::{Credentials, DomainError};
use crate::ports::WaGateway;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Template settings that don't vary per recipient.
#[derive(Debug, Clone)]
pub struct TemplateConfig {
    /// Template name registered with the WhatsApp Business account.
    pub name: String,
    /// BCP-47-ish language code the template was approved for (e.g. "en_US").
    pub language_code: String,
    /// Pass the recipient's display name as the single body text parameter.
    /// Off by default; the stock template takes no parameters.
    pub include_name_param: bool,
}

/// Cloud API gateway. Credentials flow in per send call so one gateway
/// instance serves any batch.
pub struct CloudApiGateway {
    client: reqwest::Client,
    base_url: String,
    template: TemplateConfig,
}

impl CloudApiGateway {
    /// `base_url` is the Graph API root including version, e.g.
    /// `https://graph.facebook.com/v22.0`.
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, template: TemplateConfig) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            template,
        }
    }

    fn messages_url(&self, phone_number_id: &str) -> String {
        format!("{}/{}/messages", self.base_url, phone_number_id)
    }

    fn build_payload<'a>(&'a self, address: &'a str, display_name: &'a str) -> TemplateMessage<'a> {
        let parameters = if self.template.include_name_param {
            vec![Parameter {
                kind: "text",
                text: display_name,
            }]
        } else {
            Vec::new()
        };

        TemplateMessage {
            messaging_product: "whatsapp",
            to: address,
            kind: "template",
            template: Template {
                name: &self.template.name,
                language: Language {
                    code: &self.template.language_code,
                },
                components: vec![Component {
                    kind: "body",
                    parameters,
                }],
            },
        }
    }
}

#[async_trait::async_trait]
impl WaGateway for CloudApiGateway {
    async fn send_template(
        &self,
        address: &str,
        display_name: &str,
        credentials: &Credentials,
    ) -> Result<(), DomainError> {
        let url = self.messages_url(&credentials.phone_number_id);
        let payload = self.build_payload(address, display_name);

        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", credentials.access_token),
            )
            .json(&payload)
            .send()
            .await
            .map_err(|e| DomainError::Transport(transport_detail(&e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, address, "Cloud API rejected send");
            return Err(DomainError::Provider {
                status: status.as_u16(),
                detail: provider_detail(&body),
            });
        }

        debug!(address, "Cloud API accepted send");
        Ok(())
    }
}

/// Cloud API template message envelope.
#[derive(Serialize)]
struct TemplateMessage<'a> {
    messaging_product: &'static str,
    to: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    template: Template<'a>,
}

#[derive(Serialize)]
struct Template<'a> {
    name: &'a str,
    language: Language<'a>,
    components: Vec<Component<'a>>,
}

#[derive(Serialize)]
struct Language<'a> {
    code: &'a str,
}

#[derive(Serialize)]
struct Component<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    parameters: Vec<Parameter<'a>>,
}

#[derive(Serialize)]
struct Parameter<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    text: &'a str,
}

/// Graph API error envelope: `{"error": {"message", "type", "code"}}`.
#[derive(Deserialize)]
struct GraphErrorEnvelope {
    error: GraphError,
}

#[derive(Deserialize)]
struct GraphError {
    message: String,
    code: Option<i64>,
}

/// Extract a human-readable reason from a non-2xx response body.
fn provider_detail(body: &str) -> String {
    match serde_json::from_str::<GraphErrorEnvelope>(body) {
        Ok(envelope) => match envelope.error.code {
            Some(code) => format!("{} (code {})", envelope.error.message, code),
            None => envelope.error.message,
        },
        Err(_) => body.chars().take(200).collect(),
    }
}

fn transport_detail(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        format!("request timed out: {e}")
    } else if e.is_connect() {
        format!("connection failed: {e}")
    } else {
        e.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway(include_name_param: bool) -> CloudApiGateway {
        CloudApiGateway::new(
            reqwest::Client::new(),
            "https://graph.facebook.com/v22.0/",
            TemplateConfig {
                name: "welcome_message".into(),
                language_code: "en_US".into(),
                include_name_param,
            },
        )
    }

    #[test]
    fn messages_url_joins_without_double_slash() {
        let gw = gateway(false);
        assert_eq!(
            gw.messages_url("123456"),
            "https://graph.facebook.com/v22.0/123456/messages"
        );
    }

    #[test]
    fn payload_omits_name_parameter_by_default() {
        let gw = gateway(false);
        let value = serde_json::to_value(gw.build_payload("5511999990000", "Ana")).unwrap();

        assert_eq!(value["messaging_product"], "whatsapp");
        assert_eq!(value["to"], "5511999990000");
        assert_eq!(value["type"], "template");
        assert_eq!(value["template"]["name"], "welcome_message");
        assert_eq!(value["template"]["language"]["code"], "en_US");
        assert_eq!(value["template"]["components"][0]["type"], "body");
        assert!(value["template"]["components"][0].get("parameters").is_none());
    }

    #[test]
    fn payload_carries_name_parameter_when_configured() {
        let gw = gateway(true);
        let value = serde_json::to_value(gw.build_payload("5511999990000", "Ana")).unwrap();

        let params = &value["template"]["components"][0]["parameters"];
        assert_eq!(params[0]["type"], "text");
        assert_eq!(params[0]["text"], "Ana");
    }

    #[test]
    fn provider_detail_parses_graph_envelope() {
        let body = r#"{"error":{"message":"Invalid OAuth access token","type":"OAuthException","code":190}}"#;
        assert_eq!(provider_detail(body), "Invalid OAuth access token (code 190)");
    }

    #[test]
    fn provider_detail_falls_back_to_truncated_body() {
        let body = "x".repeat(500);
        let detail = provider_detail(&body);
        assert_eq!(detail.len(), 200);
    }
}
