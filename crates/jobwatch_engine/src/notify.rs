use std::time::Duration;

use jobwatch_logging::{watch_debug, watch_warn};
use reqwest::multipart::{Form, Part};
use serde_json::Value;

use crate::DispatchError;

/// Provider reply to a delivered notification.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchAck {
    pub ok: bool,
    pub body: Value,
}

/// Push-notification sink.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    /// Sends `message` to `chat_id`, as a photo caption when `image_url` is given.
    async fn send(
        &self,
        chat_id: &str,
        message: &str,
        image_url: Option<&str>,
    ) -> Result<DispatchAck, DispatchError>;
}

/// Telegram Bot API client.
#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    api_base: String,
    token: String,
    client: reqwest::Client,
}

impl TelegramNotifier {
    pub fn new(
        api_base: impl Into<String>,
        token: impl Into<String>,
        request_timeout: Duration,
    ) -> Result<Self, DispatchError> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;
        Ok(Self {
            api_base: api_base.into(),
            token: token.into(),
            client,
        })
    }

    // The token contains ':' so the method URL is assembled as text rather than joined.
    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.api_base.trim_end_matches('/'),
            self.token,
            method
        )
    }

    /// Image bytes, or `None` when the image cannot be fetched.
    async fn fetch_image(&self, url: &str) -> Option<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status);
        let bytes = match response {
            Ok(response) => response.bytes().await,
            Err(err) => Err(err),
        };
        match bytes {
            Ok(bytes) => Some(bytes.to_vec()),
            Err(err) => {
                watch_warn!("Failed to fetch image {}: {}; sending text only", url, err);
                None
            }
        }
    }
}

#[async_trait::async_trait]
impl Notifier for TelegramNotifier {
    /// Provider rejections (4xx) come back as an acknowledgment with `ok == false`;
    /// only transport failures and provider-side 5xx are errors.
    async fn send(
        &self,
        chat_id: &str,
        message: &str,
        image_url: Option<&str>,
    ) -> Result<DispatchAck, DispatchError> {
        let mut params = vec![
            ("chat_id", chat_id),
            ("caption", message),
            ("parse_mode", "HTML"),
            ("disable_web_page_preview", "true"),
        ];

        let photo = match image_url {
            Some(image_url) => self.fetch_image(image_url).await,
            None => None,
        };
        let request = match photo {
            Some(photo) => {
                let form = Form::new().part("photo", Part::bytes(photo).file_name("photo"));
                self.client
                    .get(self.method_url("sendPhoto"))
                    .query(&params)
                    .multipart(form)
            }
            None => {
                params.push(("text", message));
                self.client
                    .get(self.method_url("sendMessage"))
                    .query(&params)
            }
        };

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        if status.is_server_error() {
            return Err(DispatchError::HttpStatus {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        let body: Value = serde_json::from_slice(&body)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()));
        let ok = status.is_success() && body.get("ok").and_then(Value::as_bool).unwrap_or(false);
        if ok {
            watch_debug!("Messaging provider acknowledged body={}", body);
        } else {
            watch_warn!("Messaging provider rejected the message ({}): {}", status, body);
        }
        Ok(DispatchAck { ok, body })
    }
}
