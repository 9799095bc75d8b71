//! Reqwest-backed mail vendor adapter.
//!
//! This adapter owns transport details only: payload serialisation,
//! authentication, and logging of both delivery outcomes. Delivery runs on a
//! detached task so the signup path never waits on, or fails because of, the
//! mail vendor.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Serialize;
use tracing::{info, warn};

use crate::domain::TraceId;
use crate::domain::notifications::MailMessage;
use crate::domain::ports::Mailer;

/// Wire payload accepted by the template-mail endpoint.
#[derive(Debug, Serialize)]
struct MailPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    template_id: Option<String>,
    to: String,
    data: serde_json::Value,
}

impl From<MailMessage> for MailPayload {
    fn from(message: MailMessage) -> Self {
        Self {
            template_id: message.template_id,
            to: message.recipient,
            data: message.data,
        }
    }
}

/// Mail vendor adapter that POSTs templated messages to one endpoint.
pub struct HttpMailer {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl HttpMailer {
    /// Build an adapter using a reqwest client with an explicit request
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key: api_key.into(),
        })
    }

    async fn send(client: Client, endpoint: Url, api_key: String, payload: MailPayload) {
        let recipient = payload.to.clone();
        let result = client
            .post(endpoint)
            .bearer_auth(&api_key)
            .json(&payload)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                info!(recipient, status = %response.status(), "mail dispatched");
            }
            Ok(response) => {
                warn!(recipient, status = %response.status(), "mail vendor rejected delivery");
            }
            Err(err) => {
                warn!(recipient, error = %err, "mail delivery failed");
            }
        }
    }
}

impl Mailer for HttpMailer {
    fn deliver(&self, message: MailMessage) {
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        let api_key = self.api_key.clone();
        let payload = MailPayload::from(message);

        // The detached task keeps the request's trace id so vendor-side log
        // lines correlate with the signup that triggered them.
        let send = Self::send(client, endpoint, api_key, payload);
        match TraceId::current() {
            Some(trace_id) => {
                tokio::spawn(TraceId::scope(trace_id, send));
            }
            None => {
                tokio::spawn(send);
            }
        }
    }
}
