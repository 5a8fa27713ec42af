//! Contact transport: delivers one visitor message to the owner's inbox.
//!
//! The production transport is the EmailJS REST API. One request per message,
//! no retry: a failure is reported once and the visitor decides to resend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::EmailJsConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Message submitted through the contact form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

#[async_trait]
pub trait ContactTransport: Send + Sync {
    async fn deliver(&self, message: &ContactMessage) -> Result<(), TransportError>;
}

#[derive(Debug, Serialize)]
struct EmailJsRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: TemplateParams<'a>,
}

/// Field names match the inputs of the EmailJS template.
#[derive(Debug, Serialize)]
struct TemplateParams<'a> {
    from_name: &'a str,
    from_email: &'a str,
    message: &'a str,
}

pub struct EmailJsTransport {
    client: Client,
    config: EmailJsConfig,
}

impl EmailJsTransport {
    pub fn new(config: EmailJsConfig) -> Result<Self, TransportError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, config })
    }

    fn request_body<'a>(&'a self, message: &'a ContactMessage) -> EmailJsRequest<'a> {
        EmailJsRequest {
            service_id: &self.config.service_id,
            template_id: &self.config.template_id,
            user_id: &self.config.public_key,
            template_params: TemplateParams {
                from_name: &message.name,
                from_email: &message.email,
                message: &message.message,
            },
        }
    }
}

#[async_trait]
impl ContactTransport for EmailJsTransport {
    async fn deliver(&self, message: &ContactMessage) -> Result<(), TransportError> {
        let response = self
            .client
            .post(&self.config.api_url)
            .json(&self.request_body(message))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        debug!("EmailJS accepted message from {}", message.email);
        Ok(())
    }
}
