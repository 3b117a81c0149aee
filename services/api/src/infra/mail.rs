use anyhow::Context as _;
use reqwest::Client;
use serde::Serialize;

use crate::config::MailConfig;
use crate::domain::repository::Mailer;
use crate::domain::types::OtpEmail;
use crate::error::ApiError;

/// Concrete mail transport picked at startup. `Log` is the dev fallback when
/// no mail API is configured; it traces the message instead of sending it.
#[derive(Clone)]
pub enum MailTransport {
    Http(HttpMailer),
    Log,
}

impl Mailer for MailTransport {
    async fn send(&self, email: &OtpEmail) -> Result<(), ApiError> {
        match self {
            Self::Http(mailer) => mailer.send(email).await,
            Self::Log => {
                tracing::info!(to = %email.to, subject = %email.subject, "mail transport disabled, logging instead");
                Ok(())
            }
        }
    }
}

/// Sends mail through a JSON HTTP mail API (POST with a bearer key).
#[derive(Clone)]
pub struct HttpMailer {
    client: Client,
    config: MailConfig,
}

#[derive(Serialize)]
struct SendMailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

impl HttpMailer {
    pub fn new(config: MailConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    async fn send(&self, email: &OtpEmail) -> Result<(), ApiError> {
        let resp = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&SendMailRequest {
                from: &self.config.from,
                to: &email.to,
                subject: &email.subject,
                text: &email.body,
            })
            .send()
            .await
            .context("send mail request")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(%status, %body, "mail API rejected the message");
            return Err(ApiError::DeliveryFailed);
        }
        Ok(())
    }
}
