// src/services/webhook.rs

//! Discord webhook notifier.
//!
//! Formats an article as a Discord embed and posts it to the configured
//! webhook URL.

use serde::Serialize;

use crate::error::{AppError, Result};
use crate::models::{Article, Config};
use crate::utils::http;

/// Webhook execution request body.
#[derive(Debug, Serialize)]
struct WebhookPayload {
    username: String,
    embeds: Vec<Embed>,
}

#[derive(Debug, Serialize)]
struct Embed {
    title: String,
    url: String,
    description: String,
    fields: Vec<EmbedField>,
}

#[derive(Debug, Serialize)]
struct EmbedField {
    name: &'static str,
    value: String,
    inline: bool,
}

/// Service for delivering article notifications to Discord.
pub struct DiscordNotifier {
    client: reqwest::Client,
    /// `None` when the config carries no usable webhook URL.
    webhook_url: Option<String>,
}

impl DiscordNotifier {
    /// Create a notifier from the configured webhook URL.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: http::create_client(config)?,
            webhook_url: config
                .webhook_configured()
                .then(|| config.discord_webhook.clone()),
        })
    }

    /// Send one article as an embed.
    ///
    /// `Ok(false)` means the webhook is not configured and nothing was sent;
    /// this is the expected state before setup, not a failure.
    pub async fn send(&self, article: &Article, display_name: &str) -> Result<bool> {
        let Some(url) = &self.webhook_url else {
            return Ok(false);
        };

        let payload = build_payload(article, display_name);
        let response = self
            .client
            .post(url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::delivery(format!("error sending embed to Discord webhook: {e}")))?;

        let status = response.status().as_u16();
        if matches!(status, 200 | 204) {
            Ok(true)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(AppError::delivery(format!(
                "failed to send embed: {status} {body}"
            )))
        }
    }
}

/// Build the embed payload for one article.
fn build_payload(article: &Article, username: &str) -> WebhookPayload {
    let embed = Embed {
        title: article
            .title
            .clone()
            .unwrap_or_else(|| "No Title".to_string()),
        url: article.detail_url(),
        description: article
            .abstract_text
            .clone()
            .unwrap_or_else(|| "No Abstract".to_string()),
        fields: vec![
            EmbedField {
                name: "Authors",
                value: article.author_line(),
                inline: false,
            },
            EmbedField {
                name: "Year",
                value: article.year.clone().unwrap_or_else(|| "N/A".to_string()),
                inline: true,
            },
            EmbedField {
                name: "PMID",
                value: article.pmid.clone(),
                inline: true,
            },
        ],
    };

    WebhookPayload {
        username: username.to_string(),
        embeds: vec![embed],
    }
}
