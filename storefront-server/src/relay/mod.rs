//! Messaging relay
//!
//! Hands a rendered order message to the branch's staff channel. Delivery
//! happens after the order is committed; a failure here is logged and
//! never undoes the order.
//!
//! - [`WhatsAppLinkRelay`]: builds a `wa.me` deep link for the client to open
//! - [`WebhookRelay`]: POSTs the message to an HTTP endpoint

mod message;

pub use message::OrderMessage;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::models::BranchLocation;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Invalid destination: {0:?}")]
    InvalidDestination(String),

    #[error("Relay request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Relay rejected the message with status {0}")]
    Rejected(u16),
}

impl From<RelayError> for AppError {
    fn from(err: RelayError) -> Self {
        AppError::with_message(ErrorCode::RelayFailed, err.to_string())
    }
}

pub type RelayResult<T> = Result<T, RelayError>;

/// Receipt for a handed-off message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryHandle {
    /// Relay that accepted the message (`whatsapp_link`, `webhook`, ...)
    pub channel: String,
    /// Link to open, or an id assigned by the receiver
    pub reference: String,
}

#[async_trait]
pub trait MessagingRelay: Send + Sync {
    async fn deliver(&self, destination: &str, payload: &str) -> RelayResult<DeliveryHandle>;
}

/// Staff destination per branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchDestinations {
    pub marechal_candido_rondon: String,
    pub foz_do_iguacu: String,
}

impl BranchDestinations {
    pub fn for_branch(&self, branch: BranchLocation) -> &str {
        match branch {
            BranchLocation::MarechalCandidoRondon => &self.marechal_candido_rondon,
            BranchLocation::FozDoIguacu => &self.foz_do_iguacu,
        }
    }
}

/// Keep digits only; phone numbers are often typed with separators
fn normalize_phone(destination: &str) -> RelayResult<String> {
    let digits: String = destination.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Err(RelayError::InvalidDestination(destination.to_string()));
    }
    Ok(digits)
}

// ==== WhatsApp deep link ====

/// Builds `https://wa.me/<number>?text=<message>` without any network call
#[derive(Debug, Clone, Default)]
pub struct WhatsAppLinkRelay;

impl WhatsAppLinkRelay {
    pub fn new() -> Self {
        Self
    }

    pub fn link(&self, destination: &str, payload: &str) -> RelayResult<reqwest::Url> {
        let number = normalize_phone(destination)?;
        reqwest::Url::parse_with_params(&format!("https://wa.me/{}", number), &[("text", payload)])
            .map_err(|_| RelayError::InvalidDestination(destination.to_string()))
    }
}

#[async_trait]
impl MessagingRelay for WhatsAppLinkRelay {
    async fn deliver(&self, destination: &str, payload: &str) -> RelayResult<DeliveryHandle> {
        let url = self.link(destination, payload)?;
        Ok(DeliveryHandle {
            channel: "whatsapp_link".to_string(),
            reference: url.to_string(),
        })
    }
}

// ==== Webhook ====

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    destination: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct WebhookReceipt {
    id: Option<String>,
}

/// POSTs `{destination, text}` as JSON to a configured endpoint
#[derive(Debug, Clone)]
pub struct WebhookRelay {
    url: String,
    client: reqwest::Client,
}

impl WebhookRelay {
    pub fn new(url: impl Into<String>, timeout: Duration) -> RelayResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait]
impl MessagingRelay for WebhookRelay {
    async fn deliver(&self, destination: &str, payload: &str) -> RelayResult<DeliveryHandle> {
        let destination = normalize_phone(destination)?;
        let response = self
            .client
            .post(&self.url)
            .json(&WebhookPayload {
                destination: &destination,
                text: payload,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::Rejected(status.as_u16()));
        }

        // Receivers may answer with an empty body
        let receipt = response.json::<WebhookReceipt>().await.ok();
        Ok(DeliveryHandle {
            channel: "webhook".to_string(),
            reference: receipt
                .and_then(|r| r.id)
                .unwrap_or_else(|| format!("{}:{}", self.url, destination)),
        })
    }
}

// ==== Test relay ====

/// Records every delivery; optionally fails all of them
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingRelay {
    pub sent: parking_lot::Mutex<Vec<(String, String)>>,
    pub fail: bool,
}

#[cfg(test)]
impl RecordingRelay {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }
}

#[cfg(test)]
#[async_trait]
impl MessagingRelay for RecordingRelay {
    async fn deliver(&self, destination: &str, payload: &str) -> RelayResult<DeliveryHandle> {
        if self.fail {
            return Err(RelayError::Rejected(503));
        }
        let mut sent = self.sent.lock();
        sent.push((destination.to_string(), payload.to_string()));
        Ok(DeliveryHandle {
            channel: "recording".to_string(),
            reference: sent.len().to_string(),
        })
    }
}
