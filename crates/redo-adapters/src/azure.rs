// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Azure Service Bus transport adapter.
//!
//! There is no dedicated Service Bus SDK in the dependency stack this crate
//! draws from, so this is a thin REST client over the HTTP API (peek-lock
//! receive, `Complete` to ack, `send` to publish) built on `reqwest`, with
//! the SAS token signed via the `hmac`/`sha2`/`base64` primitives the wider
//! Azure ecosystem (and `azure_core` itself) builds its own signing on. The
//! receiver polls in a loop since the REST surface has no long-poll
//! equivalent to SQS's `wait_time_seconds`.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use hmac::{Hmac, Mac};
use redo_core::{AckTag, RedoRecord};
use sha2::Sha256;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::transport::{AdapterError, Delivery, TransportAdapter};

const CARRIER: &str = "azure";
const POLL_INTERVAL: Duration = Duration::from_secs(2);
const TOKEN_TTL_SECS: u64 = 300;

#[derive(Debug, Clone)]
pub struct AzureConfig {
    pub namespace: String,
    pub queue: String,
    pub sas_key_name: String,
    pub sas_key: String,
}

impl AzureConfig {
    fn base_url(&self) -> String {
        format!("https://{}.servicebus.windows.net/{}", self.namespace, self.queue)
    }

    /// Signs a SAS token per the Service Bus REST auth scheme: HMAC-SHA256
    /// over `urlencode(uri) + "\n" + expiry`, base64-encoded.
    fn sas_token(&self, expiry_unix: u64) -> Result<String, AdapterError> {
        let encoded_uri = urlencoding::encode(&self.base_url()).into_owned();
        let string_to_sign = format!("{encoded_uri}\n{expiry_unix}");

        let mut mac = Hmac::<Sha256>::new_from_slice(self.sas_key.as_bytes())
            .map_err(|e| AdapterError::Connect { carrier: CARRIER, message: e.to_string() })?;
        mac.update(string_to_sign.as_bytes());
        let signature = base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes());

        Ok(format!(
            "SharedAccessSignature sr={encoded_uri}&sig={}&se={expiry_unix}&skn={}",
            urlencoding::encode(&signature),
            self.sas_key_name,
        ))
    }

    fn signed_now(&self) -> Result<String, AdapterError> {
        let expiry = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs() + TOKEN_TTL_SECS)
            .unwrap_or(TOKEN_TTL_SECS);
        self.sas_token(expiry)
    }
}

pub struct AzureAdapter {
    config: AzureConfig,
    http: reqwest::Client,
}

impl AzureAdapter {
    pub fn new(config: AzureConfig) -> Self {
        Self { config, http: reqwest::Client::new() }
    }
}

#[async_trait]
impl TransportAdapter for AzureAdapter {
    async fn publish(&self, record: &RedoRecord) -> Result<(), AdapterError> {
        let token = self.config.signed_now()?;
        let url = format!("{}/messages", self.config.base_url());
        let response = self
            .http
            .post(url)
            .header("Authorization", token)
            .body(record.as_str().to_string())
            .send()
            .await
            .map_err(|e| AdapterError::PublishExhausted { carrier: CARRIER, message: e.to_string() })?;

        if !response.status().is_success() {
            return Err(AdapterError::PublishExhausted {
                carrier: CARRIER,
                message: format!("unexpected status {}", response.status()),
            });
        }
        Ok(())
    }

    async fn subscribe(&self) -> Result<mpsc::Receiver<Delivery>, AdapterError> {
        let (tx, rx) = mpsc::channel(16);
        let config = self.config.clone();
        let http = self.http.clone();

        tokio::spawn(async move {
            loop {
                let token = match config.signed_now() {
                    Ok(token) => token,
                    Err(e) => {
                        warn!(carrier = CARRIER, error = %e, "failed to sign request");
                        tokio::time::sleep(POLL_INTERVAL).await;
                        continue;
                    }
                };
                let url = format!("{}/messages/head", config.base_url());
                let response = http.delete(url).header("Authorization", token).send().await;

                match response {
                    Ok(response) if response.status().as_u16() == 200 => {
                        let Some(lock_location) = response
                            .headers()
                            .get("Location")
                            .and_then(|v| v.to_str().ok())
                            .map(|s| s.to_string())
                        else {
                            continue;
                        };
                        let body = response.text().await.unwrap_or_default();
                        let tag = AckTag::MessageObject(lock_location);
                        if tx.send((RedoRecord::new(body), tag)).await.is_err() {
                            info!(carrier = CARRIER, "receiver dropped, stopping poll loop");
                            return;
                        }
                    }
                    Ok(response) if response.status().as_u16() == 204 => {
                        tokio::time::sleep(POLL_INTERVAL).await;
                    }
                    Ok(response) => {
                        warn!(carrier = CARRIER, status = %response.status(), "unexpected peek-lock status");
                        tokio::time::sleep(POLL_INTERVAL).await;
                    }
                    Err(e) => {
                        warn!(carrier = CARRIER, error = %e, "peek-lock request failed");
                        tokio::time::sleep(POLL_INTERVAL).await;
                    }
                }
            }
        });

        Ok(rx)
    }

    async fn acknowledge(&self, tag: AckTag) -> Result<(), AdapterError> {
        let AckTag::MessageObject(lock_location) = tag else {
            return Err(AdapterError::AcknowledgeFailed {
                carrier: CARRIER,
                message: "expected a MessageObject ack".to_string(),
            });
        };
        let token = self.config.signed_now()?;
        let response = self
            .http
            .delete(lock_location)
            .header("Authorization", token)
            .send()
            .await
            .map_err(|e| AdapterError::AcknowledgeFailed { carrier: CARRIER, message: e.to_string() })?;

        if !response.status().is_success() {
            return Err(AdapterError::AcknowledgeFailed {
                carrier: CARRIER,
                message: format!("unexpected status {}", response.status()),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "azure_tests.rs"]
mod tests;
