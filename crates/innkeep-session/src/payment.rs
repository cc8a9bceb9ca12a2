//! Payment provider client handle.
//!
//! The client is configured by a single publishable key. A missing or
//! malformed key produces a client that reports itself unusable; it
//! never fails session construction.

use std::sync::Arc;

use tracing::warn;

/// Shared by every consumer of one [`SessionContext`](crate::SessionContext).
pub type PaymentClientHandle = Arc<PaymentClient>;

#[derive(Debug)]
pub struct PaymentClient {
    publishable_key: Option<String>,
}

impl PaymentClient {
    /// Build the client from the configured publishable key.
    pub fn load(publishable_key: Option<&str>) -> Self {
        let publishable_key = match publishable_key.map(str::trim) {
            Some(key) if key.starts_with("pk_") => Some(key.to_string()),
            Some(_) => {
                warn!("Payment publishable key is malformed; payments disabled");
                None
            }
            None => {
                warn!("Payment publishable key is not configured; payments disabled");
                None
            }
        };
        Self { publishable_key }
    }

    pub fn is_usable(&self) -> bool {
        self.publishable_key.is_some()
    }

    pub fn publishable_key(&self) -> Option<&str> {
        self.publishable_key.as_deref()
    }
}
