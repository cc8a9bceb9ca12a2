//! The session context object.

use innkeep_core::models::user::UserRole;
use tokio::sync::{OnceCell, watch};
use tracing::debug;

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::notification::{Notification, NotificationSlot, Severity};
use crate::payment::{PaymentClient, PaymentClientHandle};
use crate::state::AuthState;
use crate::verifier::Verifier;

/// Client-side source of truth for authentication state, the pending
/// notification and the payment client handle.
///
/// Share it by reference or behind an `Arc`; every method takes `&self`.
pub struct SessionContext<V: Verifier> {
    config: SessionConfig,
    verifier: V,
    auth: watch::Sender<AuthState>,
    notification: NotificationSlot,
    payment: OnceCell<PaymentClientHandle>,
}

impl<V: Verifier> SessionContext<V> {
    pub fn new(config: SessionConfig, verifier: V) -> Self {
        Self {
            config,
            verifier,
            auth: watch::Sender::new(AuthState::Unknown),
            notification: NotificationSlot::new(),
            payment: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Issue the one verification request and settle the state.
    ///
    /// Any failure, including exceeding `verify_timeout`, settles to
    /// [`AuthState::Unauthenticated`]. Nothing is retried and no
    /// notification is raised.
    pub async fn initialize(&self) -> AuthState {
        self.auth.send_replace(AuthState::Unknown);

        let outcome = tokio::time::timeout(self.config.verify_timeout, self.verifier.verify())
            .await
            .unwrap_or(Err(SessionError::Timeout));

        let state = match outcome {
            Ok(identity) => {
                debug!(role = %identity.role, "Session verified");
                AuthState::Authenticated(identity.role)
            }
            Err(err) => {
                debug!(error = %err, "Session not verified; continuing anonymously");
                AuthState::Unauthenticated
            }
        };

        self.auth.send_replace(state);
        state
    }

    /// Current state without waiting.
    pub fn auth_state(&self) -> AuthState {
        *self.auth.borrow()
    }

    /// Wait until the verification call has settled.
    pub async fn settled(&self) -> AuthState {
        let mut rx = self.auth.subscribe();
        match rx.wait_for(AuthState::is_settled).await {
            Ok(state) => *state,
            Err(_) => AuthState::Unauthenticated,
        }
    }

    pub fn subscribe_auth(&self) -> watch::Receiver<AuthState> {
        self.auth.subscribe()
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth_state().is_authenticated()
    }

    pub fn role(&self) -> Option<UserRole> {
        self.auth_state().role()
    }

    /// Replace any pending notification.
    pub fn notify(&self, text: impl Into<String>, severity: Severity) {
        self.notification.set(Notification::new(text, severity));
    }

    pub fn notify_error(&self, err: &dyn std::fmt::Display) {
        self.notification.set(Notification::error(err));
    }

    pub fn dismiss_notification(&self) {
        self.notification.clear();
    }

    pub fn notification(&self) -> Option<Notification> {
        self.notification.current()
    }

    pub fn subscribe_notifications(&self) -> watch::Receiver<Option<Notification>> {
        self.notification.subscribe()
    }

    /// The payment client, created on first call and shared afterwards.
    pub async fn payment_client(&self) -> PaymentClientHandle {
        self.payment
            .get_or_init(|| async {
                PaymentClientHandle::new(PaymentClient::load(
                    self.config.payment_publishable_key.as_deref(),
                ))
            })
            .await
            .clone()
    }
}
