// ── Orchestrator ──
//
// Entry point of the composite operations. One orchestrator wraps one
// `HcxClient` (one session) plus the polling policy. Operations are
// strictly sequential inside a call chain; the client's session mutex
// keeps two chains sharing one orchestrator from racing on login.

use std::sync::{Arc, Mutex, PoisonError};

use hcx_api::HcxClient;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::config::{HcxConfig, PollingConfig};
use crate::error::CoreError;
use crate::resolver::Resolver;

/// Drives multi-step changes against one HCX connector.
///
/// Cheaply cloneable via `Arc`. The operations themselves live in the
/// `ops` modules as further `impl Orchestrator` blocks.
#[derive(Clone)]
pub struct Orchestrator {
    inner: Arc<OrchestratorInner>,
}

struct OrchestratorInner {
    config: HcxConfig,
    client: HcxClient,
    cancel: Mutex<CancellationToken>,
}

impl Orchestrator {
    /// Build the client described by `config`. Does not connect; the
    /// first connector call logs in.
    pub fn new(config: HcxConfig) -> Result<Self, CoreError> {
        let client = config.build_client()?;
        Ok(Self {
            inner: Arc::new(OrchestratorInner {
                config,
                client,
                cancel: Mutex::new(CancellationToken::new()),
            }),
        })
    }

    pub fn config(&self) -> &HcxConfig {
        &self.inner.config
    }

    pub fn polling(&self) -> &PollingConfig {
        &self.inner.config.polling
    }

    /// The underlying API client, for calls no composite operation covers.
    pub fn client(&self) -> &HcxClient {
        &self.inner.client
    }

    /// A fresh lookup scope.
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.inner.client)
    }

    /// Token observed by the SDDC wait loops. Cancelling it aborts the
    /// activation or deactivation waits running now with
    /// `CoreError::Cancelled`; once cancelled, it is replaced, so waits
    /// started afterwards run under a fresh token.
    pub fn cancellation_token(&self) -> CancellationToken {
        let mut current = self.inner.cancel.lock().unwrap_or_else(PoisonError::into_inner);
        if current.is_cancelled() {
            *current = CancellationToken::new();
        }
        current.clone()
    }

    /// Log in to the connector now instead of on first use.
    pub async fn connect(&self) -> Result<(), CoreError> {
        self.inner.client.ensure_authenticated().await?;
        info!(url = %self.inner.config.url, "connected to HCX connector");
        Ok(())
    }
}
