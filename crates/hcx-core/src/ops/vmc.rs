// ── VMware Cloud SDDC activation ──
//
// Activation and deactivation go through the cloud services control plane
// and take tens of minutes. The SDDC list is polled at a fixed interval
// while it answers; failed fetches back off exponentially against a retry
// budget. Every wait observes the orchestrator's cancellation token.

use std::time::Duration;

use hcx_api::models::{DeploymentStatus, Sddc};
use strum::Display;
use tracing::{debug, info, warn};

use crate::backoff::RetryBudget;
use crate::entity::EntityKind;
use crate::error::{CoreError, ErrorContext};
use crate::orchestrator::Orchestrator;
use crate::resolver::SddcSelector;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
enum Transition {
    #[strum(serialize = "SDDC activation")]
    Activate,
    #[strum(serialize = "SDDC deactivation")]
    Deactivate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Progress {
    Done,
    Failed,
    Pending,
}

impl Transition {
    fn observe(self, status: &DeploymentStatus) -> Progress {
        use DeploymentStatus as S;
        match (self, status) {
            (Self::Activate, S::Active) => Progress::Done,
            (Self::Activate, S::ActivationFailed) => Progress::Failed,
            (Self::Activate, S::Deactivated | S::DeactivationFailed | S::Missing | S::Other(_)) => {
                Progress::Pending
            }
            // An SDDC reporting no status at all no longer runs HCX.
            (Self::Deactivate, S::Deactivated | S::Missing) => Progress::Done,
            (Self::Deactivate, S::DeactivationFailed) => Progress::Failed,
            (Self::Deactivate, S::Active | S::ActivationFailed | S::Other(_)) => Progress::Pending,
        }
    }
}

impl Orchestrator {
    async fn open_cloud_session(&self) -> Result<(), CoreError> {
        self.client()
            .authenticate_cloud()
            .await
            .context("authenticating with cloud services")
    }

    /// Look up an SDDC through cloud services.
    pub async fn sddc(&self, selector: &SddcSelector) -> Result<Sddc, CoreError> {
        self.open_cloud_session().await?;
        self.resolver().sddc(selector).await
    }

    /// Activate HCX on an SDDC and wait until it reports `ACTIVE`.
    ///
    /// An SDDC that is already active is refused with `AlreadyActive`.
    pub async fn activate_sddc(&self, selector: &SddcSelector) -> Result<Sddc, CoreError> {
        let sddc = self.sddc(selector).await.context("looking up SDDC")?;
        if sddc.deployment_status == DeploymentStatus::Active {
            return Err(CoreError::AlreadyActive { sddc: sddc.id });
        }

        self.client()
            .activate_sddc(&sddc.id)
            .await
            .context("requesting SDDC activation")?;
        info!(sddc = %sddc.id, name = %sddc.name, "HCX activation requested");

        let active = self
            .await_sddc(selector, Transition::Activate)
            .await?
            .ok_or_else(|| CoreError::not_found(EntityKind::Sddc, selector.to_string()))?;
        info!(sddc = %active.id, "HCX active on SDDC");
        Ok(active)
    }

    /// Deactivate HCX on an SDDC and wait until it reports `DE-ACTIVATED`
    /// or disappears from the list.
    pub async fn deactivate_sddc(&self, selector: &SddcSelector) -> Result<(), CoreError> {
        let sddc = self.sddc(selector).await.context("looking up SDDC")?;
        self.client()
            .deactivate_sddc(&sddc.id)
            .await
            .context("requesting SDDC deactivation")?;
        info!(sddc = %sddc.id, name = %sddc.name, "HCX deactivation requested");

        self.await_sddc(selector, Transition::Deactivate).await?;
        info!(sddc = %sddc.id, "HCX deactivated on SDDC");
        Ok(())
    }

    /// Poll until `transition` settles. `Ok(None)` means the SDDC left the
    /// list during a deactivation.
    async fn await_sddc(
        &self,
        selector: &SddcSelector,
        transition: Transition,
    ) -> Result<Option<Sddc>, CoreError> {
        let polling = self.polling();
        let cancel = self.cancellation_token();
        let mut budget = RetryBudget::new(polling.sddc_backoff.clone());

        loop {
            let delay: Duration = match self.resolver().sddc(selector).await {
                Ok(sddc) => match transition.observe(&sddc.deployment_status) {
                    Progress::Done => return Ok(Some(sddc)),
                    Progress::Failed => {
                        return Err(CoreError::OperationFailed {
                            operation: transition.to_string(),
                            id: sddc.id,
                            reason: format!("deployment status {}", sddc.deployment_status),
                        });
                    }
                    Progress::Pending => {
                        debug!(sddc = %sddc.id, status = %sddc.deployment_status, "{transition} in progress");
                        polling.sddc_interval
                    }
                },
                Err(e) if transition == Transition::Deactivate && e.is_not_found() => {
                    info!(%selector, "SDDC no longer listed");
                    return Ok(None);
                }
                Err(e) => {
                    warn!(error = %e, failures = budget.failures() + 1, "SDDC status unavailable");
                    budget.record_failure(&transition.to_string(), e)?
                }
            };

            tokio::select! {
                () = cancel.cancelled() => {
                    return Err(CoreError::Cancelled {
                        operation: transition.to_string(),
                    });
                }
                () = tokio::time::sleep(delay) => {}
            }
        }
    }
}
