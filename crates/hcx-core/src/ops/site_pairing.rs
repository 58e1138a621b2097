// ── Site pairing ──
//
// Creating a pairing can fail for one recoverable reason: the connector
// does not trust the remote site's certificate yet. The failure carries
// the certificate, so it is installed and the pairing submitted exactly
// once more. Pairing jobs are also known to stall; a job still running
// after a bounded number of polls is submitted once more too.

use hcx_api::models::{CloudScope, RemoteSite, SitePairingError, SitePairingResult};
use secrecy::SecretString;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{CoreError, ErrorContext};
use crate::orchestrator::Orchestrator;
use crate::poller::{PollPolicy, await_job};

/// A pairing to create.
#[derive(Debug, Clone)]
pub struct NewSitePairing {
    /// Remote connector URL.
    pub url: String,
    pub username: String,
    pub password: SecretString,
}

impl NewSitePairing {
    fn remote(&self) -> RemoteSite {
        RemoteSite {
            username: self.username.clone(),
            password: self.password.clone(),
            url: self.url.clone(),
            endpoint_id: String::new(),
            cloud_type: String::new(),
        }
    }
}

/// What downstream operations need to know about an existing pairing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PairingContext {
    /// Remote connector URL.
    pub url: String,
    /// Endpoint id of the remote site; the pairing's own id.
    pub remote_endpoint_id: String,
    pub remote_name: String,
    pub remote_endpoint_type: String,
    pub remote_resource_id: String,
    pub remote_resource_name: String,
    pub remote_resource_type: String,
    /// Instance UUID of the local vCenter.
    pub local_vc: String,
    pub local_endpoint_id: String,
    pub local_name: String,
}

/// How the connector answered one pairing submission.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Submission {
    Accepted { job_id: String },
    UntrustedCertificate { certificate: String },
    LoginFailure { message: String },
    Rejected { errors: String },
}

impl Submission {
    fn classify(result: &SitePairingResult) -> Self {
        let Some(first) = result.errors.first() else {
            return Self::Accepted {
                job_id: result.data.job_id.clone(),
            };
        };
        if first.error == SitePairingError::LOGIN_FAILURE {
            return Self::LoginFailure {
                message: first.text.clone(),
            };
        }
        match first.certificate() {
            Some(certificate) => Self::UntrustedCertificate {
                certificate: certificate.to_owned(),
            },
            None => Self::Rejected {
                errors: render_errors(&result.errors),
            },
        }
    }

    fn into_error(self, url: &str) -> CoreError {
        match self {
            Self::LoginFailure { message } => CoreError::Authentication {
                message: format!("remote site {url} rejected the credentials: {message}"),
            },
            Self::Rejected { errors } => CoreError::OperationFailed {
                operation: "site pairing".into(),
                id: url.to_owned(),
                reason: errors,
            },
            Self::UntrustedCertificate { .. } => CoreError::OperationFailed {
                operation: "site pairing".into(),
                id: url.to_owned(),
                reason: "remote certificate still untrusted after installing it".into(),
            },
            Self::Accepted { job_id } => CoreError::OperationFailed {
                operation: "site pairing".into(),
                id: url.to_owned(),
                reason: format!("unexpected acceptance (job {job_id})"),
            },
        }
    }
}

fn render_errors(errors: &[SitePairingError]) -> String {
    errors
        .iter()
        .map(|e| {
            if e.text.is_empty() {
                e.error.clone()
            } else {
                format!("{}: {}", e.error, e.text)
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

impl Orchestrator {
    /// Pair with a remote site and wait for the pairing job.
    ///
    /// Returns the context of the new pairing.
    pub async fn create_site_pairing(
        &self,
        pairing: &NewSitePairing,
    ) -> Result<PairingContext, CoreError> {
        let client = self.client();
        let remote = pairing.remote();
        let url = pairing.url.as_str();

        let first = client
            .insert_site_pairing(&remote)
            .await
            .context("submitting site pairing")?;
        let job_id = match Submission::classify(&first) {
            Submission::Accepted { job_id } => job_id,
            Submission::UntrustedCertificate { certificate } => {
                warn!(url, "remote certificate not trusted, installing it");
                client
                    .insert_certificate(&certificate)
                    .await
                    .context("installing remote certificate")?;
                let second = client
                    .insert_site_pairing(&remote)
                    .await
                    .context("resubmitting site pairing")?;
                match Submission::classify(&second) {
                    Submission::Accepted { job_id } => job_id,
                    other => return Err(other.into_error(url)),
                }
            }
            other => return Err(other.into_error(url)),
        };

        let policy = self.polling().pairing_policy();
        if !self.await_pairing_job(&job_id, &policy).await? {
            warn!(url, job_id, "pairing job stalled, submitting the pairing once more");
            let again = client
                .insert_site_pairing(&remote)
                .await
                .context("resubmitting stalled site pairing")?;
            match Submission::classify(&again) {
                Submission::Accepted { job_id } => {
                    if !self.await_pairing_job(&job_id, &policy).await? {
                        warn!(url, job_id, "pairing job still running, continuing");
                    }
                }
                other => warn!(url, ?other, "resubmission not accepted, checking the pairing list"),
            }
        }

        info!(url, "site pairing created");
        self.site_pairing(url).await
    }

    /// `Ok(false)` when the job is still running after the bounded polls.
    async fn await_pairing_job(&self, job_id: &str, policy: &PollPolicy) -> Result<bool, CoreError> {
        match await_job(self.client(), job_id, policy).await {
            Ok(_) => Ok(true),
            Err(CoreError::PollLimitReached { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Look up the pairing with the remote site at `url` and gather the
    /// endpoint and container details around it.
    pub async fn site_pairing(&self, url: &str) -> Result<PairingContext, CoreError> {
        let resolver = self.resolver();
        let pairing = resolver
            .site_pairing(url)
            .await
            .context("looking up site pairing")?;
        let local_container = resolver
            .container(CloudScope::Local)
            .await
            .context("reading local resource container")?;
        let remote_container = resolver
            .container(CloudScope::Remote)
            .await
            .context("reading remote resource container")?;
        // A fresh pairing can be missing from the remote cloud list for a while.
        let (remote_name, remote_endpoint_type) = match resolver.remote_cloud(url).await {
            Ok(cloud) => (cloud.name, cloud.endpoint_type),
            Err(e) if e.is_not_found() => {
                warn!(url, "remote site not in the cloud list yet");
                (String::new(), String::new())
            }
            Err(e) => return Err(e).context("reading remote cloud endpoint"),
        };
        let local_cloud = resolver
            .local_cloud()
            .await
            .context("reading local cloud endpoint")?;

        Ok(PairingContext {
            url: pairing.url,
            remote_endpoint_id: pairing.endpoint_id,
            remote_name,
            remote_endpoint_type,
            remote_resource_id: remote_container.resource_id,
            remote_resource_name: remote_container.resource_name,
            remote_resource_type: remote_container.resource_type,
            local_vc: local_container.vcuuid,
            local_endpoint_id: local_cloud.endpoint_id,
            local_name: local_cloud.name,
        })
    }

    /// Remove the pairing with `url` and wait until it leaves the pairing
    /// list. A pairing that does not exist is already deleted.
    pub async fn delete_site_pairing(&self, url: &str) -> Result<(), CoreError> {
        let client = self.client();
        let pairing = match self.resolver().site_pairing(url).await {
            Ok(pairing) => pairing,
            Err(e) if e.is_not_found() => {
                info!(url, "no site pairing to delete");
                return Ok(());
            }
            Err(e) => return Err(e).context("looking up site pairing"),
        };
        client
            .delete_site_pairing(&pairing.endpoint_id)
            .await
            .context("deleting site pairing")?;

        let polling = self.polling();
        let mut polls: u32 = 0;
        loop {
            let pairings = client
                .list_site_pairings()
                .await
                .context("waiting for site pairing removal")?;
            polls += 1;
            if !pairings.iter().any(|p| p.url == url) {
                info!(url, "site pairing deleted");
                return Ok(());
            }
            if polls >= polling.pairing_delete_attempts {
                return Err(CoreError::PollLimitReached {
                    operation: "site pairing removal".into(),
                    id: url.to_owned(),
                    attempts: polls,
                });
            }
            tokio::time::sleep(polling.pairing_delete_interval).await;
        }
    }
}
