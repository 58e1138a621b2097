//! Shared helpers for command handlers.

use hcx_core::models::IpRange;
use hcx_core::{ErrorContext, Orchestrator, PairingContext};

use crate::error::CliError;

/// Parse `START-END` into an IP range.
pub fn parse_ip_range(raw: &str) -> Result<IpRange, CliError> {
    let invalid = || CliError::Validation {
        field: "ip-range".into(),
        reason: format!("expected START-END, got '{raw}'"),
    };
    let (start, end) = raw.split_once('-').ok_or_else(invalid)?;
    let (start, end) = (start.trim(), end.trim());
    if start.is_empty() || end.is_empty() {
        return Err(invalid());
    }
    Ok(IpRange {
        start_address: start.to_owned(),
        end_address: end.to_owned(),
    })
}

/// Endpoint id given on the command line, or the local endpoint's.
pub async fn endpoint_or_local(
    orchestrator: &Orchestrator,
    endpoint: Option<String>,
) -> Result<String, CliError> {
    if let Some(id) = endpoint {
        return Ok(id);
    }
    let local = orchestrator
        .resolver()
        .local_cloud()
        .await
        .context("reading local cloud endpoint")?;
    Ok(local.endpoint_id)
}

/// The pairing context of `url`. VMware Cloud profiles never touch the
/// pairing, so they may go without one.
pub async fn pairing_context(
    orchestrator: &Orchestrator,
    url: Option<&str>,
    vmc: bool,
) -> Result<PairingContext, CliError> {
    match url {
        Some(url) => Ok(orchestrator.site_pairing(url).await?),
        None if vmc => Ok(PairingContext::default()),
        None => Err(CliError::Validation {
            field: "site-pairing".into(),
            reason: "required unless --vmc is set".into(),
        }),
    }
}
