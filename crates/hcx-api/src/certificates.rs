use tracing::debug;

use crate::auth::AuthKind;
use crate::client::HcxClient;
use crate::error::Error;
use crate::models::{CertificateRequest, SuccessFlag};

impl HcxClient {
    /// Add a PEM certificate to the connector's trust store.
    ///
    /// `POST /hybridity/api/admin/certificates`, authorized with the
    /// connector session token.
    pub async fn insert_certificate(&self, certificate: &str) -> Result<SuccessFlag, Error> {
        let url = self.api_url("/hybridity/api/admin/certificates")?;
        debug!(bytes = certificate.len(), "installing certificate");
        let body = CertificateRequest {
            certificate: certificate.to_owned(),
        };
        self.post(AuthKind::Consumer, url, &body).await
    }
}
