use async_trait::async_trait;

use crate::error::Result;
use crate::model::Credentials;

/// Lookup of the upstream access token stored for a company.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Fails with [`Error::NoCredentials`](crate::Error::NoCredentials) when
    /// the company has no stored token.
    async fn credentials(&self, company_id: &str) -> Result<Credentials>;
}
