use async_trait::async_trait;

use std::collections::HashMap;
use std::path::Path;

use roost_core::credentials::CredentialProvider;
use roost_core::model::Credentials;
use roost_core::{Error, Result};

/// Credential provider backed by a JSON file mapping company ids to upstream
/// tokens, loaded once at startup. A networked credential store would
/// implement the same trait.
#[derive(Debug, Default)]
pub struct FileCredentialProvider {
    tokens: HashMap<String, String>,
}

impl FileCredentialProvider {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let tokens: HashMap<String, String> = serde_json::from_str(&content)?;
        tracing::info!("Loaded credentials for {} companies", tokens.len());
        Ok(FileCredentialProvider { tokens })
    }
}

#[async_trait]
impl CredentialProvider for FileCredentialProvider {
    async fn credentials(&self, company_id: &str) -> Result<Credentials> {
        let token = self
            .tokens
            .get(company_id)
            .ok_or_else(|| Error::NoCredentials(format!("No credentials for: {}:twitter", company_id)))?;
        Ok(Credentials { token: token.clone() })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn missing_company_fails_with_no_credentials() {
        let provider = FileCredentialProvider::default();
        let error = provider.credentials("test").await.unwrap_err();
        assert!(matches!(error, Error::NoCredentials(_)));
        assert_eq!(error.to_string(), "No credentials for: test:twitter");
    }
}
