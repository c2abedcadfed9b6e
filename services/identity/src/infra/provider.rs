use anyhow::anyhow;
use serde::Deserialize;

use crate::domain::repository::CredentialProvider;
use crate::domain::types::{CredentialCheck, NewAccount};
use crate::error::IdentityError;

/// Connection settings for the identity provider's REST API.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    /// REST base URL, e.g. "https://graph.example.com/v1.0".
    pub base_url: String,
    /// OAuth token endpoint, used for both the app grant and credential checks.
    pub token_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub scope: String,
}

/// HTTP adapter for the credential-delegate port. Every operation is a
/// single attempt; failures come back typed and nothing retries here.
#[derive(Clone)]
pub struct HttpCredentialProvider {
    pub http: reqwest::Client,
    pub settings: ProviderSettings,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct CreatedAccount {
    id: String,
}

impl HttpCredentialProvider {
    /// Acquire an app bearer via the client-credentials grant.
    async fn access_token(&self) -> anyhow::Result<String> {
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.settings.client_id.as_str()),
            ("client_secret", self.settings.client_secret.as_str()),
            ("scope", self.settings.scope.as_str()),
        ];
        let resp = self
            .http
            .post(&self.settings.token_url)
            .form(&form)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(anyhow!(
                "provider token endpoint returned {}",
                resp.status()
            ));
        }
        let token: TokenResponse = resp.json().await?;
        Ok(token.access_token)
    }
}

impl CredentialProvider for HttpCredentialProvider {
    async fn create_account(&self, account: &NewAccount) -> Result<String, IdentityError> {
        let bearer = self.access_token().await.map_err(IdentityError::Internal)?;
        let body = serde_json::json!({
            "accountEnabled": true,
            "displayName": format!("{} {}", account.first_name, account.last_name),
            "mail": account.email,
            "passwordProfile": {
                "password": account.password,
                "forceChangePasswordNextSignIn": false,
            },
        });
        let resp = self
            .http
            .post(format!("{}/users", self.settings.base_url))
            .bearer_auth(bearer)
            .json(&body)
            .send()
            .await
            .map_err(|e| IdentityError::Internal(e.into()))?;
        match resp.status() {
            s if s.is_success() => {
                let created: CreatedAccount = resp
                    .json()
                    .await
                    .map_err(|e| IdentityError::Internal(e.into()))?;
                Ok(created.id)
            }
            reqwest::StatusCode::CONFLICT => Err(IdentityError::EmailTaken),
            s => Err(IdentityError::Internal(anyhow!(
                "provider create account returned {s}"
            ))),
        }
    }

    async fn delete_account(&self, subject_id: &str) -> Result<bool, IdentityError> {
        let bearer = self.access_token().await.map_err(IdentityError::Internal)?;
        let resp = self
            .http
            .delete(format!("{}/users/{subject_id}", self.settings.base_url))
            .bearer_auth(bearer)
            .send()
            .await
            .map_err(|e| IdentityError::Internal(e.into()))?;
        match resp.status() {
            s if s.is_success() => Ok(true),
            reqwest::StatusCode::NOT_FOUND => Ok(false),
            s => Err(IdentityError::Internal(anyhow!(
                "provider delete account returned {s}"
            ))),
        }
    }

    async fn change_password(
        &self,
        subject_id: &str,
        new_password: &str,
    ) -> Result<(), IdentityError> {
        let bearer = self
            .access_token()
            .await
            .map_err(IdentityError::CredentialUpdate)?;
        let body = serde_json::json!({
            "passwordProfile": {
                "password": new_password,
                "forceChangePasswordNextSignIn": false,
            },
        });
        let resp = self
            .http
            .patch(format!("{}/users/{subject_id}", self.settings.base_url))
            .bearer_auth(bearer)
            .json(&body)
            .send()
            .await
            .map_err(|e| IdentityError::CredentialUpdate(e.into()))?;
        if !resp.status().is_success() {
            return Err(IdentityError::CredentialUpdate(anyhow!(
                "provider change password returned {}",
                resp.status()
            )));
        }
        Ok(())
    }

    async fn validate_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<CredentialCheck, IdentityError> {
        let form = [
            ("grant_type", "password"),
            ("username", email),
            ("password", password),
            ("client_id", self.settings.client_id.as_str()),
            ("client_secret", self.settings.client_secret.as_str()),
            ("scope", self.settings.scope.as_str()),
        ];
        let resp = self
            .http
            .post(&self.settings.token_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| IdentityError::Internal(e.into()))?;
        match resp.status() {
            s if s.is_success() => {
                let token: TokenResponse = resp
                    .json()
                    .await
                    .map_err(|e| IdentityError::Internal(e.into()))?;
                Ok(CredentialCheck {
                    valid: true,
                    token: Some(token.access_token),
                })
            }
            // A rejected grant is a result, not a transport failure.
            reqwest::StatusCode::BAD_REQUEST | reqwest::StatusCode::UNAUTHORIZED => {
                Ok(CredentialCheck {
                    valid: false,
                    token: None,
                })
            }
            s => Err(IdentityError::Internal(anyhow!(
                "provider credential check returned {s}"
            ))),
        }
    }
}
