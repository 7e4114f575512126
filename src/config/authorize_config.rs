use anyhow::bail;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct AuthorizeConfig {
    /// HMAC secret used to sign session tokens.
    pub secret: String,
    /// Token lifetime in seconds.
    #[serde(default = "default_token_ttl")]
    pub token_ttl: i64,
    #[serde(default = "default_issuer")]
    pub issuer: String,
}

/// One year.
pub const MAX_TOKEN_TTL: i64 = 60 * 60 * 24 * 365;

fn default_token_ttl() -> i64 {
    60 * 60 * 24
}

fn default_issuer() -> String {
    "devicegate".to_string()
}

impl AuthorizeConfig {
    pub(super) fn validate(&self) -> anyhow::Result<()> {
        if self.secret.trim().is_empty() {
            bail!("Error: [authorize] secret must not be empty.");
        }
        if self.token_ttl <= 0 || self.token_ttl > MAX_TOKEN_TTL {
            bail!(
                "Error: [authorize] token_ttl must be within 1..={MAX_TOKEN_TTL}, got {}.",
                self.token_ttl
            );
        }
        if self.issuer.is_empty() {
            bail!("Error: [authorize] issuer must not be empty.");
        }
        Ok(())
    }
}
