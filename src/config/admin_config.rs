use anyhow::bail;
use serde::Deserialize;

/// Administrator account ensured at startup.
#[derive(Deserialize, Debug, Clone)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
}

impl AdminConfig {
    pub(super) fn validate(&self) -> anyhow::Result<()> {
        if self.username.trim().is_empty() || self.password.is_empty() {
            bail!("Error: [admin] username and password must not be empty.");
        }
        Ok(())
    }
}
