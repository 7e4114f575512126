use serde::Deserialize;
use std::path::Path;

#[derive(Deserialize, Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

impl DatabaseConfig {
    /// Relative `sqlite://` file paths are resolved against `root`.
    pub fn resolve_url(&self, root: &Path) -> String {
        match self.url.strip_prefix("sqlite://") {
            Some(path) if !path.is_empty() && Path::new(path).is_relative() => {
                format!("sqlite://{}", root.join(path).display())
            }
            _ => self.url.clone(),
        }
    }
}
