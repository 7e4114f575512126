use anyhow::{Context, anyhow};
use serde::Deserialize;
use std::path::{Path, PathBuf};

mod admin_config;
mod authorize_config;
mod database_config;
mod logs_config;
mod server_config;

pub use admin_config::AdminConfig;
pub use authorize_config::AuthorizeConfig;
pub use database_config::DatabaseConfig;
pub use logs_config::LogsConfig;
pub use server_config::ServerConfig;

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub authorize: AuthorizeConfig,
    pub logs: LogsConfig,
    pub admin: Option<AdminConfig>,
}

impl Config {
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content).with_context(|| {
            "Error: Failed to parse configuration file.\n\
        Please check the file syntax is valid TOML syntax"
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        self.authorize.validate()?;
        if let Some(admin) = &self.admin {
            admin.validate()?;
        }
        Ok(())
    }
}

/// Directory of the configuration file, relative paths in the config resolve against it.
pub fn root_dir(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .map(|it| it.to_path_buf())
        .filter(|it| !it.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn parse_config_path<I>(args: I) -> anyhow::Result<PathBuf>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    args.next();
    while let Some(arg) = args.next() {
        if arg == "-c" || arg == "--config" {
            return args
                .next()
                .map(PathBuf::from)
                .ok_or_else(|| anyhow!("Error: Please specify path string for -c argument."));
        }
    }
    Err(anyhow!(
        "Error: Please specify configuration file argument. Usage: -c <config_file>"
    ))
}

pub fn load(path: &Path) -> anyhow::Result<Config> {
    if !path.is_file() {
        return Err(anyhow!(
            "Error: Configuration file not found or invalid.\n\
        Please make sure that the configuration file exists and is a valid TOML file.\n\
        Expected file path: {:?}",
            path
        ));
    }
    let content = std::fs::read_to_string(path).with_context(|| {
        "Error: Failed to read configuration file.\n\
        Please check the file path and file permissions, and make sure the file is valid accessible"
    })?;
    Config::parse(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [server]
        host = "127.0.0.1"
        port = 8080

        [database]
        url = "sqlite://devicegate.db"

        [authorize]
        secret = "s3cret"

        [logs]
        level = "debug"
    "#;

    #[test]
    fn test_parse_with_defaults() {
        let config = Config::parse(SAMPLE).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.authorize.token_ttl, 86400);
        assert_eq!(config.authorize.issuer, "devicegate");
        assert_eq!(config.logs.level, tracing::Level::DEBUG);
        assert!(config.admin.is_none());
    }

    #[test]
    fn test_reject_empty_secret() {
        let content = SAMPLE.replace("\"s3cret\"", "\"\"");
        assert!(Config::parse(&content).is_err());
    }

    #[test]
    fn test_reject_zero_ttl() {
        let content = SAMPLE.replace("secret = \"s3cret\"", "secret = \"s3cret\"\ntoken_ttl = 0");
        assert!(Config::parse(&content).is_err());
    }

    #[test]
    fn test_ttl_upper_bound() {
        let with_ttl = |ttl: i64| {
            SAMPLE.replace(
                "secret = \"s3cret\"",
                &format!("secret = \"s3cret\"\ntoken_ttl = {ttl}"),
            )
        };
        let max = authorize_config::MAX_TOKEN_TTL;
        let config = Config::parse(&with_ttl(max)).unwrap();
        assert_eq!(config.authorize.token_ttl, max);
        assert!(Config::parse(&with_ttl(max + 1)).is_err());
        assert!(Config::parse(&with_ttl(i64::MAX)).is_err());
    }

    #[test]
    fn test_reject_unknown_log_level() {
        let content = SAMPLE.replace("\"debug\"", "\"verbose\"");
        assert!(Config::parse(&content).is_err());
    }

    #[test]
    fn test_parse_config_path() {
        let args = ["devicegate", "-c", "config.toml"].map(String::from);
        assert_eq!(
            parse_config_path(args).unwrap(),
            PathBuf::from("config.toml")
        );
        let args = ["devicegate", "--config"].map(String::from);
        assert!(parse_config_path(args).is_err());
        let args = ["devicegate"].map(String::from);
        assert!(parse_config_path(args).is_err());
    }

    #[test]
    fn test_root_dir() {
        assert_eq!(root_dir(Path::new("config.toml")), PathBuf::from("."));
        assert_eq!(
            root_dir(Path::new("/etc/devicegate/config.toml")),
            PathBuf::from("/etc/devicegate")
        );
    }
}
