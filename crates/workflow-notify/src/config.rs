use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

const DEFAULT_CONFIG_NAME: &str = "workflow-notify.toml";
pub const DEFAULT_WEBHOOK: &str = "default";

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Overrides the attachment footer icon.
    pub footer_icon: Option<String>,
    #[serde(default)]
    pub webhooks: HashMap<String, Webhook>,
}

#[derive(Debug, Deserialize)]
pub struct Webhook {
    pub url: String,
}

impl Config {
    /// Load configuration from an explicit path, or search upward from the
    /// current dir and then the user config dir. Having no file at all is fine.
    pub fn load(path_override: Option<PathBuf>) -> Result<Self> {
        let path = match path_override {
            Some(p) => p,
            None => match find_upwards(DEFAULT_CONFIG_NAME).or_else(user_config) {
                Some(p) => p,
                None => {
                    debug!("no {DEFAULT_CONFIG_NAME} found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Reading config file {}", path.display()))?;
        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Parsing TOML config {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(cfg)
    }

    pub fn webhook(&self, name: &str) -> Result<&Webhook> {
        self.webhooks
            .get(name)
            .with_context(|| format!("Webhook '{}' not found in config", name))
    }

    /// Pick the webhook URL: an explicit URL wins over the named config entry.
    pub fn resolve_webhook_url(&self, explicit: Option<&str>, profile: Option<&str>) -> Result<String> {
        if let Some(url) = explicit.filter(|u| !u.is_empty()) {
            return Ok(url.to_string());
        }
        let name = profile.unwrap_or(DEFAULT_WEBHOOK);
        self.webhook(name)
            .map(|w| w.url.clone())
            .with_context(|| "No webhook URL: pass --webhook-url, set SLACK_WEBHOOK_URL, or add it to the config")
    }
}

fn find_upwards(file_name: &str) -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    loop {
        let candidate = dir.join(file_name);
        if candidate.exists() {
            return Some(candidate);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

fn user_config() -> Option<PathBuf> {
    let candidate = dirs::config_dir()?.join("workflow-notify").join("config.toml");
    candidate.exists().then_some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(toml: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(toml.as_bytes()).unwrap();
        file
    }

    #[test]
    fn load_config_success() {
        let file = write_config(
            r#"footer_icon = "https://icons.example/ci.png"

[webhooks.default]
url = "https://hooks.slack.com/services/T/B/default"

[webhooks.releases]
url = "https://hooks.slack.com/services/T/B/releases"
"#,
        );

        let cfg = Config::load(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(cfg.footer_icon.as_deref(), Some("https://icons.example/ci.png"));
        assert_eq!(
            cfg.webhook("releases").unwrap().url,
            "https://hooks.slack.com/services/T/B/releases"
        );
        assert_eq!(
            cfg.resolve_webhook_url(None, None).unwrap(),
            "https://hooks.slack.com/services/T/B/default"
        );
    }

    #[test]
    fn explicit_url_wins() {
        let file = write_config("[webhooks.default]\nurl = \"https://from-config\"\n");
        let cfg = Config::load(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(
            cfg.resolve_webhook_url(Some("https://explicit"), None).unwrap(),
            "https://explicit"
        );
    }

    #[test]
    fn missing_webhook_errors() {
        let cfg = Config::default();
        assert!(cfg.webhook("does_not_exist").is_err());
        let err = cfg.resolve_webhook_url(None, Some("ops")).unwrap_err();
        assert!(err.to_string().contains("No webhook URL"));
    }

    #[test]
    fn explicit_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(Some(dir.path().join("nope.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn invalid_toml_errors() {
        let file = write_config("webhooks = 3");
        assert!(Config::load(Some(file.path().to_path_buf())).is_err());
    }
}
