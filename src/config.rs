use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Deserialize;
use url::Url;

use crate::log_info;

// Upstream endpoints
pub const AUR_RPC_URL: &str = "https://aur.archlinux.org/rpc/";
pub const AUR_RPC_VERSION: &str = "5";
pub const AUR_PACKAGES_URL: &str = "https://aur.archlinux.org/packages/";
pub const ARCH_SEARCH_URL: &str = "https://archlinux.org/packages/search/json/";
pub const ARCH_PACKAGES_URL: &str = "https://archlinux.org/packages/";

pub const TIMEOUT_SECONDS: u64 = 10;
pub const CACHE_TTL_SECONDS: u64 = 300; // 5 minutes
pub const USER_AGENT: &str = concat!("arch-pkg-search/", env!("CARGO_PKG_VERSION"));

// Default launcher triggers
pub const AUR_TRIGGER: &str = "aur ";
pub const OFFICIAL_TRIGGER: &str = "repo ";
pub const BOTH_TRIGGER: &str = "pkg ";

/// Environment variable naming a TOML config file
pub const CONFIG_ENV: &str = "ARCH_PKG_SEARCH_CONFIG";

/// Which package databases a query is sent to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    #[default]
    Both,
    Official,
    Aur,
}

impl Scope {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "both" | "all" => Some(Scope::Both),
            "official" | "repo" | "repos" => Some(Scope::Official),
            "aur" => Some(Scope::Aur),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable terminal listing
    #[default]
    Text,
    /// JSON envelope with launcher items (HTML markup)
    Json,
    /// Launcher items as plain HTML-marked text lines
    Html,
}

/// Launcher trigger prefixes, matched case-insensitively
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Triggers {
    pub aur: String,
    pub official: String,
    pub both: String,
}

impl Default for Triggers {
    fn default() -> Self {
        Self {
            aur: AUR_TRIGGER.to_string(),
            official: OFFICIAL_TRIGGER.to_string(),
            both: BOTH_TRIGGER.to_string(),
        }
    }
}

/// Runtime settings: defaults < TOML file < environment < CLI flags
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub aur_rpc_url: String,
    pub official_search_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub limit: Option<usize>,
    pub default_scope: Scope,
    /// Ignore queries that carry no trigger
    pub require_trigger: bool,
    /// 0 disables the response cache
    pub cache_ttl_secs: u64,
    pub icon: Option<String>,
    pub triggers: Triggers,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            aur_rpc_url: AUR_RPC_URL.to_string(),
            official_search_url: ARCH_SEARCH_URL.to_string(),
            timeout_secs: TIMEOUT_SECONDS,
            user_agent: USER_AGENT.to_string(),
            limit: None,
            default_scope: Scope::Both,
            require_trigger: false,
            cache_ttl_secs: CACHE_TTL_SECONDS,
            icon: None,
            triggers: Triggers::default(),
        }
    }
}

impl Settings {
    /// Resolve settings for a CLI invocation
    pub fn load(cli: &Cli) -> Result<Self> {
        let _ = dotenv::dotenv();

        let config_path = cli
            .config
            .clone()
            .or_else(|| std::env::var(CONFIG_ENV).ok().map(PathBuf::from));

        let mut settings = match config_path {
            Some(path) => Self::load_file(&path)?,
            None => Self::default(),
        };

        settings.apply_env_from(|key| std::env::var(key).ok())?;
        settings.apply_cli(cli);
        settings.validate()?;
        Ok(settings)
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let settings = Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        log_info!("Loaded configuration from {}", path.display());
        Ok(settings)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply environment overrides through `lookup`
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("AUR_RPC_URL") {
            self.aur_rpc_url = url;
        }
        if let Some(url) = lookup("ARCH_SEARCH_URL") {
            self.official_search_url = url;
        }
        if let Some(timeout) = lookup("ARCH_PKG_SEARCH_TIMEOUT") {
            self.timeout_secs = timeout
                .trim()
                .parse()
                .context("ARCH_PKG_SEARCH_TIMEOUT must be a number of seconds")?;
        }
        if let Some(limit) = lookup("ARCH_PKG_SEARCH_LIMIT") {
            self.limit = Some(
                limit
                    .trim()
                    .parse()
                    .context("ARCH_PKG_SEARCH_LIMIT must be a positive integer")?,
            );
        }
        if let Some(ttl) = lookup("ARCH_PKG_SEARCH_CACHE_TTL") {
            self.cache_ttl_secs = ttl
                .trim()
                .parse()
                .context("ARCH_PKG_SEARCH_CACHE_TTL must be a number of seconds")?;
        }
        if let Some(scope) = lookup("ARCH_PKG_SEARCH_SCOPE") {
            self.default_scope = Scope::from_name(&scope)
                .with_context(|| format!("Unknown ARCH_PKG_SEARCH_SCOPE value: {}", scope))?;
        }
        if let Some(icon) = lookup("ARCH_PKG_SEARCH_ICON") {
            self.icon = Some(icon);
        }
        Ok(())
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(scope) = cli.scope {
            self.default_scope = scope;
        }
        if let Some(limit) = cli.limit {
            self.limit = Some(limit);
        }
        if let Some(timeout) = cli.timeout {
            self.timeout_secs = timeout;
        }
        if cli.require_trigger {
            self.require_trigger = true;
        }
    }

    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.aur_rpc_url)
            .with_context(|| format!("Invalid AUR RPC URL: {}", self.aur_rpc_url))?;
        Url::parse(&self.official_search_url)
            .with_context(|| format!("Invalid package search URL: {}", self.official_search_url))?;
        if self.timeout_secs == 0 {
            anyhow::bail!("Timeout must be at least one second");
        }
        if self.limit == Some(0) {
            anyhow::bail!("Result limit must be at least 1");
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Search Arch Linux official repositories and the AUR")]
pub struct Cli {
    /// Search query, optionally with a trigger (`aur yay`) or suffix (`yay-AUR`)
    pub query: Vec<String>,

    /// Read one query per line from stdin and answer with one JSON line each
    #[arg(long)]
    pub serve: bool,

    /// Output format for one-shot queries
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Sources searched when the query carries no trigger
    #[arg(short, long, value_enum)]
    pub scope: Option<Scope>,

    /// Maximum number of package results
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// HTTP timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// TOML config file (also ARCH_PKG_SEARCH_CONFIG)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Ignore queries without a trigger
    #[arg(long)]
    pub require_trigger: bool,

    /// Enable debug output
    #[arg(short, long)]
    pub debug: bool,

    /// Emit logs as journald fields
    #[arg(long)]
    pub journald: bool,

    /// Disable ANSI colors
    #[arg(long)]
    pub no_color: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.aur_rpc_url, AUR_RPC_URL);
        assert_eq!(settings.default_scope, Scope::Both);
        assert_eq!(settings.triggers.aur, "aur ");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_toml_partial_override() {
        let settings = Settings::from_toml_str(
            r#"
            limit = 20
            default_scope = "aur"
            cache_ttl_secs = 0

            [triggers]
            official = "pacman "
            "#,
        )
        .unwrap();

        assert_eq!(settings.limit, Some(20));
        assert_eq!(settings.default_scope, Scope::Aur);
        assert_eq!(settings.cache_ttl_secs, 0);
        assert_eq!(settings.triggers.official, "pacman ");
        assert_eq!(settings.triggers.aur, "aur ");
        assert_eq!(settings.timeout_secs, TIMEOUT_SECONDS);
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timeout_secs = 3\nicon = \"/usr/share/icons/arch.svg\"").unwrap();

        let settings = Settings::load_file(file.path()).unwrap();
        assert_eq!(settings.timeout(), Duration::from_secs(3));
        assert_eq!(settings.icon.as_deref(), Some("/usr/share/icons/arch.svg"));
    }

    #[test]
    fn test_load_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let err = Settings::load_file(&missing).unwrap_err();
        assert!(format!("{:#}", err).contains("missing.toml"));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("AUR_RPC_URL", "http://127.0.0.1:8080/rpc/"),
            ("ARCH_SEARCH_URL", "http://127.0.0.1:8080/packages/search/json/"),
            ("ARCH_PACKAGES_URL", "https://archlinux.org/packages/"),
            ("ARCH_PKG_SEARCH_LIMIT", "5"),
            ("ARCH_PKG_SEARCH_SCOPE", "repo"),
        ]);
        let mut settings = Settings::default();
        settings
            .apply_env_from(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(settings.aur_rpc_url, "http://127.0.0.1:8080/rpc/");
        assert_eq!(
            settings.official_search_url,
            "http://127.0.0.1:8080/packages/search/json/"
        );
        assert_eq!(settings.limit, Some(5));
        assert_eq!(settings.default_scope, Scope::Official);
    }

    #[test]
    fn test_env_rejects_bad_number() {
        let mut settings = Settings::default();
        let result = settings.apply_env_from(|key| {
            (key == "ARCH_PKG_SEARCH_TIMEOUT").then(|| "soon".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_wins_over_file() {
        let mut settings = Settings::from_toml_str("limit = 20\ndefault_scope = \"aur\"").unwrap();
        let cli = Cli::parse_from(["arch-pkg-search", "--limit", "3", "--scope", "official", "yay"]);
        settings.apply_cli(&cli);

        assert_eq!(settings.limit, Some(3));
        assert_eq!(settings.default_scope, Scope::Official);
        assert_eq!(cli.query, vec!["yay".to_string()]);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let settings = Settings {
            aur_rpc_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        let settings = Settings {
            limit: Some(0),
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }
}
