// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use storefront_app::{DashboardOptions, TabKind, Theme};

pub const APP_NAME: &str = "storefront";
const CONFIG_VERSION: i64 = 1;
const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
const DEFAULT_API_TIMEOUT: &str = "10s";
const CONFIG_PATH_ENV: &str = "STOREFRONT_CONFIG_PATH";
const API_HOST_ENV: &str = "STOREFRONT_API_HOST";
const MAX_LOW_STOCK_THRESHOLD: i64 = 1_000_000;
const MAX_DUE_WINDOW_DAYS: i64 = 3_650;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub api: Api,
    #[serde(default)]
    pub session: Session,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub dashboard: Dashboard,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            api: Api::default(),
            session: Session::default(),
            ui: Ui::default(),
            dashboard: Dashboard::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Api {
    pub base_url: Option<String>,
    pub timeout: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Session {
    pub user: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ui {
    pub theme: Option<String>,
    pub default_tab: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Dashboard {
    pub low_stock_threshold: Option<i64>,
    pub due_window_days: Option<i64>,
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set {CONFIG_PATH_ENV} to the config file")
        })?;

        Ok(config_root.join(APP_NAME).join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and put values under [api], [session], [ui], and [dashboard]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1. Run `storefront --print-example-config` for the current schema",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(base_url) = &self.api.base_url {
            storefront_api::validate_base_url(base_url)
                .with_context(|| format!("invalid [api] section in {}", path.display()))?;
        }

        if let Some(timeout) = &self.api.timeout {
            let parsed = parse_duration(timeout)?;
            if parsed <= Duration::ZERO {
                bail!(
                    "api.timeout in {} must be positive, got {}",
                    path.display(),
                    timeout
                );
            }
        }

        if let Some(theme) = &self.ui.theme
            && Theme::parse(theme).is_none()
        {
            bail!(
                "ui.theme in {} must be \"light\" or \"dark\", got {:?}",
                path.display(),
                theme
            );
        }

        if let Some(tab) = &self.ui.default_tab
            && TabKind::parse(tab).is_none()
        {
            let names: Vec<&str> = TabKind::ALL.iter().map(|tab| tab.label()).collect();
            bail!(
                "ui.default_tab in {} must be one of {}, got {:?}",
                path.display(),
                names.join(", "),
                tab
            );
        }

        check_dashboard_limit(
            path,
            "low_stock_threshold",
            self.dashboard.low_stock_threshold,
            MAX_LOW_STOCK_THRESHOLD,
        )?;
        check_dashboard_limit(
            path,
            "due_window_days",
            self.dashboard.due_window_days,
            MAX_DUE_WINDOW_DAYS,
        )?;

        Ok(())
    }

    /// `[api].base_url`, else `STOREFRONT_API_HOST`, else the local default.
    pub fn api_base_url(&self) -> Result<String> {
        let raw = match &self.api.base_url {
            Some(base_url) => base_url.clone(),
            None => match env::var(API_HOST_ENV) {
                Ok(host) if !host.trim().is_empty() => host,
                _ => DEFAULT_API_BASE_URL.to_owned(),
            },
        };
        let trimmed = raw.trim().trim_end_matches('/').to_owned();
        storefront_api::validate_base_url(&trimmed)
            .with_context(|| format!("invalid API base URL; check [api].base_url or {API_HOST_ENV}"))?;
        Ok(trimmed)
    }

    pub fn api_timeout(&self) -> Result<Duration> {
        parse_duration(self.api.timeout.as_deref().unwrap_or(DEFAULT_API_TIMEOUT))
    }

    pub fn user(&self) -> Option<&str> {
        self.session
            .user
            .as_deref()
            .map(str::trim)
            .filter(|user| !user.is_empty())
    }

    pub fn theme(&self) -> Theme {
        self.ui
            .theme
            .as_deref()
            .and_then(Theme::parse)
            .unwrap_or_default()
    }

    pub fn default_tab(&self) -> TabKind {
        self.ui
            .default_tab
            .as_deref()
            .and_then(TabKind::parse)
            .unwrap_or(TabKind::Dashboard)
    }

    pub fn dashboard_options(&self) -> DashboardOptions {
        let defaults = DashboardOptions::default();
        DashboardOptions {
            low_stock_threshold: self
                .dashboard
                .low_stock_threshold
                .unwrap_or(defaults.low_stock_threshold),
            due_window_days: self
                .dashboard
                .due_window_days
                .unwrap_or(defaults.due_window_days),
        }
    }

    pub fn example_config(path: &Path) -> String {
        let defaults = DashboardOptions::default();
        format!(
            "# storefront config\n# Place this file at: {}\n\nversion = 1\n\n[api]\n# Root of the shop PHP API. When unset, {API_HOST_ENV} is used.\nbase_url = \"{DEFAULT_API_BASE_URL}\"\ntimeout = \"{DEFAULT_API_TIMEOUT}\"\n\n[session]\n# user = \"maria\"\n\n[ui]\ntheme = \"dark\"\ndefault_tab = \"dashboard\"\n\n[dashboard]\nlow_stock_threshold = {}\ndue_window_days = {}\n",
            path.display(),
            defaults.low_stock_threshold,
            defaults.due_window_days,
        )
    }
}

fn check_dashboard_limit(path: &Path, key: &str, value: Option<i64>, max: i64) -> Result<()> {
    if let Some(value) = value
        && !(0..=max).contains(&value)
    {
        bail!(
            "dashboard.{key} in {} must be between 0 and {max}, got {value}",
            path.display()
        );
    }
    Ok(())
}

fn parse_duration(raw: &str) -> Result<Duration> {
    if let Some(value) = raw.strip_suffix("ms") {
        let millis: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_millis(millis));
    }
    if let Some(value) = raw.strip_suffix('s') {
        let secs: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_secs(secs));
    }
    if let Some(value) = raw.strip_suffix('m') {
        let mins: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        let secs = mins.checked_mul(60).ok_or_else(|| {
            anyhow!("invalid timeout duration {raw:?}; use a smaller value such as 10s or 2m")
        })?;
        return Ok(Duration::from_secs(secs));
    }

    bail!("invalid duration {raw:?}; use one of: <N>ms, <N>s, <N>m (for example 500ms or 10s)")
}

#[cfg(test)]
mod tests {
    use super::{API_HOST_ENV, CONFIG_PATH_ENV, Config, parse_duration};
    use anyhow::Result;
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};
    use std::time::Duration;
    use storefront_app::{TabKind, Theme};
    use storefront_testkit::temp_config_path;

    fn write_config(content: &str) -> Result<(tempfile::TempDir, PathBuf)> {
        let (temp, path) = temp_config_path()?;
        std::fs::write(&path, content)?;
        Ok((temp, path))
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        match ENV_LOCK.get_or_init(|| Mutex::new(())).lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    #[test]
    fn missing_config_uses_defaults() -> Result<()> {
        let _guard = env_lock();
        let temp = tempfile::tempdir()?;
        let config = Config::load(&temp.path().join("missing.toml"))?;
        assert_eq!(config.version, 1);
        assert_eq!(config.theme(), Theme::Dark);
        assert_eq!(config.default_tab(), TabKind::Dashboard);
        assert_eq!(config.api_timeout()?, Duration::from_secs(10));
        assert_eq!(config.user(), None);
        Ok(())
    }

    #[test]
    fn unversioned_config_is_rejected_with_actionable_message() -> Result<()> {
        let (_temp, path) = write_config("[api]\nbase_url=\"http://shop.test/api\"\n")?;
        let error = Config::load(&path).expect_err("unversioned config should fail");
        let message = error.to_string();
        assert!(message.contains("version = 1"));
        assert!(message.contains("[api], [session], [ui], and [dashboard]"));
        Ok(())
    }

    #[test]
    fn v1_config_parses() -> Result<()> {
        let (_temp, path) = write_config(
            "version = 1\n[api]\nbase_url = \"https://shop.test/api/\"\ntimeout = \"500ms\"\n[session]\nuser = \" maria \"\n[ui]\ntheme = \"light\"\ndefault_tab = \"orders\"\n[dashboard]\nlow_stock_threshold = 10\ndue_window_days = 7\n",
        )?;

        let config = Config::load(&path)?;
        assert_eq!(config.api_base_url()?, "https://shop.test/api");
        assert_eq!(config.api_timeout()?, Duration::from_millis(500));
        assert_eq!(config.user(), Some("maria"));
        assert_eq!(config.theme(), Theme::Light);
        assert_eq!(config.default_tab(), TabKind::Orders);
        let options = config.dashboard_options();
        assert_eq!(options.low_stock_threshold, 10);
        assert_eq!(options.due_window_days, 7);
        Ok(())
    }

    #[test]
    fn malformed_config_returns_parse_error() -> Result<()> {
        let (_temp, path) = write_config("{{not toml")?;
        let error = Config::load(&path).expect_err("malformed config should fail");
        assert!(error.to_string().contains("parse TOML config"));
        Ok(())
    }

    #[test]
    fn unsupported_config_version_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 2\n")?;
        let error = Config::load(&path).expect_err("v2 config should fail");
        assert!(error.to_string().contains("unsupported config version 2"));
        Ok(())
    }

    #[test]
    fn base_url_must_be_http() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[api]\nbase_url = \"ftp://shop.test\"\n")?;
        let error = Config::load(&path).expect_err("ftp base_url should fail");
        assert!(format!("{error:#}").contains("only http and https"));
        Ok(())
    }

    #[test]
    fn unknown_theme_and_tab_are_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[ui]\ntheme = \"neon\"\n")?;
        let error = Config::load(&path).expect_err("unknown theme should fail");
        assert!(error.to_string().contains("ui.theme"));

        let (_temp, path) = write_config("version = 1\n[ui]\ndefault_tab = \"reports\"\n")?;
        let error = Config::load(&path).expect_err("unknown tab should fail");
        assert!(
            error
                .to_string()
                .contains("dashboard, products, notes, budgets, orders, graphs")
        );

        let (_temp, path) = write_config("version = 1\n[ui]\ndefault_tab = \"graphs\"\n")?;
        assert_eq!(Config::load(&path)?.default_tab(), TabKind::Graphs);
        Ok(())
    }

    #[test]
    fn dashboard_limits_are_validated() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[dashboard]\ndue_window_days = -1\n")?;
        let error = Config::load(&path).expect_err("negative window should fail");
        assert!(error.to_string().contains("must be between 0 and 3650"));

        let (_temp, path) = write_config(
            "version = 1\n[dashboard]\ndue_window_days = 9223372036854775807\n",
        )?;
        let error = Config::load(&path).expect_err("huge window should fail");
        assert!(error.to_string().contains("dashboard.due_window_days"));

        let (_temp, path) =
            write_config("version = 1\n[dashboard]\nlow_stock_threshold = 1000001\n")?;
        let error = Config::load(&path).expect_err("huge threshold should fail");
        assert!(error.to_string().contains("dashboard.low_stock_threshold"));

        let (_temp, path) = write_config(
            "version = 1\n[dashboard]\nlow_stock_threshold = 1000000\ndue_window_days = 3650\n",
        )?;
        let options = Config::load(&path)?.dashboard_options();
        assert_eq!(options.due_window_days, 3_650);
        Ok(())
    }

    #[test]
    fn default_path_honors_env_override() -> Result<()> {
        let _guard = env_lock();
        let temp = tempfile::tempdir()?;
        let override_path = temp.path().join("custom-config.toml");
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var(CONFIG_PATH_ENV, &override_path);
        }
        let resolved = Config::default_path()?;
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var(CONFIG_PATH_ENV);
        }
        assert_eq!(resolved, override_path);
        Ok(())
    }

    #[test]
    fn base_url_prefers_config_over_env_host() -> Result<()> {
        let _guard = env_lock();
        let (_temp, path) =
            write_config("version = 1\n[api]\nbase_url = \"http://from-config.test/api\"\n")?;
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var(API_HOST_ENV, "http://from-env.test/api");
        }
        let resolved = Config::load(&path)?.api_base_url();
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var(API_HOST_ENV);
        }
        assert_eq!(resolved?, "http://from-config.test/api");
        Ok(())
    }

    #[test]
    fn base_url_uses_env_host_when_config_is_silent() -> Result<()> {
        let _guard = env_lock();
        let (_temp, path) = write_config("version = 1\n")?;
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var(API_HOST_ENV, "http://from-env.test/api/");
        }
        let resolved = Config::load(&path)?.api_base_url();
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var(API_HOST_ENV);
        }
        assert_eq!(resolved?, "http://from-env.test/api");
        Ok(())
    }

    #[test]
    fn timeout_parses_ms_seconds_and_minutes() -> Result<()> {
        assert_eq!(parse_duration("500ms")?, Duration::from_millis(500));
        assert_eq!(parse_duration("5s")?, Duration::from_secs(5));
        assert_eq!(parse_duration("2m")?, Duration::from_secs(120));
        assert!(parse_duration("soon").is_err());
        Ok(())
    }

    #[test]
    fn overflowing_minutes_are_rejected() {
        let error = parse_duration("18446744073709551615m").expect_err("minutes overflow");
        assert!(error.to_string().contains("invalid timeout duration"));
    }

    #[test]
    fn zero_timeout_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[api]\ntimeout = \"0s\"\n")?;
        let error = Config::load(&path).expect_err("zero timeout should fail");
        assert!(error.to_string().contains("must be positive"));
        Ok(())
    }

    #[test]
    fn example_config_loads_cleanly() -> Result<()> {
        let (_temp, path) = temp_config_path()?;
        let example = Config::example_config(&path);
        assert!(example.contains("version = 1"));
        std::fs::write(&path, example)?;
        let config = Config::load(&path)?;
        assert_eq!(config.theme(), Theme::Dark);
        Ok(())
    }
}
