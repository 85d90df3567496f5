use fpl_api::client::FPL_BASE_URL;
use log::LevelFilter;
use std::time::Duration;

const DEFAULT_REFRESH: Duration = Duration::from_secs(5 * 60);
/// Anything shorter just hammers the cache.
const MIN_REFRESH: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    pub base_url: String,
    pub refresh_interval: Duration,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            log_level: None,
            base_url: FPL_BASE_URL.to_string(),
            refresh_interval: DEFAULT_REFRESH,
        }
    }
}

impl AppSettings {
    /// Defaults, overridden by `H2H_LOG_LEVEL`, `H2H_FPL_BASE_URL` and `H2H_REFRESH_SECS`.
    pub fn load() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();
        let var = |key: &str| var(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(level) = var("H2H_LOG_LEVEL") {
            settings.log_level = level.parse::<LevelFilter>().ok();
        }
        if let Some(url) = var("H2H_FPL_BASE_URL") {
            settings.base_url = url;
        }
        if let Some(secs) = var("H2H_REFRESH_SECS").and_then(|s| s.parse::<u64>().ok()) {
            settings.refresh_interval = Duration::from_secs(secs).max(MIN_REFRESH);
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> AppSettings {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppSettings::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_env() {
        let s = settings(&[]);
        assert_eq!(s.base_url, FPL_BASE_URL);
        assert_eq!(s.refresh_interval, DEFAULT_REFRESH);
        assert_eq!(s.log_level, None);
        assert!(!s.full_screen);
    }

    #[test]
    fn env_overrides_apply() {
        let s = settings(&[
            ("H2H_LOG_LEVEL", "debug"),
            ("H2H_FPL_BASE_URL", "http://localhost:8080"),
            ("H2H_REFRESH_SECS", "120"),
        ]);
        assert_eq!(s.log_level, Some(LevelFilter::Debug));
        assert_eq!(s.base_url, "http://localhost:8080");
        assert_eq!(s.refresh_interval, Duration::from_secs(120));
    }

    #[test]
    fn refresh_interval_has_a_floor() {
        let s = settings(&[("H2H_REFRESH_SECS", "1")]);
        assert_eq!(s.refresh_interval, MIN_REFRESH);
    }

    #[test]
    fn garbage_is_ignored() {
        let s = settings(&[("H2H_LOG_LEVEL", "loud"), ("H2H_REFRESH_SECS", "soon"), ("H2H_FPL_BASE_URL", "  ")]);
        assert_eq!(s.log_level, None);
        assert_eq!(s.refresh_interval, DEFAULT_REFRESH);
        assert_eq!(s.base_url, FPL_BASE_URL);
    }
}
