use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "Medintake";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Simulated processing latency before results are shown.
const DEFAULT_ANALYSIS_DELAY_MS: u64 = 4000;

/// How long a notification stays on screen before auto-dismiss.
const DEFAULT_NOTIFICATION_MS: u64 = 3000;

/// Environment overrides.
pub const ENV_ANALYSIS_DELAY_MS: &str = "MEDINTAKE_ANALYSIS_DELAY_MS";
pub const ENV_NOTIFICATION_MS: &str = "MEDINTAKE_NOTIFICATION_MS";
pub const ENV_LOG: &str = "MEDINTAKE_LOG";

/// Default tracing filter when `RUST_LOG` is not set.
pub fn default_log_filter() -> String {
    "info,medintake_lib=debug".to_string()
}

/// Runtime configuration for an intake session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeConfig {
    /// Delay between a valid submit and the results being delivered.
    pub analysis_delay: Duration,
    /// Auto-dismiss duration attached to every notification.
    pub notification_timeout: Duration,
    /// Fallback `EnvFilter` directive.
    pub log_filter: String,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            analysis_delay: Duration::from_millis(DEFAULT_ANALYSIS_DELAY_MS),
            notification_timeout: Duration::from_millis(DEFAULT_NOTIFICATION_MS),
            log_filter: default_log_filter(),
        }
    }
}

impl IntakeConfig {
    /// Defaults with any `MEDINTAKE_*` environment overrides applied.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup. Unparsable values keep
    /// the current setting.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(delay) = lookup(ENV_ANALYSIS_DELAY_MS) {
            match delay.trim().parse::<u64>() {
                Ok(ms) => self.analysis_delay = Duration::from_millis(ms),
                Err(_) => tracing::warn!(key = ENV_ANALYSIS_DELAY_MS, "Ignoring unparsable override"),
            }
        }
        if let Some(timeout) = lookup(ENV_NOTIFICATION_MS) {
            match timeout.trim().parse::<u64>() {
                Ok(ms) => self.notification_timeout = Duration::from_millis(ms),
                Err(_) => tracing::warn!(key = ENV_NOTIFICATION_MS, "Ignoring unparsable override"),
            }
        }
        if let Some(filter) = lookup(ENV_LOG) {
            if !filter.trim().is_empty() {
                self.log_filter = filter.trim().to_string();
            }
        }
        self
    }

    /// Zero-delay config for tests and headless hosts.
    pub fn immediate() -> Self {
        Self {
            analysis_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_intake_timings() {
        let config = IntakeConfig::default();
        assert_eq!(config.analysis_delay, Duration::from_secs(4));
        assert_eq!(config.notification_timeout, Duration::from_secs(3));
        assert!(config.log_filter.starts_with("info"));
    }

    #[test]
    fn overrides_apply() {
        let config = IntakeConfig::default().with_overrides(lookup_from(&[
            (ENV_ANALYSIS_DELAY_MS, "250"),
            (ENV_NOTIFICATION_MS, " 1500 "),
            (ENV_LOG, "debug"),
        ]));
        assert_eq!(config.analysis_delay, Duration::from_millis(250));
        assert_eq!(config.notification_timeout, Duration::from_millis(1500));
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn unparsable_override_keeps_default() {
        let config = IntakeConfig::default()
            .with_overrides(lookup_from(&[(ENV_ANALYSIS_DELAY_MS, "soon")]));
        assert_eq!(config.analysis_delay, Duration::from_secs(4));
    }

    #[test]
    fn immediate_has_no_delay() {
        assert_eq!(IntakeConfig::immediate().analysis_delay, Duration::ZERO);
    }

    #[test]
    fn app_name_is_medintake() {
        assert_eq!(APP_NAME, "Medintake");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
