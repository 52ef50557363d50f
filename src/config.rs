use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::warn;

use crate::utils::Locale;

/// Dashboard settings, read from the environment (and `.env`) at startup
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Directory holding the three CSV tables
    pub data_dir: PathBuf,
    pub bind_addr: String,
    /// Year shown when the request does not pick one
    pub default_year: i32,
    /// Number and month label language
    pub locale: Locale,
    /// How many partners the ranking page shows
    pub top_n: usize,
    pub chart_width: u32,
    pub chart_height: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            data_dir: PathBuf::from("data"),
            bind_addr: "127.0.0.1:8050".to_string(),
            default_year: 2024,
            locale: Locale::De,
            top_n: 10,
            chart_width: 900,
            chart_height: 450,
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source; unset or unparseable values keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = DashboardConfig::default();
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        DashboardConfig {
            data_dir: get("DATA_DIR").map(PathBuf::from).unwrap_or(defaults.data_dir),
            bind_addr: get("BIND_ADDR").unwrap_or(defaults.bind_addr),
            default_year: parse_or("DEFAULT_YEAR", get("DEFAULT_YEAR"), defaults.default_year),
            locale: parse_or("DASHBOARD_LOCALE", get("DASHBOARD_LOCALE"), defaults.locale),
            top_n: positive_or("TOP_N", parse_or("TOP_N", get("TOP_N"), defaults.top_n), defaults.top_n),
            chart_width: positive_or(
                "CHART_WIDTH",
                parse_or("CHART_WIDTH", get("CHART_WIDTH"), defaults.chart_width),
                defaults.chart_width,
            ),
            chart_height: positive_or(
                "CHART_HEIGHT",
                parse_or("CHART_HEIGHT", get("CHART_HEIGHT"), defaults.chart_height),
                defaults.chart_height,
            ),
        }
    }
}

fn parse_or<T>(name: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
{
    match raw {
        None => default,
        Some(raw) => match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                warn!("Ignoring {}={:?}, using {:?}", name, raw, default);
                default
            }
        },
    }
}

fn positive_or<T>(name: &str, value: T, default: T) -> T
where
    T: Default + PartialEq + std::fmt::Debug,
{
    if value == T::default() {
        warn!("{} must be positive, using {:?}", name, default);
        default
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> DashboardConfig {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        DashboardConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.bind_addr, "127.0.0.1:8050");
        assert_eq!(config.default_year, 2024);
        assert_eq!(config.locale, Locale::De);
        assert_eq!(config.top_n, 10);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("DATA_DIR", "/srv/handel"),
            ("DEFAULT_YEAR", "2023"),
            ("DASHBOARD_LOCALE", "en"),
            ("TOP_N", " 5 "),
        ]);
        assert_eq!(config.data_dir, PathBuf::from("/srv/handel"));
        assert_eq!(config.default_year, 2023);
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.top_n, 5);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = config_from(&[("DEFAULT_YEAR", "zwanzig"), ("TOP_N", "0"), ("CHART_WIDTH", "-3"), ("BIND_ADDR", "  ")]);
        assert_eq!(config.default_year, 2024);
        assert_eq!(config.top_n, 10);
        assert_eq!(config.chart_width, 900);
        assert_eq!(config.bind_addr, "127.0.0.1:8050");
    }
}
