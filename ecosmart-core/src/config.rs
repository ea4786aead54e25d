//! Runtime configuration loaded from `ECOSMART_*` environment variables.

use std::env::VarError;
use std::path::PathBuf;
use std::str::FromStr;

use reqwest::Url;

use crate::model::DEFAULT_RADIUS_METERS;

/// Public Nominatim search endpoint.
pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";
/// Public Overpass interpreter endpoint.
pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";
/// Client identifier sent to the shared OSM services.
pub const DEFAULT_USER_AGENT: &str = "EcoSmartHub/1.0";

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
/// Errors raised while reading configuration.
pub enum ConfigError {
    /// A variable is set but its value cannot be used.
    #[error("Invalid value for {var}: {reason}")]
    InvalidEnvVar {
        /// Name of the offending variable.
        var: String,
        /// Why the value was rejected.
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// How the center finder widens and caps its searches.
pub struct FinderPolicy {
    /// Factor applied to the radius when no bounding box is given.
    pub radius_multiplier: u32,
    /// Result cap for radius searches.
    pub max_results_radius: usize,
    /// Result cap for bounding-box searches.
    pub max_results_bbox: usize,
}

impl FinderPolicy {
    /// Radius actually queried for a requested radius.
    #[must_use]
    pub const fn effective_radius(&self, radius_meters: u32) -> u32 {
        radius_meters.saturating_mul(self.radius_multiplier)
    }

    /// Result cap for a search with or without a bounding box.
    #[must_use]
    pub const fn max_results(&self, has_bounding_box: bool) -> usize {
        if has_bounding_box {
            self.max_results_bbox
        } else {
            self.max_results_radius
        }
    }
}

impl Default for FinderPolicy {
    fn default() -> Self {
        Self {
            radius_multiplier: 2,
            max_results_radius: 15,
            max_results_bbox: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Settings shared by providers and the front end.
pub struct LocatorConfig {
    /// Nominatim `/search` endpoint.
    pub nominatim_url: Url,
    /// Overpass interpreter endpoint.
    pub overpass_url: Url,
    /// `User-Agent` sent with every request.
    pub user_agent: String,
    /// Optional per-request timeout; `None` waits indefinitely.
    pub request_timeout_secs: Option<u64>,
    /// Radius used when a place has no bounding box.
    pub default_radius_meters: u32,
    /// Radius widening and result caps.
    pub finder: FinderPolicy,
    /// `tracing` filter directive.
    pub log_level: String,
    /// File log output goes to; `None` disables logging.
    pub log_file: Option<PathBuf>,
}

/// Load configuration from the environment, reading `.env` first.
///
/// # Errors
///
/// Returns [`ConfigError`] if a variable holds an unusable value.
pub fn load_config() -> Result<LocatorConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_config_from_env()
}

/// Load configuration from variables already in the process environment.
///
/// # Errors
///
/// Returns [`ConfigError`] if a variable holds an unusable value.
pub fn load_config_from_env() -> Result<LocatorConfig, ConfigError> {
    build_config(|key| std::env::var(key))
}

/// Build configuration from an arbitrary variable lookup.
///
/// Every variable is optional; unset ones take their documented default.
///
/// # Errors
///
/// Returns [`ConfigError`] if a variable holds an unusable value.
pub fn build_config<F>(lookup: F) -> Result<LocatorConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_owned())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_owned(),
        reason,
    };

    let parse_url = |var: &str, default: &str| -> Result<Url, ConfigError> {
        Url::parse(&or_default(var, default)).map_err(|err| invalid(var, err.to_string()))
    };

    let parse_num = |var: &str, default: &str| -> Result<u64, ConfigError> {
        parse_positive(&or_default(var, default)).map_err(|reason| invalid(var, reason))
    };

    let narrow = |var: &str, value: u64| -> Result<u32, ConfigError> {
        u32::try_from(value).map_err(|err| invalid(var, err.to_string()))
    };

    let nominatim_url = parse_url("ECOSMART_NOMINATIM_URL", DEFAULT_NOMINATIM_URL)?;
    let overpass_url = parse_url("ECOSMART_OVERPASS_URL", DEFAULT_OVERPASS_URL)?;
    let user_agent = or_default("ECOSMART_USER_AGENT", DEFAULT_USER_AGENT);

    let request_timeout_secs = match lookup("ECOSMART_HTTP_TIMEOUT_SECS") {
        Ok(raw) => Some(
            parse_positive(&raw).map_err(|reason| invalid("ECOSMART_HTTP_TIMEOUT_SECS", reason))?,
        ),
        Err(_) => None,
    };

    let defaults = FinderPolicy::default();

    let radius = parse_num(
        "ECOSMART_DEFAULT_RADIUS_METERS",
        &DEFAULT_RADIUS_METERS.to_string(),
    )?;
    let default_radius_meters = narrow("ECOSMART_DEFAULT_RADIUS_METERS", radius)?;

    let multiplier = parse_num(
        "ECOSMART_RADIUS_MULTIPLIER",
        &defaults.radius_multiplier.to_string(),
    )?;
    let radius_multiplier = narrow("ECOSMART_RADIUS_MULTIPLIER", multiplier)?;

    let max_radius = parse_num(
        "ECOSMART_MAX_RESULTS_RADIUS",
        &defaults.max_results_radius.to_string(),
    )?;
    let max_bbox = parse_num(
        "ECOSMART_MAX_RESULTS_BBOX",
        &defaults.max_results_bbox.to_string(),
    )?;

    let log_level = or_default("ECOSMART_LOG_LEVEL", "info");
    let log_file = lookup("ECOSMART_LOG_FILE").ok().map(PathBuf::from);

    Ok(LocatorConfig {
        nominatim_url,
        overpass_url,
        user_agent,
        request_timeout_secs,
        default_radius_meters,
        finder: FinderPolicy {
            radius_multiplier,
            max_results_radius: usize::try_from(max_radius)
                .map_err(|err| invalid("ECOSMART_MAX_RESULTS_RADIUS", err.to_string()))?,
            max_results_bbox: usize::try_from(max_bbox)
                .map_err(|err| invalid("ECOSMART_MAX_RESULTS_BBOX", err.to_string()))?,
        },
        log_level,
        log_file,
    })
}

fn parse_positive(raw: &str) -> Result<u64, String> {
    match u64::from_str(raw.trim()) {
        Ok(0) => Err("must be greater than zero".to_owned()),
        Ok(value) => Ok(value),
        Err(err) => Err(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<LocatorConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|&(key, value)| (key.to_owned(), value.to_owned()))
            .collect();
        build_config(|key| map.get(key).cloned().ok_or(VarError::NotPresent))
    }

    #[test]
    fn defaults_match_public_services() {
        let config = config_from(&[]).expect("defaults are valid");

        assert_eq!(config.nominatim_url.as_str(), DEFAULT_NOMINATIM_URL);
        assert_eq!(config.overpass_url.as_str(), DEFAULT_OVERPASS_URL);
        assert_eq!(config.user_agent, "EcoSmartHub/1.0");
        assert_eq!(config.request_timeout_secs, None);
        assert_eq!(config.default_radius_meters, 10_000);
        assert_eq!(config.finder, FinderPolicy::default());
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn default_policy_doubles_radius_and_caps_per_branch() {
        let policy = FinderPolicy::default();
        assert_eq!(policy.effective_radius(10_000), 20_000);
        assert_eq!(policy.max_results(false), 15);
        assert_eq!(policy.max_results(true), 30);
    }

    #[test]
    fn effective_radius_saturates() {
        let policy = FinderPolicy::default();
        assert_eq!(policy.effective_radius(u32::MAX), u32::MAX);
    }

    #[test]
    fn overrides_are_applied() {
        let config = config_from(&[
            ("ECOSMART_OVERPASS_URL", "http://127.0.0.1:9000/api/interpreter"),
            ("ECOSMART_USER_AGENT", "tests/0.1"),
            ("ECOSMART_HTTP_TIMEOUT_SECS", "20"),
            ("ECOSMART_DEFAULT_RADIUS_METERS", "2500"),
            ("ECOSMART_RADIUS_MULTIPLIER", "1"),
            ("ECOSMART_MAX_RESULTS_RADIUS", "5"),
            ("ECOSMART_MAX_RESULTS_BBOX", "50"),
            ("ECOSMART_LOG_LEVEL", "ecosmart=debug"),
            ("ECOSMART_LOG_FILE", "/tmp/ecosmart.log"),
        ])
        .expect("overrides are valid");

        assert_eq!(
            config.overpass_url.as_str(),
            "http://127.0.0.1:9000/api/interpreter"
        );
        assert_eq!(config.user_agent, "tests/0.1");
        assert_eq!(config.request_timeout_secs, Some(20));
        assert_eq!(config.default_radius_meters, 2_500);
        assert_eq!(
            config.finder,
            FinderPolicy {
                radius_multiplier: 1,
                max_results_radius: 5,
                max_results_bbox: 50,
            }
        );
        assert_eq!(config.log_level, "ecosmart=debug");
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/ecosmart.log")));
    }

    #[test]
    fn rejects_zero_caps() {
        let err = config_from(&[("ECOSMART_MAX_RESULTS_BBOX", "0")]).expect_err("zero cap");
        assert_eq!(
            err,
            ConfigError::InvalidEnvVar {
                var: "ECOSMART_MAX_RESULTS_BBOX".to_owned(),
                reason: "must be greater than zero".to_owned(),
            }
        );
    }

    #[test]
    fn rejects_garbage_numbers_and_urls() {
        assert!(
            config_from(&[("ECOSMART_RADIUS_MULTIPLIER", "twice")]).is_err(),
            "non-numeric multiplier"
        );
        assert!(
            config_from(&[("ECOSMART_NOMINATIM_URL", "not a url")]).is_err(),
            "relative url"
        );
        assert!(
            config_from(&[("ECOSMART_DEFAULT_RADIUS_METERS", "99999999999")]).is_err(),
            "radius beyond u32"
        );
    }
}
