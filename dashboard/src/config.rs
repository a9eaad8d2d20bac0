//! Configuration management for the dashboard.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::error::ConfigError;
use chrono::NaiveDate;
use expo_admin_core::FilterSpec;
use expo_admin_core::view::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Remote event API configuration
    pub api: ApiConfig,
    /// Page size of each list screen
    pub pages: PageSizes,
    /// Default log filter (overridden by `RUST_LOG`)
    pub log_level: String,
    /// Participant whose reservations the schedule shows
    pub participant_id: Option<String>,
}

/// Remote event API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL, without trailing slash
    pub base_url: String,
    /// Bearer token sent with every request
    pub token: String,
    /// Project (event) identifier sent as `X-Project-Id`
    pub project_id: String,
    /// Request timeout in seconds
    pub request_timeout: u64,
}

impl ApiConfig {
    /// Request timeout as a [`Duration`]
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

/// Rows per page for each list screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSizes {
    /// Conference schedule
    pub conferences: usize,
    /// Exhibitor table
    pub exhibitors: usize,
    /// Organizer table
    pub organizers: usize,
    /// Room table
    pub rooms: usize,
}

impl Default for PageSizes {
    fn default() -> Self {
        Self {
            conferences: DEFAULT_PAGE_SIZE,
            exhibitors: DEFAULT_PAGE_SIZE,
            organizers: DEFAULT_PAGE_SIZE,
            rooms: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Falls back to defaults if environment variables are not set.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup (environment, `.env` map, tests)
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let page_size = |key: &str| {
            lookup(key)
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_PAGE_SIZE)
        };

        Self {
            api: ApiConfig {
                base_url: lookup("EXPO_API_URL")
                    .map_or_else(|| "http://localhost:8080/api".to_string(), |url| {
                        url.trim_end_matches('/').to_string()
                    }),
                token: lookup("EXPO_API_TOKEN").unwrap_or_default(),
                project_id: lookup("EXPO_PROJECT_ID").unwrap_or_default(),
                request_timeout: lookup("EXPO_REQUEST_TIMEOUT")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            },
            pages: PageSizes {
                conferences: page_size("EXPO_PAGE_SIZE_CONFERENCES"),
                exhibitors: page_size("EXPO_PAGE_SIZE_EXHIBITORS"),
                organizers: page_size("EXPO_PAGE_SIZE_ORGANIZERS"),
                rooms: page_size("EXPO_PAGE_SIZE_ROOMS"),
            },
            log_level: lookup("EXPO_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            participant_id: lookup("EXPO_PARTICIPANT_ID").filter(|id| !id.is_empty()),
        }
    }

    /// Check values that have no usable default
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an empty token or project id, or a zero
    /// page size.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.token.is_empty() {
            return Err(ConfigError::Missing("EXPO_API_TOKEN"));
        }
        if self.api.project_id.is_empty() {
            return Err(ConfigError::Missing("EXPO_PROJECT_ID"));
        }

        let sizes = [
            ("EXPO_PAGE_SIZE_CONFERENCES", self.pages.conferences),
            ("EXPO_PAGE_SIZE_EXHIBITORS", self.pages.exhibitors),
            ("EXPO_PAGE_SIZE_ORGANIZERS", self.pages.organizers),
            ("EXPO_PAGE_SIZE_ROOMS", self.pages.rooms),
        ];
        if let Some((key, _)) = sizes.iter().find(|(_, size)| *size == 0) {
            return Err(ConfigError::ZeroPageSize(*key));
        }
        Ok(())
    }
}

/// Initial conference filter from `EXPO_FILTER_KEYWORD`, `EXPO_FILTER_FROM`
/// and `EXPO_FILTER_TO`
///
/// # Errors
///
/// Returns [`ConfigError::InvalidDate`] if a date bound is not `YYYY-MM-DD`.
pub fn filter_from_lookup<F>(lookup: F) -> Result<FilterSpec, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let date = |key: &'static str| -> Result<Option<NaiveDate>, ConfigError> {
        lookup(key)
            .filter(|value| !value.is_empty())
            .map(|value| {
                NaiveDate::parse_from_str(&value, "%Y-%m-%d")
                    .map_err(|_| ConfigError::InvalidDate { key, value })
            })
            .transpose()
    };

    let mut spec = FilterSpec::new().with_date_range(date("EXPO_FILTER_FROM")?, date("EXPO_FILTER_TO")?);
    if let Some(keyword) = lookup("EXPO_FILTER_KEYWORD").filter(|k| !k.is_empty()) {
        spec = spec.with_keyword(keyword);
    }
    Ok(spec)
}
