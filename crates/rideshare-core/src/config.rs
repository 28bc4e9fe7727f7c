//! Client configuration resolved from the process environment.

use std::sync::OnceLock;

use crate::CoreError;

pub const API_URL_ENV: &str = "RIDESHARE_API_URL";
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

static GLOBAL: OnceLock<ClientConfig> = OnceLock::new();

/// Base endpoint shared by every API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
}

impl ClientConfig {
    /// Builds a configuration for an explicit base endpoint.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, CoreError> {
        let base_url = normalize_base_url(base_url.as_ref())?;
        Ok(Self { base_url })
    }

    /// Reads the environment now. An unset or blank variable falls back to the default.
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Process-wide configuration, read from the environment on first use.
    ///
    /// An invalid environment logs a warning and resolves to the default.
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(|| {
            Self::from_env().unwrap_or_else(|error| {
                tracing::warn!(%error, "ignoring invalid API configuration, using defaults");
                Self::default()
            })
        })
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(API_URL_ENV).filter(|value| !value.trim().is_empty()) {
            Some(url) => Self::new(url),
            None => Ok(Self::default()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins already-encoded path segments onto the base endpoint.
    pub fn endpoint(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.clone();
        for segment in segments {
            url.push('/');
            url.push_str(segment);
        }
        url
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_API_URL),
        }
    }
}

fn normalize_base_url(input: &str) -> Result<String, CoreError> {
    let trimmed = input.trim().trim_end_matches('/');
    let Some((scheme, rest)) = trimmed.split_once("://") else {
        return Err(CoreError::Config(format!(
            "base url must start with http:// or https://, got '{input}'"
        )));
    };

    if !matches!(scheme, "http" | "https") || rest.is_empty() {
        return Err(CoreError::Config(format!(
            "base url must start with http:// or https://, got '{input}'"
        )));
    }

    Ok(trimmed.to_owned())
}
