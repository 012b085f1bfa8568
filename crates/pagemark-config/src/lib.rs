//! Pagination policy loaded from TOML: default and maximum page sizes, and the
//! base URL used to build next-page links.

use pagemark_core::PageSize;
use serde::{Deserialize, Serialize};
use std::{io, path::Path};
use thiserror::Error as ThisError;

pub const DEFAULT_PAGE_SIZE: u32 = 3;
pub const MAX_PAGE_SIZE: u32 = 1000;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read pagination config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse pagination config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid pagination config: {0}")]
    Invalid(String),

    #[error("page size must be at least 1")]
    ZeroPageSize,
}

///
/// PaginationConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaginationConfig {
    pub default_page_size: u32,
    pub max_page_size: u32,
    pub next_page_base_url: Option<String>,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
            next_page_base_url: None,
        }
    }
}

impl PaginationConfig {
    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;

        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&text)
    }

    /// Load from `path` when it names an existing file, otherwise use defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) if path.exists() => {
                tracing::info!(path = %path.display(), "loading pagination config");
                Self::from_path(path)
            }
            _ => {
                tracing::info!("using default pagination config");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_page_size == 0 {
            return Err(ConfigError::Invalid(
                "default_page_size must be at least 1".to_string(),
            ));
        }
        if self.max_page_size == 0 {
            return Err(ConfigError::Invalid(
                "max_page_size must be at least 1".to_string(),
            ));
        }
        if self.default_page_size > self.max_page_size {
            return Err(ConfigError::Invalid(format!(
                "default_page_size ({}) exceeds max_page_size ({})",
                self.default_page_size, self.max_page_size
            )));
        }
        if let Some(base) = &self.next_page_base_url
            && base.trim().is_empty()
        {
            return Err(ConfigError::Invalid(
                "next_page_base_url must not be blank".to_string(),
            ));
        }

        Ok(())
    }

    pub fn default_page_size(&self) -> Result<PageSize, ConfigError> {
        PageSize::new(self.default_page_size).ok_or(ConfigError::ZeroPageSize)
    }

    /// Resolve a client-requested page size against this policy.
    ///
    /// Absent means the default; zero is rejected; anything above the maximum
    /// is clamped to it.
    pub fn resolve_page_size(&self, requested: Option<u32>) -> Result<PageSize, ConfigError> {
        let Some(requested) = requested else {
            return self.default_page_size();
        };

        let clamped = requested.min(self.max_page_size);
        if clamped < requested {
            tracing::debug!(requested, max = self.max_page_size, "clamping page size");
        }

        PageSize::new(clamped).ok_or(ConfigError::ZeroPageSize)
    }

    #[must_use]
    pub fn next_page_base(&self) -> Option<&str> {
        self.next_page_base_url.as_deref()
    }
}

///
/// TESTS
///
