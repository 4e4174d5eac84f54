//! Pagination configuration.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Page-size limits applied to every listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Page size used when the request does not specify one.
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,

    /// Largest page size a request may ask for. Larger requests are clamped.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,
}

fn default_page_size() -> usize {
    20
}

fn default_max_page_size() -> usize {
    100
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

impl PaginationConfig {
    /// Creates a configuration with the given limits.
    pub fn new(default_page_size: usize, max_page_size: usize) -> Self {
        Self {
            default_page_size,
            max_page_size,
        }
    }

    /// Resolves the effective page size for a request.
    ///
    /// `None` yields the default, values above the maximum are clamped, and
    /// zero is rejected.
    pub fn resolve_limit(&self, requested: Option<usize>) -> Result<usize, ValidationError> {
        match requested {
            None => Ok(self.default_page_size.min(self.max_page_size)),
            Some(0) => Err(ValidationError::InvalidPageSize {
                requested: 0,
                max: self.max_page_size,
            }),
            Some(n) => Ok(n.min(self.max_page_size)),
        }
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.default_page_size == 0 {
            errors.push("Default page size cannot be 0".to_string());
        }

        if self.max_page_size == 0 {
            errors.push("Max page size cannot be 0".to_string());
        }

        if self.default_page_size > self.max_page_size {
            errors.push("Default page size cannot exceed max page size".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_limit_default() {
        let config = PaginationConfig::default();
        assert_eq!(config.resolve_limit(None).unwrap(), 20);
    }

    #[test]
    fn test_resolve_limit_clamps_to_max() {
        let config = PaginationConfig::new(10, 50);
        assert_eq!(config.resolve_limit(Some(500)).unwrap(), 50);
        assert_eq!(config.resolve_limit(Some(7)).unwrap(), 7);
    }

    #[test]
    fn test_resolve_limit_rejects_zero() {
        let config = PaginationConfig::default();
        let err = config.resolve_limit(Some(0)).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidPageSize { requested: 0, .. }));
    }

    #[test]
    fn test_validate() {
        assert!(PaginationConfig::default().validate().is_ok());
        let errors = PaginationConfig::new(200, 100).validate().unwrap_err();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_serde_defaults() {
        let config: PaginationConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, PaginationConfig::default());
    }
}
