//! Configuration for cyclic views.

use serde::{Deserialize, Serialize};

use super::error::{CycleError, CycleResult};

/// Default number of boundary items duplicated into each wrap region.
pub const DEFAULT_CROSS_LENGTH: usize = 2;

/// Options controlling how a [`CyclicList`](super::CyclicList) wraps its source.
///
/// The configuration can be built in code or read from a TOML fragment:
///
/// ```
/// use orbit::model::CycleConfig;
///
/// let config = CycleConfig::from_toml_str("cross_length = 3").unwrap();
/// assert_eq!(config.cross_length, 3);
/// assert!(config.center_on_attach);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleConfig {
    /// Maximum number of boundary items duplicated into each wrap region.
    pub cross_length: usize,
    /// Whether an attached coordinator opens the carousel on the first real item.
    pub center_on_attach: bool,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            cross_length: DEFAULT_CROSS_LENGTH,
            center_on_attach: true,
        }
    }
}

impl CycleConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cross length.
    pub fn cross_length(mut self, cross_length: usize) -> Self {
        self.cross_length = cross_length;
        self
    }

    /// Enable or disable centring on the first real item when attached.
    pub fn center_on_attach(mut self, enabled: bool) -> Self {
        self.center_on_attach = enabled;
        self
    }

    /// Check that the configuration can drive a cyclic view.
    ///
    /// # Errors
    ///
    /// Returns [`CycleError::InvalidArgument`] when `cross_length` is zero.
    pub fn validate(&self) -> CycleResult<()> {
        if self.cross_length == 0 {
            return Err(CycleError::InvalidArgument(
                "cross_length must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a configuration from TOML. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CycleError::Config`] for malformed TOML and
    /// [`CycleError::InvalidArgument`] when the parsed values are unusable.
    pub fn from_toml_str(text: &str) -> CycleResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`CycleError::InvalidArgument`] if serialization fails.
    pub fn to_toml_string(&self) -> CycleResult<String> {
        toml::to_string(self).map_err(|e| CycleError::InvalidArgument(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CycleConfig::default();
        assert_eq!(config.cross_length, 2);
        assert!(config.center_on_attach);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_setters() {
        let config = CycleConfig::new().cross_length(4).center_on_attach(false);
        assert_eq!(config.cross_length, 4);
        assert!(!config.center_on_attach);
    }

    #[test]
    fn test_zero_cross_length_rejected() {
        let err = CycleConfig::new().cross_length(0).validate().unwrap_err();
        assert!(matches!(err, CycleError::InvalidArgument(_)));
        assert!(matches!(
            CycleConfig::from_toml_str("cross_length = 0"),
            Err(CycleError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = CycleConfig::new().cross_length(5).center_on_attach(false);
        let text = config.to_toml_string().unwrap();
        assert_eq!(CycleConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            CycleConfig::from_toml_str("cross_length = \"two\""),
            Err(CycleError::Config(_))
        ));
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        assert_eq!(CycleConfig::from_toml_str("").unwrap(), CycleConfig::default());
    }
}
