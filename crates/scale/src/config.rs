use serde::{Deserialize, Serialize};

/// Configuration for number extraction and ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// How scale modifiers are applied to literals
    pub mode: AnalysisMode,

    /// Characters of context inspected on each side of a literal
    pub window_chars: usize,

    /// Number of ranked values to keep
    pub top_n: usize,

    /// Largest absolute exponent evaluated for power and scientific literals
    pub max_exponent: u32,

    /// Input is truncated to this many characters before scanning
    pub max_input_chars: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            mode: AnalysisMode::Contextual,
            window_chars: 50,
            top_n: 10,
            max_exponent: 1000,
            max_input_chars: 64 * 1024 * 1024,
        }
    }
}

impl AnalyzerConfig {
    /// Create config that ranks literals by their written digits only
    pub fn literal() -> Self {
        Self {
            mode: AnalysisMode::Literal,
            ..Default::default()
        }
    }

    /// Parse a config from TOML; missing fields take their defaults
    pub fn from_toml_str(raw: &str) -> crate::Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate().map_err(crate::ScaleError::invalid_config)?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.top_n == 0 {
            return Err("top_n must be > 0".to_string());
        }

        if self.window_chars == 0 {
            return Err("window_chars must be > 0".to_string());
        }

        if self.max_input_chars == 0 {
            return Err("max_input_chars must be > 0".to_string());
        }

        Ok(())
    }
}

/// Strategy for turning a literal into a ranked value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMode {
    /// Apply suffixes, notation and nearby scale words
    #[default]
    Contextual,

    /// Rank the written digits as-is; every resolution is `None`
    Literal,
}

impl AnalysisMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            AnalysisMode::Contextual => "contextual",
            AnalysisMode::Literal => "literal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = AnalyzerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.window_chars, 50);
        assert_eq!(config.top_n, 10);
        assert_eq!(config.max_exponent, 1000);
    }

    #[test]
    fn test_preset_configs_valid() {
        let literal = AnalyzerConfig::literal();
        assert!(literal.validate().is_ok());
        assert_eq!(literal.mode, AnalysisMode::Literal);
    }

    #[test]
    fn test_config_validation() {
        let mut config = AnalyzerConfig {
            top_n: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config.top_n = 5;
        config.window_chars = 0;
        assert!(config.validate().is_err());

        config.window_chars = 20;
        config.max_input_chars = 0;
        assert!(config.validate().is_err());

        config.max_input_chars = 1024;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_takes_defaults() {
        let config = AnalyzerConfig::from_toml_str("top_n = 3\nmode = \"literal\"\n").unwrap();
        assert_eq!(config.top_n, 3);
        assert_eq!(config.mode, AnalysisMode::Literal);
        assert_eq!(config.window_chars, 50);
    }

    #[test]
    fn test_invalid_toml_config_rejected() {
        assert!(AnalyzerConfig::from_toml_str("top_n = 0").is_err());
    }
}
