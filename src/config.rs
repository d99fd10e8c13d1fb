use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

/// Default minimum biologically plausible intron length.
pub const DEFAULT_MIN_INTRON_LENGTH: u64 = 20;

/// Tunable validation thresholds.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationConfig {
    /// Introns shorter than this are flagged as suspicious (still modeled).
    pub min_intron_length: u64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        ValidationConfig {
            min_intron_length: DEFAULT_MIN_INTRON_LENGTH,
        }
    }
}

impl ValidationConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.min_intron_length == 0 {
            bail!("minIntronLength must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(json: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(json.as_bytes()).unwrap();
        f
    }

    #[test]
    fn default_minimum_matches_known_good_corpus() {
        assert_eq!(ValidationConfig::default().min_intron_length, 20);
    }

    #[test]
    fn valid_config() {
        let f = write_config(r#"{ "minIntronLength": 35 }"#);
        let config = ValidationConfig::from_file(f.path()).unwrap();
        assert_eq!(config.min_intron_length, 35);
    }

    #[test]
    fn omitted_fields_fall_back_to_defaults() {
        let f = write_config("{}");
        let config = ValidationConfig::from_file(f.path()).unwrap();
        assert_eq!(config.min_intron_length, DEFAULT_MIN_INTRON_LENGTH);
    }

    #[test]
    fn zero_minimum_rejected() {
        let f = write_config(r#"{ "minIntronLength": 0 }"#);
        let err = ValidationConfig::from_file(f.path()).unwrap_err();
        assert!(err.to_string().contains("minIntronLength"));
    }
}
