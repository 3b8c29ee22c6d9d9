//! Reduction settings for one measured quantity

use serde::{Deserialize, Serialize};
use tripoli_core::{Error, Result};
use tripoli_outlier::ChauvenetParameters;

/// How cycles are aggregated into an analysis result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReductionMode {
    /// Inverse-variance weighted mean of block means
    #[default]
    Block,
    /// Every qualifying cycle pooled with equal weight
    Cycle,
}

/// Settings that select values, aggregation and outlier rejection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReductionSettings {
    pub mode: ReductionMode,
    /// Reduce the inverted (reciprocal) values instead of the measured ones
    pub use_inverted: bool,
    /// Values are natural-log ratios and are reported as geometric means
    pub is_ratio: bool,
    /// Report ratios in log space (additive) rather than ratio space
    pub log_scale: bool,
    /// Significant figures of the uncertainty kept when formatting
    pub sig_figs: usize,
    pub chauvenet: ChauvenetParameters,
}

impl Default for ReductionSettings {
    fn default() -> Self {
        Self {
            mode: ReductionMode::Block,
            use_inverted: false,
            is_ratio: false,
            log_scale: false,
            sig_figs: 2,
            chauvenet: ChauvenetParameters::default(),
        }
    }
}

impl ReductionSettings {
    /// Parse and validate settings from JSON; missing fields take defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)
            .map_err(|e| Error::InvalidParameter(format!("reduction settings: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::Computation(format!("reduction settings: {e}")))
    }

    pub fn validate(&self) -> Result<()> {
        if self.sig_figs == 0 {
            return Err(Error::InvalidParameter(
                "sig_figs must be at least 1".to_string(),
            ));
        }
        self.chauvenet.validate()
    }

    /// True when legends report geometric (ratio-space) statistics
    pub fn reports_geometric(&self) -> bool {
        self.is_ratio && !self.log_scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = ReductionSettings::default();
        assert_eq!(settings.mode, ReductionMode::Block);
        assert_eq!(settings.sig_figs, 2);
        assert!(settings.validate().is_ok());
        assert!(!settings.reports_geometric());
    }

    #[test]
    fn test_from_json() {
        let settings = ReductionSettings::from_json_str(
            r#"{ "mode": "cycle", "is_ratio": true, "chauvenet": { "rejection_probability": 0.4 } }"#,
        )
        .unwrap();
        assert_eq!(settings.mode, ReductionMode::Cycle);
        assert!(settings.reports_geometric());
        assert_eq!(settings.chauvenet.rejection_probability, 0.4);
        assert_eq!(settings.chauvenet.required_min_datum_count, 2);
        assert_eq!(settings.sig_figs, 2);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = ReductionSettings {
            mode: ReductionMode::Cycle,
            use_inverted: true,
            ..Default::default()
        };
        let json = settings.to_json_string().unwrap();
        assert!(json.contains("\"cycle\""));
        assert_eq!(ReductionSettings::from_json_str(&json).unwrap(), settings);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            ReductionSettings::from_json_str(r#"{ "sig_figs": 0 }"#),
            Err(Error::InvalidParameter(_))
        ));
        assert!(ReductionSettings::from_json_str(r#"{ "mode": "weekly" }"#).is_err());
        assert!(ReductionSettings::from_json_str("not json").is_err());
    }
}
