// src/results.rs - Results summary produced by the external simulator

use crate::error::{IcestupaError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Flat key -> scalar summary the simulator writes next to its output table.
///
/// The key set drifted between site generations: older runs wrote `M_waste`
/// where newer ones write `M_runoff`, and only newer runs compute `WUE`.
/// Every field is therefore optional at ingest; consumers ask for what they
/// need through the accessors, which name the missing key on failure.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResultsSummary {
    /// Spray radius [m].
    #[serde(rename = "R_F", skip_serializing_if = "Option::is_none")]
    pub r_f: Option<f64>,
    /// Total water sprayed [kg].
    #[serde(rename = "M_F", skip_serializing_if = "Option::is_none")]
    pub m_f: Option<f64>,
    /// Mean fountain discharge [l/min].
    #[serde(rename = "D_F", skip_serializing_if = "Option::is_none")]
    pub d_f: Option<f64>,
    /// Meltwater released [kg].
    #[serde(rename = "M_water", skip_serializing_if = "Option::is_none")]
    pub m_water: Option<f64>,
    /// Sublimated vapour mass [kg].
    #[serde(rename = "M_sub", skip_serializing_if = "Option::is_none")]
    pub m_sub: Option<f64>,
    /// Total water input [kg].
    #[serde(rename = "M_input", skip_serializing_if = "Option::is_none")]
    pub m_input: Option<f64>,
    /// Wasted water mass [kg], older site generations.
    #[serde(rename = "M_waste", skip_serializing_if = "Option::is_none")]
    pub m_waste: Option<f64>,
    /// Runoff water mass [kg], newer site generations.
    #[serde(rename = "M_runoff", skip_serializing_if = "Option::is_none")]
    pub m_runoff: Option<f64>,
    /// Water-use efficiency [%], absent for older site generations.
    #[serde(rename = "WUE", skip_serializing_if = "Option::is_none")]
    pub wue: Option<f64>,
    /// Any further aggregates the simulator wrote; passed through untouched.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl ResultsSummary {
    pub fn from_json_str(json: &str) -> Result<ResultsSummary> {
        serde_json::from_str(json).map_err(|e| IcestupaError::Malformed {
            what: "results summary",
            details: e.to_string(),
        })
    }

    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<ResultsSummary> {
        let content = fs::read_to_string(&path).map_err(|e| IcestupaError::Malformed {
            what: "results summary",
            details: format!("{}: {}", path.as_ref().display(), e),
        })?;
        Self::from_json_str(&content)
    }

    fn require(value: Option<f64>, key: &str) -> Result<f64> {
        value.ok_or_else(|| IcestupaError::MissingField(key.to_string()))
    }

    pub fn spray_radius(&self) -> Result<f64> {
        Self::require(self.r_f, "R_F")
    }

    pub fn water_sprayed(&self) -> Result<f64> {
        Self::require(self.m_f, "M_F")
    }

    pub fn mean_discharge(&self) -> Result<f64> {
        Self::require(self.d_f, "D_F")
    }

    pub fn meltwater_released(&self) -> Result<f64> {
        Self::require(self.m_water, "M_water")
    }

    pub fn sublimated_mass(&self) -> Result<f64> {
        Self::require(self.m_sub, "M_sub")
    }

    pub fn input_mass(&self) -> Result<f64> {
        Self::require(self.m_input, "M_input")
    }

    /// Water lost without freezing, normalized across the `M_waste` /
    /// `M_runoff` generation split. Whether the two keys name the same
    /// physical quantity or merely occupy the same formula slot is not
    /// settled; both feed the net-loss fraction identically.
    pub fn waste_mass(&self) -> Result<f64> {
        if let Some(waste) = self.m_waste {
            return Ok(waste);
        }
        if let Some(runoff) = self.m_runoff {
            log::warn!("results summary has no M_waste; falling back to M_runoff");
            return Ok(runoff);
        }
        Err(IcestupaError::MissingField("M_waste/M_runoff".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const GUTTANNEN_STYLE: &str = r#"{
        "R_F": 4.3,
        "M_F": 474474.0,
        "D_F": 7.5,
        "M_water": 50000.0,
        "M_sub": 2000.0,
        "M_input": 60000.0,
        "M_waste": 1500.0,
        "M_ice": 23000.0
    }"#;

    const GANGLES_STYLE: &str = r#"{
        "R_F": 9.05,
        "M_F": 1554000.0,
        "D_F": 60.0,
        "M_water": 230000.0,
        "M_sub": 12000.0,
        "M_input": 1600000.0,
        "M_runoff": 990000.0,
        "WUE": 24.5
    }"#;

    #[test]
    fn test_parse_older_generation_summary() {
        let summary = ResultsSummary::from_json_str(GUTTANNEN_STYLE).unwrap();
        assert_abs_diff_eq!(summary.spray_radius().unwrap(), 4.3);
        assert_abs_diff_eq!(summary.waste_mass().unwrap(), 1500.0);
        assert_eq!(summary.wue, None);
        // unknown aggregates are preserved, not dropped
        assert_abs_diff_eq!(summary.extra["M_ice"].as_f64().unwrap(), 23000.0);
    }

    #[test]
    fn test_parse_newer_generation_summary() {
        let summary = ResultsSummary::from_json_str(GANGLES_STYLE).unwrap();
        // waste key absent, runoff stands in
        assert_abs_diff_eq!(summary.waste_mass().unwrap(), 990000.0);
        assert_abs_diff_eq!(summary.wue.unwrap(), 24.5);
        assert!(summary.extra.is_empty());
    }

    #[test]
    fn test_waste_prefers_m_waste_over_m_runoff() {
        let summary = ResultsSummary {
            m_waste: Some(100.0),
            m_runoff: Some(900.0),
            ..Default::default()
        };
        assert_abs_diff_eq!(summary.waste_mass().unwrap(), 100.0);
    }

    #[test]
    fn test_missing_keys_are_named() {
        let summary = ResultsSummary::from_json_str("{}").unwrap();
        assert!(matches!(
            summary.input_mass(),
            Err(IcestupaError::MissingField(key)) if key == "M_input"
        ));
        assert!(matches!(
            summary.waste_mass(),
            Err(IcestupaError::MissingField(key)) if key == "M_waste/M_runoff"
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            ResultsSummary::from_json_str(r#"{"R_F": "#),
            Err(IcestupaError::Malformed { .. })
        ));
    }
}
