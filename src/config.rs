//! Runtime field configuration and quality presets
//!
//! Parsed from the canvas `data-config` attribute on the web, or from a
//! JSON file for the native demo.

use serde::{Deserialize, Serialize};

use crate::consts;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    Medium,
    #[default]
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Disc budget for this preset
    pub fn disc_count(&self) -> usize {
        match self {
            QualityPreset::Low => 90,
            QualityPreset::Medium => 120,
            QualityPreset::High => consts::DISC_COUNT,
        }
    }

    /// Dot budget for this preset
    pub fn dot_count(&self) -> usize {
        match self {
            QualityPreset::Low => 6_000,
            QualityPreset::Medium => 12_000,
            QualityPreset::High => consts::DOT_COUNT,
        }
    }
}

/// Animator configuration
///
/// Missing fields fall back to the reference values, so a partial JSON
/// object like `{"dot_count": 4000}` is a valid config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Number of receding rings
    pub disc_count: usize,
    /// Number of orbiting dots
    pub dot_count: usize,
    /// Disc phase advance per frame
    pub disc_speed: f32,
    /// Upper bound of the dot angular speed range
    pub dot_max_speed: f32,
    /// RNG seed; `None` draws one from the wall clock at attach
    pub seed: Option<u64>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            disc_count: consts::DISC_COUNT,
            dot_count: consts::DOT_COUNT,
            disc_speed: consts::DISC_SPEED,
            dot_max_speed: consts::DOT_MAX_SPEED,
            seed: None,
        }
    }
}

impl FieldConfig {
    /// Reference configuration scaled to a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            disc_count: preset.disc_count(),
            dot_count: preset.dot_count(),
            ..Self::default()
        }
    }

    /// Force degenerate values back to the reference ones.
    ///
    /// The field math requires a non-empty disc set and finite,
    /// non-negative speeds; anything else is replaced and logged.
    pub fn clamped(mut self) -> Self {
        let reference = Self::default();
        if self.disc_count == 0 {
            log::warn!("disc_count 0 is unusable, using {}", reference.disc_count);
            self.disc_count = reference.disc_count;
        }
        if !self.disc_speed.is_finite() || self.disc_speed < 0.0 {
            log::warn!(
                "disc_speed {} is unusable, using {}",
                self.disc_speed,
                reference.disc_speed
            );
            self.disc_speed = reference.disc_speed;
        }
        if !self.dot_max_speed.is_finite() || self.dot_max_speed < 0.0 {
            log::warn!(
                "dot_max_speed {} is unusable, using {}",
                self.dot_max_speed,
                reference.dot_max_speed
            );
            self.dot_max_speed = reference.dot_max_speed;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_reference_configuration() {
        let config = FieldConfig::default();
        assert_eq!(config.disc_count, 150);
        assert_eq!(config.dot_count, 20_000);
        assert_eq!(config.disc_speed, 0.0003);
        assert_eq!(config.dot_max_speed, 0.001);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_high_preset_matches_reference() {
        let config = FieldConfig::from_preset(QualityPreset::High);
        assert_eq!(config, FieldConfig::default());
    }

    #[test]
    fn test_preset_budgets_ordered() {
        assert!(QualityPreset::Low.dot_count() < QualityPreset::Medium.dot_count());
        assert!(QualityPreset::Medium.dot_count() < QualityPreset::High.dot_count());
        assert!(QualityPreset::Low.disc_count() < QualityPreset::High.disc_count());
    }

    #[test]
    fn test_preset_name_round_trip() {
        for preset in [QualityPreset::Low, QualityPreset::Medium, QualityPreset::High] {
            assert_eq!(QualityPreset::from_str(preset.as_str()), Some(preset));
        }
        assert_eq!(QualityPreset::from_str("ultra"), None);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: FieldConfig = serde_json::from_str(r#"{"disc_count": 4, "seed": 7}"#)
            .expect("valid partial config");
        assert_eq!(config.disc_count, 4);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.dot_count, 20_000);
        assert_eq!(config.disc_speed, 0.0003);
    }

    #[test]
    fn test_clamped_repairs_degenerate_values() {
        let broken = FieldConfig {
            disc_count: 0,
            disc_speed: f32::NAN,
            dot_max_speed: -1.0,
            ..FieldConfig::default()
        };
        let fixed = broken.clamped();
        assert_eq!(fixed.disc_count, 150);
        assert_eq!(fixed.disc_speed, 0.0003);
        assert_eq!(fixed.dot_max_speed, 0.001);
    }

    #[test]
    fn test_clamped_keeps_valid_config() {
        let config = FieldConfig {
            disc_count: 4,
            dot_count: 0,
            disc_speed: 0.01,
            dot_max_speed: 0.0,
            seed: Some(1),
        };
        assert_eq!(config.clamped(), config);
    }
}
