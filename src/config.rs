//! Session configuration.
//!
//! Thresholds and the evaluation height live here, along with the three
//! per-factor switches. Configuration can be built in code or loaded from a
//! YAML file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VisError};

/// Switches for the three contributing visibility factors.
///
/// Each factor can be disabled independently: extinction falls back to the
/// `max_vis` cap, view angle to a weight of 1 everywhere, occlusion to an
/// all-clear mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Factors {
    /// Divide contrast by the line-of-sight mean extinction.
    #[serde(default = "default_true")]
    pub extinction: bool,
    /// Weight by the cosine of the viewing angle and mask behind the sign.
    #[serde(default = "default_true")]
    pub view_angle: bool,
    /// Cut lines of sight at obstruction footprints.
    #[serde(default = "default_true")]
    pub occlusion: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Factors {
    fn default() -> Self {
        Self {
            extinction: true,
            view_angle: true,
            occlusion: true,
        }
    }
}

/// Visibility session configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VisConfig {
    /// Minimum usable visibility distance in metres; cells whose combined
    /// visibility falls below this are never classified visible.
    #[serde(default)]
    pub min_vis: f32,

    /// Maximum visibility distance in metres; the raw contrast/extinction
    /// ratio is capped here, and division by (near-)zero extinction
    /// saturates to this value.
    #[serde(default = "default_max_vis")]
    pub max_vis: f32,

    /// Height of the evaluation slice in metres, used to select which
    /// obstructions cast occlusion shadows.
    #[serde(default = "default_eval_height")]
    pub eval_height: f32,

    /// Factor switches.
    #[serde(default)]
    pub factors: Factors,
}

fn default_max_vis() -> f32 {
    30.0
}

fn default_eval_height() -> f32 {
    2.0
}

impl Default for VisConfig {
    fn default() -> Self {
        Self {
            min_vis: 0.0,
            max_vis: default_max_vis(),
            eval_height: default_eval_height(),
            factors: Factors::default(),
        }
    }
}

impl VisConfig {
    /// Builder-style minimum visibility.
    pub fn with_min_vis(mut self, metres: f32) -> Self {
        self.min_vis = metres;
        self
    }

    /// Builder-style maximum visibility.
    pub fn with_max_vis(mut self, metres: f32) -> Self {
        self.max_vis = metres;
        self
    }

    /// Builder-style evaluation height.
    pub fn with_eval_height(mut self, metres: f32) -> Self {
        self.eval_height = metres;
        self
    }

    /// Builder-style factor switches.
    pub fn with_factors(mut self, factors: Factors) -> Self {
        self.factors = factors;
        self
    }

    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| VisError::Config(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| VisError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let cfg = VisConfig::default();
        assert_eq!(cfg.min_vis, 0.0);
        assert_eq!(cfg.max_vis, 30.0);
        assert_eq!(cfg.eval_height, 2.0);
        assert!(cfg.factors.extinction && cfg.factors.view_angle && cfg.factors.occlusion);
    }

    #[test]
    fn test_builder_setters() {
        let cfg = VisConfig::default()
            .with_min_vis(1.0)
            .with_max_vis(20.0)
            .with_eval_height(1.6)
            .with_factors(Factors {
                extinction: true,
                view_angle: false,
                occlusion: true,
            });
        assert_eq!(cfg.min_vis, 1.0);
        assert_eq!(cfg.max_vis, 20.0);
        assert_eq!(cfg.eval_height, 1.6);
        assert!(!cfg.factors.view_angle);
    }

    #[test]
    fn test_from_yaml_partial() {
        let cfg = VisConfig::from_yaml("max_vis: 15.0\nfactors:\n  occlusion: false\n").unwrap();
        assert_eq!(cfg.max_vis, 15.0);
        assert_eq!(cfg.min_vis, 0.0);
        assert!(!cfg.factors.occlusion);
        assert!(cfg.factors.extinction);
    }

    #[test]
    fn test_from_yaml_rejects_garbage() {
        assert!(matches!(
            VisConfig::from_yaml("max_vis: [not, a, number]"),
            Err(VisError::Config(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "min_vis: 2.5\neval_height: 1.8").unwrap();
        let cfg = VisConfig::load(file.path()).unwrap();
        assert_eq!(cfg.min_vis, 2.5);
        assert_eq!(cfg.eval_height, 1.8);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        assert!(matches!(
            VisConfig::load(Path::new("/nonexistent/drishti.yaml")),
            Err(VisError::Config(_))
        ));
    }
}
