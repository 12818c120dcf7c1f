use crate::logic::eval_constants::{
    DEFAULT_DEPTH, VAL_KING, VAL_PIECE, WEIGHT_ADVANCEMENT, WEIGHT_CENTER, WEIGHT_KING_SAFETY,
    WEIGHT_MOBILITY,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // Evaluation Parameters
    pub val_piece: f64,
    pub val_king: f64,
    pub weight_advancement: f64,
    pub weight_mobility: f64,
    pub weight_king_safety: f64,
    pub weight_center: f64,

    // Search Parameters
    pub depth: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            val_piece: VAL_PIECE,
            val_king: VAL_KING,
            weight_advancement: WEIGHT_ADVANCEMENT,
            weight_mobility: WEIGHT_MOBILITY,
            weight_king_safety: WEIGHT_KING_SAFETY,
            weight_center: WEIGHT_CENTER,
            depth: DEFAULT_DEPTH,
        }
    }
}

/// Tuning file format: evaluation entries are multipliers on the defaults.
#[derive(Deserialize)]
struct EngineConfigJson {
    val_piece: Option<f64>,
    val_king: Option<f64>,
    weight_advancement: Option<f64>,
    weight_mobility: Option<f64>,
    weight_king_safety: Option<f64>,
    weight_center: Option<f64>,

    depth: Option<u8>,
}

impl EngineConfig {
    /// Loads a tuning file. Evaluation values scale the defaults, `depth` is
    /// taken as given. Missing keys keep their defaults.
    pub fn load_from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        let json_config: EngineConfigJson = serde_json::from_str(json_str)?;
        let default = Self::default();

        Ok(Self {
            val_piece: apply_scale(default.val_piece, json_config.val_piece),
            val_king: apply_scale(default.val_king, json_config.val_king),
            weight_advancement: apply_scale(
                default.weight_advancement,
                json_config.weight_advancement,
            ),
            weight_mobility: apply_scale(default.weight_mobility, json_config.weight_mobility),
            weight_king_safety: apply_scale(
                default.weight_king_safety,
                json_config.weight_king_safety,
            ),
            weight_center: apply_scale(default.weight_center, json_config.weight_center),
            depth: json_config.depth.unwrap_or(default.depth),
        })
    }
}

fn apply_scale(default_val: f64, scale: Option<f64>) -> f64 {
    scale.map_or(default_val, |s| default_val * s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_default() {
        let config = EngineConfig::load_from_json("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.depth, DEFAULT_DEPTH);
    }

    #[test]
    fn test_load_config_scaled() {
        let json = r#"{
            "val_king": 2.0,
            "weight_mobility": 0.5
        }"#;
        let config = EngineConfig::load_from_json(json).unwrap();
        assert!((config.val_king - VAL_KING * 2.0).abs() < f64::EPSILON);
        assert!((config.weight_mobility - WEIGHT_MOBILITY * 0.5).abs() < f64::EPSILON);
        // Others should be default
        assert!((config.val_piece - VAL_PIECE).abs() < f64::EPSILON);
        assert!((config.weight_center - WEIGHT_CENTER).abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_config_depth() {
        let config = EngineConfig::load_from_json(r#"{ "depth": 6 }"#).unwrap();
        assert_eq!(config.depth, 6);
    }

    #[test]
    fn test_load_config_invalid_json() {
        assert!(EngineConfig::load_from_json("{ invalid json }").is_err());
        assert!(EngineConfig::load_from_json(r#"{ "depth": -1 }"#).is_err());
    }

    #[test]
    fn test_deserialize_absolute_config() {
        let json = r#"{
            "val_piece": 2.0,
            "depth": 2
        }"#;

        let config: EngineConfig = serde_json::from_str(json).unwrap();
        assert!((config.val_piece - 2.0).abs() < f64::EPSILON);
        assert_eq!(config.depth, 2);
        // Check default values
        assert!((config.val_king - VAL_KING).abs() < f64::EPSILON);
    }
}
