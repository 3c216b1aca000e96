//! Field configuration: counts, motion, link threshold and palette.

use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::{FieldError, Result};
use crate::math::Color;

/// Particle count above which `NeighborSearch::Auto` switches to the grid.
pub const GRID_SEARCH_THRESHOLD: usize = 256;

/// How candidate link pairs are found each frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeighborSearch {
    /// Test every unordered pair. O(n²), fine for the default 80 particles.
    AllPairs,
    /// Bucket particles into a uniform grid with cells one threshold wide.
    Grid,
    /// All pairs up to `GRID_SEARCH_THRESHOLD` particles, grid above.
    #[default]
    Auto,
}

impl NeighborSearch {
    /// Resolve `Auto` for a given particle count.
    pub fn resolve(self, particle_count: usize) -> Self {
        match self {
            NeighborSearch::Auto if particle_count > GRID_SEARCH_THRESHOLD => NeighborSearch::Grid,
            NeighborSearch::Auto => NeighborSearch::AllPairs,
            other => other,
        }
    }
}

/// Colors used to paint links and particles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Link stroke color; its alpha is replaced per link.
    pub link: Color,
    /// Glow gradient color at the particle center.
    pub glow_inner: Color,
    /// Glow gradient color halfway out.
    pub glow_mid: Color,
    /// Glow gradient color at the glow radius.
    pub glow_outer: Color,
    /// Solid disc color.
    pub disc: Color,
    /// Bright center dot color.
    pub core: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            link: Color::from_rgba8(56, 189, 248, 1.0),
            glow_inner: Color::from_rgba8(125, 211, 252, 0.8),
            glow_mid: Color::from_rgba8(56, 189, 248, 0.5),
            glow_outer: Color::from_rgba8(14, 165, 233, 0.0),
            disc: Color::from_rgba8(56, 189, 248, 1.0),
            core: Color::from_rgba8(255, 255, 255, 0.9),
        }
    }
}

/// Complete particle field configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Number of particles, fixed for the lifetime of the field.
    pub particle_count: usize,
    /// Bound on each initial velocity component, in pixels per frame.
    pub max_speed: f32,
    /// Pairs closer than this many pixels are linked.
    pub link_distance: f32,
    /// Alpha of a link between coincident particles.
    pub max_link_alpha: f32,
    /// Link stroke width in pixels.
    pub link_width: f32,
    /// Radius of the soft glow.
    pub glow_radius: f32,
    /// Radius of the solid disc.
    pub disc_radius: f32,
    /// Radius of the bright center dot.
    pub core_radius: f32,
    /// Colors.
    pub palette: Palette,
    /// Pair search strategy.
    pub neighbor_search: NeighborSearch,
    /// Fixed RNG seed; entropy when absent.
    pub seed: Option<u64>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: 80,
            max_speed: 0.6,
            link_distance: 150.0,
            max_link_alpha: 0.6,
            link_width: 1.5,
            glow_radius: 8.0,
            disc_radius: 3.0,
            core_radius: 1.5,
            palette: Palette::default(),
            neighbor_search: NeighborSearch::Auto,
            seed: None,
        }
    }
}

impl FieldConfig {
    /// Parse and validate a JSON configuration. Missing keys take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Serialize as pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Same configuration with a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<()> {
        if !(self.link_distance.is_finite() && self.link_distance > 0.0) {
            return Err(invalid("link_distance", "must be a finite value above zero", self.link_distance));
        }
        if !(self.max_speed.is_finite() && self.max_speed >= 0.0) {
            return Err(invalid("max_speed", "must be finite and non-negative", self.max_speed));
        }
        if !(0.0..=1.0).contains(&self.max_link_alpha) {
            return Err(invalid("max_link_alpha", "must lie in [0, 1]", self.max_link_alpha));
        }

        let sizes = [
            ("link_width", self.link_width),
            ("glow_radius", self.glow_radius),
            ("disc_radius", self.disc_radius),
            ("core_radius", self.core_radius),
        ];
        for (field, value) in sizes {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(field, "must be finite and non-negative", value));
            }
        }

        Ok(())
    }

    /// Build the random source for particle spawning.
    pub fn make_rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => entropy_rng(),
        }
    }
}

fn invalid(field: &'static str, rule: &str, value: f32) -> FieldError {
    FieldError::InvalidConfig {
        field,
        reason: format!("{} (got {})", rule, value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn entropy_rng() -> StdRng {
    StdRng::from_rng(&mut rand::rng())
}

#[cfg(target_arch = "wasm32")]
fn entropy_rng() -> StdRng {
    #[cfg(feature = "web")]
    {
        let hi = (js_sys::Math::random() * u32::MAX as f64) as u64;
        let lo = (js_sys::Math::random() * u32::MAX as f64) as u64;
        StdRng::seed_from_u64((hi << 32) | lo)
    }

    #[cfg(not(feature = "web"))]
    {
        StdRng::seed_from_u64(0x5eed_f1e1d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_defaults_match_reference_look() {
        let config = FieldConfig::default();
        assert_eq!(config.particle_count, 80);
        assert_eq!(config.link_distance, 150.0);
        assert_eq!(config.max_link_alpha, 0.6);
        assert_eq!(config.palette.link.to_rgba8(), [56, 189, 248, 255]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = FieldConfig::from_json_str(r#"{ "particle_count": 300, "neighbor_search": "grid" }"#).unwrap();
        assert_eq!(config.particle_count, 300);
        assert_eq!(config.neighbor_search, NeighborSearch::Grid);
        assert_eq!(config.link_distance, 150.0);
        assert_eq!(config.palette, Palette::default());
    }

    #[test]
    fn test_json_roundtrip() {
        let config = FieldConfig::default().with_seed(42);
        let json = config.to_json_pretty().unwrap();
        assert_eq!(FieldConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_bad_values() {
        let cases = [
            r#"{ "link_distance": 0.0 }"#,
            r#"{ "link_distance": -5.0 }"#,
            r#"{ "max_speed": -0.1 }"#,
            r#"{ "max_link_alpha": 1.5 }"#,
            r#"{ "glow_radius": -1.0 }"#,
        ];
        for json in cases {
            let err = FieldConfig::from_json_str(json).unwrap_err();
            assert!(matches!(err, FieldError::InvalidConfig { .. }), "{json}: {err}");
        }
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = FieldConfig::from_json_str("{ particle_count: ").unwrap_err();
        assert!(matches!(err, FieldError::Parse(_)));
    }

    #[test]
    fn test_auto_search_resolution() {
        assert_eq!(NeighborSearch::Auto.resolve(80), NeighborSearch::AllPairs);
        assert_eq!(NeighborSearch::Auto.resolve(GRID_SEARCH_THRESHOLD + 1), NeighborSearch::Grid);
        assert_eq!(NeighborSearch::AllPairs.resolve(10_000), NeighborSearch::AllPairs);
    }

    #[test]
    fn test_seeded_rng_is_deterministic() {
        let config = FieldConfig::default().with_seed(9);
        let a: u64 = config.make_rng().random();
        let b: u64 = config.make_rng().random();
        assert_eq!(a, b);
    }
}
