//! Easing curves

use serde::{Deserialize, Serialize};

/// Named easing curve applied to tween progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    /// Gentle deceleration, the default for tweens
    #[default]
    QuadOut,
    QuadInOut,
    /// Smooth deceleration (used for entrances)
    CubicOut,
    /// Symmetric acceleration and deceleration (used for shake feedback)
    CubicInOut,
    QuartOut,
}

impl Easing {
    /// Map linear progress in `[0, 1]` to eased progress
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadOut => simple_easing::quad_out(t),
            Easing::QuadInOut => simple_easing::quad_in_out(t),
            Easing::CubicOut => simple_easing::cubic_out(t),
            Easing::CubicInOut => simple_easing::cubic_in_out(t),
            Easing::QuartOut => simple_easing::quart_out(t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 6] = [
        Easing::Linear,
        Easing::QuadOut,
        Easing::QuadInOut,
        Easing::CubicOut,
        Easing::CubicInOut,
        Easing::QuartOut,
    ];

    #[test]
    fn test_endpoints_are_fixed() {
        for easing in ALL {
            assert!(easing.apply(0.0).abs() < 1e-6, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_input_is_clamped() {
        assert_eq!(Easing::Linear.apply(-0.5), 0.0);
        assert_eq!(Easing::Linear.apply(1.5), 1.0);
    }

    #[test]
    fn test_out_curves_lead_linear() {
        assert!(Easing::QuadOut.apply(0.5) > 0.5);
        assert!(Easing::CubicOut.apply(0.5) > Easing::QuadOut.apply(0.5));
    }

    #[test]
    fn test_default_is_quad_out() {
        assert_eq!(Easing::default(), Easing::QuadOut);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Easing::CubicInOut).unwrap();
        assert_eq!(json, "\"cubic_in_out\"");
        let parsed: Easing = serde_json::from_str("\"quad_out\"").unwrap();
        assert_eq!(parsed, Easing::QuadOut);
    }
}
