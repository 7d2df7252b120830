//! Interpolation and the opacity pulse

/// Linear interpolation between two floats
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Lowest opacity multiplier reached by the pulse
pub const PULSE_FLOOR: f32 = 0.6;

/// Smooth opacity multiplier in `[PULSE_FLOOR, 1]`, keyed off the pool's
/// step counter and the entity position so neighbours pulse out of phase.
/// Draw-time only; never feeds back into kinematics.
pub fn pulse(steps: u64, x: f32, y: f32) -> f32 {
    let phase = (steps % 1_000_000) as f32 * 0.02 + (x + y) * 0.01;
    let wave = 0.5 + 0.5 * phase.sin();
    lerp_f32(PULSE_FLOOR, 1.0, wave)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_f32_endpoints() {
        assert!((lerp_f32(0.0, 10.0, 0.0) - 0.0).abs() < 1e-6);
        assert!((lerp_f32(0.0, 10.0, 1.0) - 10.0).abs() < 1e-6);
        assert!((lerp_f32(0.0, 10.0, 0.5) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn pulse_stays_in_band() {
        for steps in (0..5000).step_by(37) {
            for &(x, y) in &[(0.0, 0.0), (120.5, 300.0), (-20.0, 1900.0)] {
                let p = pulse(steps, x, y);
                assert!((PULSE_FLOOR - 1e-6..=1.0 + 1e-6).contains(&p));
            }
        }
    }

    #[test]
    fn pulse_varies_over_time() {
        let a = pulse(0, 10.0, 10.0);
        let b = pulse(40, 10.0, 10.0);
        assert!((a - b).abs() > 1e-3);
    }
}
