//! Range reduction and quadrant folding for the sine/cosine family.

use crate::simd::SimdLanes;

/// Reduces each lane into one period around zero, `[-pi, pi]`.
///
/// `v - round(v / 2pi) * 2pi`, with `2pi` split into `PI2_HI + PI2_LO` and
/// subtracted in two steps. The first step is exact while the quotient stays
/// below `2^16`; past that, lanes lose precision through cancellation.
#[inline(always)]
pub fn mod_2pi<V: SimdLanes>(v: V) -> V {
    let turns = v.mul(V::ONE_DIV_2PI).round();
    let reduced = turns.neg_mul_add(V::PI2_HI, v);
    turns.neg_mul_add(V::PI2_LO, reduced)
}

/// An angle folded into `[-pi/2, pi/2]`.
#[derive(Debug, Clone, Copy)]
pub struct Folded<V> {
    /// The folded angle; its sine equals the sine of the input.
    pub angle: V,
    /// All ones in lanes that needed no reflection.
    pub in_range: V,
}

impl<V: SimdLanes> Folded<V> {
    /// `1` for unreflected lanes, `-1` for reflected ones: the factor that
    /// turns the cosine of `angle` into the cosine of the input.
    #[inline(always)]
    pub fn cos_sign(&self) -> V {
        V::select(self.in_range, V::ONE, V::NEG_ONE)
    }
}

/// Folds an angle already in `[-pi, pi]` into `[-pi/2, pi/2]`.
///
/// Lanes beyond `pi/2` in magnitude are reflected through `+-pi/2`,
/// `x -> sign(x) * pi - x`, which keeps the sine and flips the cosine.
#[inline(always)]
pub fn fold_quadrant<V: SimdLanes>(reduced: V) -> Folded<V> {
    let sign = reduced.extract_sign();
    let signed_pi = V::PI.or(sign);
    let magnitude = sign.and_not(reduced);
    let reflected = signed_pi.sub(reduced);
    let in_range = magnitude.cmp_le(V::PI_DIV_2);

    Folded {
        angle: V::select(in_range, reduced, reflected),
        in_range,
    }
}

/// `fold_quadrant(mod_2pi(v))`.
#[inline(always)]
pub fn reduce_and_fold<V: SimdLanes>(v: V) -> Folded<V> {
    fold_quadrant(mod_2pi(v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::{F32x4, F64x4};
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_mod_2pi_range() {
        let inputs = [-1000.0, -7.0, -3.0, 0.0, 2.5, 6.5, 42.0, 314.0];
        for chunk in inputs.chunks(4) {
            let v = F64x4::from_slice(chunk);
            let reduced = mod_2pi(v);
            for lane in 0..4 {
                let r = reduced.extract(lane);
                assert!(r.abs() <= PI + 1e-12, "{} reduced to {}", v.extract(lane), r);
                let x = v.extract(lane);
                assert!((r.sin() - x.sin()).abs() < 1e-9);
                assert!((r.cos() - x.cos()).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_mod_2pi_idempotent() {
        let v = F64x4::new(-50.0, -1.0, 4.0, 123.456);
        let once = mod_2pi(v);
        let twice = mod_2pi(once);
        for lane in 0..4 {
            assert!((once.extract(lane) - twice.extract(lane)).abs() < 1e-12);
        }

        let v = F32x4::new(-9.0, 0.25, 3.5, 20.0);
        let once = mod_2pi(v);
        let twice = mod_2pi(once);
        for lane in 0..4 {
            assert!((once.extract(lane) - twice.extract(lane)).abs() < 1e-6);
        }
    }

    #[test]
    fn test_mod_2pi_f32_wide_range() {
        let mut worst = 0.0f64;
        for i in 0..=20_000 {
            let x = (-100.0 * PI + 200.0 * PI * i as f64 / 20_000.0) as f32;
            let reduced = mod_2pi(F32x4::splat(x)).extract(0) as f64;
            let x = x as f64;
            let exact = x - (x / (2.0 * PI)).round() * 2.0 * PI;
            // both sides may land on either end of the period
            let error = (reduced - exact).abs().min((reduced.abs() - exact.abs()).abs());
            worst = worst.max(error);
        }
        assert!(worst < 5e-7, "worst f32 reduction error {worst}");
    }

    #[test]
    fn test_fold_quadrant() {
        let v = F64x4::new(0.5, -0.5, 2.5, -2.5);
        let folded = fold_quadrant(v);
        let angle = folded.angle.to_array();
        let sign = folded.cos_sign().to_array();

        assert_eq!(angle[0], 0.5);
        assert_eq!(angle[1], -0.5);
        assert!((angle[2] - (PI - 2.5)).abs() < 1e-15);
        assert!((angle[3] - (2.5 - PI)).abs() < 1e-15);
        assert_eq!(sign, [1.0, 1.0, -1.0, -1.0]);

        for lane in 0..4 {
            let x = v.extract(lane);
            assert!(angle[lane].abs() <= FRAC_PI_2);
            assert!((angle[lane].sin() - x.sin()).abs() < 1e-15);
            assert!((angle[lane].cos() * sign[lane] - x.cos()).abs() < 1e-15);
        }
    }

    #[test]
    fn test_fold_boundary_stays_unreflected() {
        let v = F32x4::new(
            std::f32::consts::FRAC_PI_2,
            -std::f32::consts::FRAC_PI_2,
            0.0,
            -0.0,
        );
        let folded = fold_quadrant(v);
        assert_eq!(folded.cos_sign().to_array(), [1.0; 4]);
        assert_eq!(folded.angle.to_array(), v.to_array());
    }
}
