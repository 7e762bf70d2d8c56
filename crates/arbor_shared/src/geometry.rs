//! Shape generators for population builds.
//!
//! Called only while a population is being (re)built, never per frame.
//! Both take the RNG explicitly so builds can be seeded.

use rand::Rng;

use crate::math::Vec3;

/// Angle (radians) per unit of cone parameter. About 8 turns over the height.
pub const CONE_SPIRAL_WINDING: f32 = 50.0;

/// Half-width of the uniform jitter applied to x and z of a cone point.
pub const CONE_JITTER: f32 = 0.25;

/// Point on the spiral wound around a cone, without jitter.
///
/// `t` runs from 0 (base) to 1 (apex). The cone is centered vertically on
/// the origin, so `y = (t - 0.5) * height` and the radius shrinks linearly
/// from `base_radius` to zero.
#[must_use]
pub fn cone_point_exact(height: f32, base_radius: f32, t: f32) -> Vec3 {
    let y = (t - 0.5) * height;
    let radius = base_radius * (1.0 - t);
    let angle = t * CONE_SPIRAL_WINDING;
    Vec3::new(radius * angle.cos(), y, radius * angle.sin())
}

/// Point on the cone spiral with volume jitter.
///
/// One jitter sample in `[-0.25, 0.25]` is drawn and added to both x and z.
#[must_use]
pub fn cone_point<R: Rng + ?Sized>(rng: &mut R, height: f32, base_radius: f32, t: f32) -> Vec3 {
    let exact = cone_point_exact(height, base_radius, t);
    let jitter = (rng.gen::<f32>() - 0.5) * (CONE_JITTER * 2.0);
    Vec3::new(exact.x + jitter, exact.y, exact.z + jitter)
}

/// Uniform random point inside a ball.
///
/// Radius is drawn by inverse CDF (`radius * cbrt(u)`) and direction by
/// uniform spherical angles, so density is uniform over the volume.
#[must_use]
pub fn sphere_point<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec3 {
    let u: f32 = rng.gen();
    let v: f32 = rng.gen();
    let theta = std::f32::consts::TAU * u;
    let phi = (2.0 * v - 1.0).clamp(-1.0, 1.0).acos();
    let r = rng.gen::<f32>().cbrt() * radius;
    Vec3::new(
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_cone_height_and_radius() {
        let mut rng = StdRng::seed_from_u64(7);
        for i in 0..=100 {
            let t = i as f32 / 100.0;
            let p = cone_point(&mut rng, 15.0, 6.0, t);
            assert!((p.y - (t - 0.5) * 15.0).abs() < 1e-5);

            let exact = cone_point_exact(15.0, 6.0, t);
            let exact_radius = (exact.x * exact.x + exact.z * exact.z).sqrt();
            assert!((exact_radius - 6.0 * (1.0 - t)).abs() < 1e-4);
            assert!((p.x - exact.x).abs() <= CONE_JITTER + 1e-6);
            assert!((p.z - exact.z).abs() <= CONE_JITTER + 1e-6);
        }
    }

    #[test]
    fn test_cone_apex_collapses() {
        let p = cone_point_exact(14.0, 7.0, 1.0);
        assert!(p.x.abs() < 1e-5 && p.z.abs() < 1e-5);
        assert!((p.y - 7.0).abs() < 1e-5);
    }

    #[test]
    fn test_sphere_points_inside_ball() {
        let mut rng = StdRng::seed_from_u64(11);
        for radius in [1.0_f32, 25.0, 30.0] {
            for _ in 0..10_000 {
                assert!(sphere_point(&mut rng, radius).length() <= radius * (1.0 + 1e-5));
            }
        }
    }

    #[test]
    fn test_sphere_volume_uniform() {
        // For a uniform ball, |p|^3 / R^3 is uniform on [0, 1]: mean 0.5.
        // That is the "no surface clustering" check; a surface-biased
        // sampler lands near 1.0 here.
        let mut rng = StdRng::seed_from_u64(42);
        let radius = 25.0_f32;
        let n = 10_000;
        let mean: f64 = (0..n)
            .map(|_| f64::from(sphere_point(&mut rng, radius).length() / radius).powi(3))
            .sum::<f64>()
            / f64::from(n);
        assert!((mean - 0.5).abs() < 0.02, "mean normalized r^3 = {mean}");

        // Mean radius of a uniform ball is 3R/4.
        let mean_r: f64 = (0..n)
            .map(|_| f64::from(sphere_point(&mut rng, radius).length()))
            .sum::<f64>()
            / f64::from(n);
        assert!((mean_r - 0.75 * f64::from(radius)).abs() < 0.3, "mean r = {mean_r}");
    }
}
