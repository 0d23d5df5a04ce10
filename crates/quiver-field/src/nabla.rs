//! Central-difference vector calculus over arbitrary 3D vector fields.
//!
//! The operators sample a fallible field function `Fn(DVec3) -> Result<DVec3, E>`
//! and propagate the first sampling error unchanged. Planar fields are
//! embedded with `z` ignored and `F_z = 0`.

use glam::{DMat3, DVec3};

/// Central-difference differentiator with a fixed step `h`.
///
/// Each partial derivative costs two field samples:
/// `∂F/∂x_j ≈ (F(p + h e_j) - F(p - h e_j)) / 2h`.
///
/// ```
/// use glam::DVec3;
/// use quiver_field::Nabla;
///
/// let nabla = Nabla::new(1e-4).unwrap();
/// // F = (x, y, 0) has divergence 2 everywhere.
/// let div = nabla
///     .divergence(|p: DVec3| Ok::<_, ()>(DVec3::new(p.x, p.y, 0.0)), DVec3::ZERO)
///     .unwrap();
/// assert!((div - 2.0).abs() < 1e-9);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Nabla {
    step: f64,
}

impl Nabla {
    /// Create a differentiator. The step must be finite and positive.
    pub fn new(step: f64) -> Result<Self, String> {
        if !step.is_finite() || step <= 0.0 {
            return Err(format!("difference step must be finite and positive, got {step}"));
        }
        Ok(Self { step })
    }

    /// The difference step `h`.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// The Jacobian `∂F_i/∂x_j`, stored column-major: column `j` holds
    /// the partial derivative of `F` along axis `j`.
    pub fn jacobian<F, E>(&self, field: F, at: DVec3) -> Result<DMat3, E>
    where
        F: Fn(DVec3) -> Result<DVec3, E>,
    {
        let h = self.step;
        let partial = |axis: DVec3| -> Result<DVec3, E> {
            let forward = field(at + axis * h)?;
            let backward = field(at - axis * h)?;
            Ok((forward - backward) / (2.0 * h))
        };
        Ok(DMat3::from_cols(
            partial(DVec3::X)?,
            partial(DVec3::Y)?,
            partial(DVec3::Z)?,
        ))
    }

    /// `∇·F` at `at`.
    pub fn divergence<F, E>(&self, field: F, at: DVec3) -> Result<f64, E>
    where
        F: Fn(DVec3) -> Result<DVec3, E>,
    {
        let j = self.jacobian(field, at)?;
        Ok(j.x_axis.x + j.y_axis.y + j.z_axis.z)
    }

    /// `∇×F` at `at`.
    pub fn curl<F, E>(&self, field: F, at: DVec3) -> Result<DVec3, E>
    where
        F: Fn(DVec3) -> Result<DVec3, E>,
    {
        Ok(curl_of(&self.jacobian(field, at)?))
    }
}

/// Curl read off a precomputed Jacobian.
pub(crate) fn curl_of(j: &DMat3) -> DVec3 {
    DVec3::new(
        j.y_axis.z - j.z_axis.y,
        j.z_axis.x - j.x_axis.z,
        j.x_axis.y - j.y_axis.x,
    )
}
