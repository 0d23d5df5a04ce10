//! The retarded electric field of a single moving point charge.
//!
//! For an evaluation point `p` at time `t`, the charge is observed where
//! it was one light-travel time ago:
//!
//! 1. `r0 = |p - s(t)|`, the present distance.
//! 2. `τ = t - r0 / c`, the retarded time.
//! 3. `d = p - s(τ)`, `R = |d|`.
//! 4. `E = k q d / R³`.
//!
//! Divergence and curl are taken of the field *as a function of `p`*,
//! including the dependence of `s(τ)` on `p` through the delay. The
//! analytic path differentiates the steps above in closed form; the
//! finite-difference path samples them with [`Nabla`].

use crate::charge::ChargeSource;
use crate::nabla::{curl_of, Nabla};
use glam::{DMat2, DVec2, DVec3};
use quiver_core::{CoulombConvention, EvalError, PhysicalConstants};
use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// One charge's contribution at one point: field, `∇·E`, and `(∇×E)_z`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Contribution {
    /// Electric field vector.
    pub field: DVec2,
    /// Divergence of the field.
    pub divergence: f64,
    /// The z-component of the curl. The in-plane components vanish for a
    /// planar field.
    pub curl_z: f64,
}

impl Contribution {
    /// No field, no divergence, no curl.
    pub const ZERO: Self = Self {
        field: DVec2::ZERO,
        divergence: 0.0,
        curl_z: 0.0,
    };

    /// `true` if every component is finite.
    pub fn is_finite(&self) -> bool {
        self.field.is_finite() && self.divergence.is_finite() && self.curl_z.is_finite()
    }

    /// Multiply every component by `factor`.
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            field: self.field * factor,
            divergence: self.divergence * factor,
            curl_z: self.curl_z * factor,
        }
    }
}

impl Add for Contribution {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            field: self.field + rhs.field,
            divergence: self.divergence + rhs.divergence,
            curl_z: self.curl_z + rhs.curl_z,
        }
    }
}

impl AddAssign for Contribution {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Contribution {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// What to do when the evaluation point coincides with the retarded
/// charge position (`R = 0`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum SingularityPolicy {
    /// Fail with [`EvalError::Singular`].
    #[default]
    Error,
    /// Contribute nothing at the singular point: zero field, divergence,
    /// and curl under either derivative mode.
    Zero,
    /// Plummer softening: replace `R²` with `R² + ε²` everywhere.
    Soften {
        /// Softening length ε.
        epsilon: f64,
    },
}

/// How divergence and curl are computed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DerivativeMode {
    /// Closed-form Jacobian of the retarded field.
    #[default]
    Analytic,
    /// Central differences with the given step.
    FiniteDifference {
        /// Difference step `h`.
        step: f64,
    },
}

/// Where and when a charge is seen from an evaluation point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RetardedGeometry {
    /// `τ = t - r0 / c`. May be negative, in which case the charge is
    /// seen at its initial position.
    pub retarded_time: f64,
    /// `s(τ)`, clamped to the initial position for `τ < 0`.
    pub retarded_position: DVec2,
    /// `d = p - s(τ)`.
    pub separation: DVec2,
    /// Unit vector from the present charge position to `p`, or zero if
    /// they coincide.
    pub present_direction: DVec2,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Differentiator {
    Analytic,
    Central(Nabla),
}

/// Evaluates one charge's retarded field, divergence, and curl at a point.
///
/// Pure: all configuration is held by value and evaluation never
/// mutates. Build with [`RetardedFieldEvaluator::builder`].
///
/// ```
/// use glam::DVec2;
/// use quiver_core::CoulombConvention;
/// use quiver_field::{ChargeSource, RetardedFieldEvaluator};
///
/// let evaluator = RetardedFieldEvaluator::builder()
///     .convention(CoulombConvention::Standard)
///     .build()
///     .unwrap();
/// let q = ChargeSource::new(1e-9, |_t: f64| DVec2::ZERO);
/// let c = evaluator.evaluate(DVec2::new(1.0, 0.0), 0.0, &q).unwrap();
/// assert!((c.field.x - 8.9875517923).abs() < 1e-6);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct RetardedFieldEvaluator {
    constants: PhysicalConstants,
    convention: CoulombConvention,
    singularity: SingularityPolicy,
    differentiator: Differentiator,
    coefficient: f64,
}

/// Builder for [`RetardedFieldEvaluator`].
#[derive(Clone, Debug, Default)]
pub struct RetardedFieldEvaluatorBuilder {
    constants: PhysicalConstants,
    convention: CoulombConvention,
    singularity: SingularityPolicy,
    derivatives: DerivativeMode,
}

impl RetardedFieldEvaluatorBuilder {
    /// Physical constants. Defaults to [`PhysicalConstants::SI`].
    pub fn constants(mut self, constants: PhysicalConstants) -> Self {
        self.constants = constants;
        self
    }

    /// Coulomb coefficient convention.
    pub fn convention(mut self, convention: CoulombConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Behaviour at `R = 0`.
    pub fn singularity(mut self, singularity: SingularityPolicy) -> Self {
        self.singularity = singularity;
        self
    }

    /// Derivative method.
    pub fn derivatives(mut self, derivatives: DerivativeMode) -> Self {
        self.derivatives = derivatives;
        self
    }

    /// Build the evaluator, validating all configuration.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - a physical constant is non-finite or non-positive
    /// - the softening length is non-finite or non-positive
    /// - the finite-difference step is non-finite or non-positive
    pub fn build(self) -> Result<RetardedFieldEvaluator, String> {
        self.constants.validate().map_err(|e| e.to_string())?;
        if let SingularityPolicy::Soften { epsilon } = self.singularity {
            if !epsilon.is_finite() || epsilon <= 0.0 {
                return Err(format!(
                    "softening epsilon must be finite and positive, got {epsilon}"
                ));
            }
        }
        let differentiator = match self.derivatives {
            DerivativeMode::Analytic => Differentiator::Analytic,
            DerivativeMode::FiniteDifference { step } => Differentiator::Central(Nabla::new(step)?),
        };
        Ok(RetardedFieldEvaluator {
            constants: self.constants,
            convention: self.convention,
            singularity: self.singularity,
            differentiator,
            coefficient: self.constants.coulomb_coefficient(self.convention),
        })
    }
}

impl RetardedFieldEvaluator {
    /// Start configuring an evaluator.
    pub fn builder() -> RetardedFieldEvaluatorBuilder {
        RetardedFieldEvaluatorBuilder::default()
    }

    /// The physical constants in use.
    pub fn constants(&self) -> &PhysicalConstants {
        &self.constants
    }

    /// The Coulomb convention in use.
    pub fn convention(&self) -> CoulombConvention {
        self.convention
    }

    /// The singularity policy in use.
    pub fn singularity(&self) -> SingularityPolicy {
        self.singularity
    }

    /// The derivative method in use.
    pub fn derivative_mode(&self) -> DerivativeMode {
        match self.differentiator {
            Differentiator::Analytic => DerivativeMode::Analytic,
            Differentiator::Central(nabla) => DerivativeMode::FiniteDifference { step: nabla.step() },
        }
    }

    /// The Coulomb coefficient `k`.
    pub fn coulomb_coefficient(&self) -> f64 {
        self.coefficient
    }

    /// Locate the charge as seen from `point` at time `t`.
    pub fn retarded_geometry(
        &self,
        point: DVec2,
        t: f64,
        source: &ChargeSource,
    ) -> Result<RetardedGeometry, EvalError> {
        let present = checked_position(source, t)?;
        let offset = point - present;
        let r0 = offset.length();
        let present_direction = if r0 > 0.0 { offset / r0 } else { DVec2::ZERO };
        let retarded_time = t - r0 / self.constants.speed_of_light;
        let retarded_position = checked_position(source, retarded_time)?;
        Ok(RetardedGeometry {
            retarded_time,
            retarded_position,
            separation: point - retarded_position,
            present_direction,
        })
    }

    /// The field vector alone.
    pub fn field_at(
        &self,
        point: DVec2,
        t: f64,
        source: &ChargeSource,
    ) -> Result<DVec2, EvalError> {
        if source.charge() == 0.0 {
            return Ok(DVec2::ZERO);
        }
        let geometry = self.retarded_geometry(point, t, source)?;
        let Some(s) = self.distance(point, &geometry)? else {
            return Ok(DVec2::ZERO);
        };
        let field = self.coefficient * source.charge() * geometry.separation / (s * s * s);
        if field.is_finite() {
            Ok(field)
        } else {
            Err(EvalError::NonFiniteResult { point })
        }
    }

    /// Field, divergence, and curl-z of one charge at `point`, time `t`.
    ///
    /// A zero charge contributes exactly [`Contribution::ZERO`] without
    /// querying its trajectory.
    pub fn evaluate(
        &self,
        point: DVec2,
        t: f64,
        source: &ChargeSource,
    ) -> Result<Contribution, EvalError> {
        if source.charge() == 0.0 {
            return Ok(Contribution::ZERO);
        }
        let contribution = match self.differentiator {
            Differentiator::Analytic => self.analytic(point, t, source)?,
            Differentiator::Central(nabla) => self.central(nabla, point, t, source)?,
        };
        if contribution.is_finite() {
            Ok(contribution)
        } else {
            Err(EvalError::NonFiniteResult { point })
        }
    }

    /// Effective distance `S`, or `None` when the point is singular and
    /// the policy says to contribute nothing.
    fn distance(&self, point: DVec2, geometry: &RetardedGeometry) -> Result<Option<f64>, EvalError> {
        let r2 = geometry.separation.length_squared();
        match self.singularity {
            SingularityPolicy::Soften { epsilon } => Ok(Some((r2 + epsilon * epsilon).sqrt())),
            _ if r2 > 0.0 => Ok(Some(r2.sqrt())),
            SingularityPolicy::Zero => Ok(None),
            SingularityPolicy::Error => Err(EvalError::Singular {
                point,
                retarded: geometry.retarded_position,
            }),
        }
    }

    fn analytic(
        &self,
        point: DVec2,
        t: f64,
        source: &ChargeSource,
    ) -> Result<Contribution, EvalError> {
        let geometry = self.retarded_geometry(point, t, source)?;
        let Some(s) = self.distance(point, &geometry)? else {
            return Ok(Contribution::ZERO);
        };
        let kq = self.coefficient * source.charge();
        let d = geometry.separation;
        let u = geometry.present_direction;
        let v = source.velocity_at(geometry.retarded_time) / self.constants.speed_of_light;

        // ∂d/∂p = I + v uᵀ / c
        let jd = DMat2::from_cols(DVec2::X + v * u.x, DVec2::Y + v * u.y);
        let w = jd.transpose() * d;
        let s3 = s * s * s;
        let s5 = s3 * s * s;
        let outer = DMat2::from_cols(d * w.x, d * w.y);
        let jf = (jd * (1.0 / s3) - outer * (3.0 / s5)) * kq;

        Ok(Contribution {
            field: kq * d / s3,
            divergence: jf.x_axis.x + jf.y_axis.y,
            curl_z: jf.x_axis.y - jf.y_axis.x,
        })
    }

    fn central(
        &self,
        nabla: Nabla,
        point: DVec2,
        t: f64,
        source: &ChargeSource,
    ) -> Result<Contribution, EvalError> {
        let geometry = self.retarded_geometry(point, t, source)?;
        if self.distance(point, &geometry)?.is_none() {
            return Ok(Contribution::ZERO);
        }
        let field = self.field_at(point, t, source)?;
        let sample = |p: DVec3| self.field_at(p.truncate(), t, source).map(|f| f.extend(0.0));
        let jacobian = nabla.jacobian(sample, point.extend(0.0))?;
        Ok(Contribution {
            field,
            divergence: jacobian.x_axis.x + jacobian.y_axis.y + jacobian.z_axis.z,
            curl_z: curl_of(&jacobian).z,
        })
    }
}

fn checked_position(source: &ChargeSource, t: f64) -> Result<DVec2, EvalError> {
    let position = source.position_at(t);
    if position.is_finite() {
        Ok(position)
    } else {
        Err(EvalError::NonFiniteTrajectory {
            time: t.max(0.0),
            position,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trajectory::{CircularOrbit, LinearMotion, Stationary};
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    /// ε₀ = 1/4π and c = 1, so the standard convention gives k = 1.
    fn unit_constants() -> PhysicalConstants {
        PhysicalConstants {
            permittivity: 1.0 / (4.0 * PI),
            permeability: 4.0 * PI,
            speed_of_light: 1.0,
        }
    }

    fn unit_evaluator() -> RetardedFieldEvaluator {
        RetardedFieldEvaluator::builder()
            .constants(unit_constants())
            .convention(CoulombConvention::Standard)
            .build()
            .unwrap()
    }

    fn at_rest(charge: f64, x: f64, y: f64) -> ChargeSource {
        ChargeSource::new(
            charge,
            Stationary {
                position: DVec2::new(x, y),
            },
        )
    }

    #[test]
    fn unit_charge_at_origin_gives_coefficient() {
        for convention in [CoulombConvention::Reference, CoulombConvention::Standard] {
            let evaluator = RetardedFieldEvaluator::builder()
                .constants(unit_constants())
                .convention(convention)
                .build()
                .unwrap();
            let k = unit_constants().coulomb_coefficient(convention);
            let c = evaluator
                .evaluate(DVec2::new(1.0, 0.0), 0.0, &at_rest(1.0, 0.0, 0.0))
                .unwrap();
            assert_relative_eq!(c.field.x, k, max_relative = 1e-12);
            assert_eq!(c.field.y, 0.0);
            assert_relative_eq!(evaluator.coulomb_coefficient(), k);
        }
    }

    #[test]
    fn inverse_square_falloff() {
        let evaluator = unit_evaluator();
        let q = at_rest(2.0, 0.0, 0.0);
        let near = evaluator.field_at(DVec2::new(0.0, 1.0), 0.0, &q).unwrap();
        let far = evaluator.field_at(DVec2::new(0.0, 2.0), 0.0, &q).unwrap();
        assert_relative_eq!(near.y / far.y, 4.0, max_relative = 1e-12);
    }

    #[test]
    fn static_divergence_and_curl() {
        let evaluator = unit_evaluator();
        let q = at_rest(-3.0, 1.0, 1.0);
        let p = DVec2::new(2.5, -0.5);
        let r = (p - DVec2::ONE).length();
        let c = evaluator.evaluate(p, 1.0, &q).unwrap();
        assert_relative_eq!(c.divergence, 3.0 / r.powi(3), max_relative = 1e-12);
        assert_relative_eq!(c.curl_z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn zero_charge_skips_trajectory() {
        let evaluator = unit_evaluator();
        let q = ChargeSource::new(0.0, |_t: f64| DVec2::NAN);
        assert_eq!(
            evaluator.evaluate(DVec2::ONE, 1.0, &q).unwrap(),
            Contribution::ZERO
        );
        assert_eq!(evaluator.field_at(DVec2::ONE, 1.0, &q).unwrap(), DVec2::ZERO);
    }

    #[test]
    fn singular_point_follows_policy() {
        let q = at_rest(1.0, 0.5, 0.5);
        let p = DVec2::new(0.5, 0.5);

        let err = unit_evaluator().evaluate(p, 0.0, &q).unwrap_err();
        assert_eq!(
            err,
            EvalError::Singular {
                point: p,
                retarded: p
            }
        );

        let zero = RetardedFieldEvaluator::builder()
            .constants(unit_constants())
            .singularity(SingularityPolicy::Zero)
            .build()
            .unwrap();
        assert_eq!(zero.evaluate(p, 0.0, &q).unwrap(), Contribution::ZERO);

        let soft = RetardedFieldEvaluator::builder()
            .constants(unit_constants())
            .convention(CoulombConvention::Standard)
            .singularity(SingularityPolicy::Soften { epsilon: 0.5 })
            .build()
            .unwrap();
        let c = soft.evaluate(p, 0.0, &q).unwrap();
        assert_eq!(c.field, DVec2::ZERO);
        // Plummer core: div = k q (2/ε³) at the center.
        assert_relative_eq!(c.divergence, 2.0 / 0.125, max_relative = 1e-12);
    }

    #[test]
    fn zero_policy_is_zero_under_both_derivative_modes() {
        let p = DVec2::new(0.75, -0.25);
        let q = at_rest(1.0, p.x, p.y);
        for derivatives in [
            DerivativeMode::Analytic,
            DerivativeMode::FiniteDifference { step: 1e-5 },
        ] {
            let evaluator = RetardedFieldEvaluator::builder()
                .constants(unit_constants())
                .singularity(SingularityPolicy::Zero)
                .derivatives(derivatives)
                .build()
                .unwrap();
            assert_eq!(
                evaluator.evaluate(p, 0.0, &q).unwrap(),
                Contribution::ZERO,
                "{derivatives:?}"
            );
            // Away from the charge the finite-difference path still runs.
            let off = evaluator.evaluate(p + DVec2::X, 0.0, &q).unwrap();
            assert!(off.field.x > 0.0, "{derivatives:?}");
        }
    }

    #[test]
    fn softening_weakens_the_near_field() {
        let q = at_rest(1.0, 0.0, 0.0);
        let p = DVec2::new(0.1, 0.0);
        let hard = unit_evaluator().field_at(p, 0.0, &q).unwrap();
        let soft = RetardedFieldEvaluator::builder()
            .constants(unit_constants())
            .convention(CoulombConvention::Standard)
            .singularity(SingularityPolicy::Soften { epsilon: 0.1 })
            .build()
            .unwrap()
            .field_at(p, 0.0, &q)
            .unwrap();
        assert!(soft.x < hard.x);
        assert!(soft.x > 0.0);
    }

    #[test]
    fn retarded_time_uses_present_distance() {
        let evaluator = unit_evaluator();
        let q = ChargeSource::new(
            1.0,
            LinearMotion {
                start: DVec2::ZERO,
                velocity: DVec2::new(0.5, 0.0),
            },
        );
        let p = DVec2::new(0.0, 3.0);
        let g = evaluator.retarded_geometry(p, 4.0, &q).unwrap();
        let r0 = 13.0f64.sqrt();
        assert_relative_eq!(g.retarded_time, 4.0 - r0, max_relative = 1e-12);
        assert_relative_eq!(g.retarded_position.x, 0.5 * (4.0 - r0), max_relative = 1e-12);
        assert_relative_eq!(g.present_direction.length(), 1.0, max_relative = 1e-12);
        assert_eq!(g.separation, p - g.retarded_position);
    }

    #[test]
    fn early_times_see_the_initial_position() {
        let evaluator = unit_evaluator();
        let q = ChargeSource::new(
            1.0,
            LinearMotion {
                start: DVec2::new(1.0, 0.0),
                velocity: DVec2::new(0.3, 0.2),
            },
        );
        let p = DVec2::new(-2.0, 1.0);
        let moving = evaluator.evaluate(p, 0.5, &q).unwrap();
        let fixed = evaluator.evaluate(p, 0.5, &at_rest(1.0, 1.0, 0.0)).unwrap();
        // |p - s(0.5)| > 0.5 = c·t, so τ < 0.
        assert_eq!(moving, fixed);
    }

    #[test]
    fn analytic_matches_finite_difference_for_moving_charge() {
        let analytic = unit_evaluator();
        let numeric = RetardedFieldEvaluator::builder()
            .constants(unit_constants())
            .convention(CoulombConvention::Standard)
            .derivatives(DerivativeMode::FiniteDifference { step: 1e-5 })
            .build()
            .unwrap();
        let q = ChargeSource::new(
            1.5,
            CircularOrbit {
                center: DVec2::ZERO,
                radius: 2.0,
                angular_velocity: 0.3,
                phase: 0.4,
            },
        );
        for (x, y, t) in [(0.25, 0.75, 10.0), (-3.25, 1.5, 7.5), (4.0, -4.0, 20.0)] {
            let p = DVec2::new(x, y);
            let a = analytic.evaluate(p, t, &q).unwrap();
            let n = numeric.evaluate(p, t, &q).unwrap();
            assert_relative_eq!(a.field.x, n.field.x, max_relative = 1e-12);
            assert_relative_eq!(a.field.y, n.field.y, max_relative = 1e-12);
            assert_relative_eq!(a.divergence, n.divergence, epsilon = 1e-5, max_relative = 1e-5);
            assert_relative_eq!(a.curl_z, n.curl_z, epsilon = 1e-5, max_relative = 1e-5);
        }
    }

    #[test]
    fn moving_charge_has_curl() {
        let q = ChargeSource::new(
            1.0,
            CircularOrbit {
                center: DVec2::ZERO,
                radius: 2.0,
                angular_velocity: 0.4,
                phase: 0.0,
            },
        );
        let c = unit_evaluator()
            .evaluate(DVec2::new(0.25, 0.75), 10.0, &q)
            .unwrap();
        assert!(c.curl_z.abs() > 1e-6, "curl_z = {}", c.curl_z);
    }

    #[test]
    fn non_finite_trajectory_is_reported() {
        let q = ChargeSource::new(1.0, |t: f64| DVec2::new(1.0 / (1.0 - t), 0.0));
        let err = unit_evaluator()
            .evaluate(DVec2::new(5.0, 5.0), 1.0, &q)
            .unwrap_err();
        assert!(matches!(err, EvalError::NonFiniteTrajectory { time, .. } if time == 1.0));
    }

    #[test]
    fn builder_rejects_bad_configuration() {
        let mut constants = unit_constants();
        constants.speed_of_light = -1.0;
        let err = RetardedFieldEvaluator::builder()
            .constants(constants)
            .build()
            .unwrap_err();
        assert!(err.contains("speed_of_light"), "got {err}");

        let err = RetardedFieldEvaluator::builder()
            .singularity(SingularityPolicy::Soften { epsilon: 0.0 })
            .build()
            .unwrap_err();
        assert!(err.contains("epsilon"), "got {err}");

        let err = RetardedFieldEvaluator::builder()
            .derivatives(DerivativeMode::FiniteDifference { step: f64::NAN })
            .build()
            .unwrap_err();
        assert!(err.contains("step"), "got {err}");
    }

    #[test]
    fn derivative_mode_round_trips_through_builder() {
        let evaluator = RetardedFieldEvaluator::builder()
            .derivatives(DerivativeMode::FiniteDifference { step: 1e-3 })
            .build()
            .unwrap();
        assert_eq!(
            evaluator.derivative_mode(),
            DerivativeMode::FiniteDifference { step: 1e-3 }
        );
        assert_eq!(
            RetardedFieldEvaluator::builder().build().unwrap().derivative_mode(),
            DerivativeMode::Analytic
        );
    }

    #[test]
    fn contributions_sum_componentwise() {
        let a = Contribution {
            field: DVec2::new(1.0, 2.0),
            divergence: 3.0,
            curl_z: -1.0,
        };
        let total: Contribution = [a, a.scaled(-2.0)].into_iter().sum();
        assert_eq!(total, a.scaled(-1.0));
    }
}
