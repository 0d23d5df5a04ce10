//! Reusable charge scenes and evaluator configurations.
//!
//! Unit constants put `ε₀ = 1/4π` and `c = 1`, so the standard Coulomb
//! coefficient is 1 and retardation is visible at grid scales:
//!
//! - [`unit_evaluator`]: analytic derivatives, standard convention.
//! - [`static_charge`]: a charge at rest.
//! - [`orbiting_pair`]: opposite charges on one circle, half a turn apart.
//! - [`symmetric_pair`]: charges mirrored through the origin.
//! - [`NonFiniteTrajectory`]: blows up after a given time.

use glam::DVec2;
use quiver_core::{CoulombConvention, PhysicalConstants, Trajectory};
use quiver_field::{
    ChargeSource, CircularOrbit, DerivativeMode, FieldAggregator, RetardedFieldEvaluator,
    SingularityPolicy, Stationary,
};
use quiver_space::{Axis, Grid2D};
use std::f64::consts::PI;

/// `ε₀ = 1/4π`, `μ₀ = 4π`, `c = 1`.
pub fn unit_constants() -> PhysicalConstants {
    PhysicalConstants {
        permittivity: 1.0 / (4.0 * PI),
        permeability: 4.0 * PI,
        speed_of_light: 1.0,
    }
}

/// Evaluator over unit constants with the given convention and method.
pub fn evaluator_with(
    convention: CoulombConvention,
    singularity: SingularityPolicy,
    derivatives: DerivativeMode,
) -> RetardedFieldEvaluator {
    RetardedFieldEvaluator::builder()
        .constants(unit_constants())
        .convention(convention)
        .singularity(singularity)
        .derivatives(derivatives)
        .build()
        .expect("fixture evaluator configuration is valid")
}

/// Analytic evaluator with `k = 1`.
pub fn unit_evaluator() -> RetardedFieldEvaluator {
    evaluator_with(
        CoulombConvention::Standard,
        SingularityPolicy::Error,
        DerivativeMode::Analytic,
    )
}

/// `[-2.25, 2.25)` on both axes with step 0.5: 9×9 points, none on an
/// integer or half-integer coordinate.
pub fn small_grid() -> Grid2D {
    Grid2D::square(-2.25, 2.25, 0.5).expect("fixture grid is valid")
}

/// Non-square grid, 7 × 4, for catching swapped axes.
pub fn skewed_grid() -> Grid2D {
    let xs = Axis::new(-1.75, 1.75, 0.5).expect("fixture axis is valid");
    let ys = Axis::new(-0.9, 1.1, 0.5).expect("fixture axis is valid");
    Grid2D::new(xs, ys).expect("fixture grid is valid")
}

/// [`small_grid`] paired with [`unit_evaluator`].
pub fn unit_aggregator() -> FieldAggregator {
    FieldAggregator::new(small_grid(), unit_evaluator())
}

/// A charge at rest at `position`.
pub fn static_charge(charge: f64, position: DVec2) -> ChargeSource {
    ChargeSource::new(charge, Stationary { position })
}

/// `+1` and `-1` orbiting the origin at `radius`, half a turn apart,
/// with angular velocity `omega`. At `t = 0` the positive charge sits at
/// `(radius, 0)` and the negative one at `(-radius, 0)`.
pub fn orbiting_pair(radius: f64, omega: f64) -> Vec<ChargeSource> {
    [(1.0, 0.0), (-1.0, PI)]
        .into_iter()
        .map(|(charge, phase)| {
            ChargeSource::new(
                charge,
                CircularOrbit {
                    center: DVec2::ZERO,
                    radius,
                    angular_velocity: omega,
                    phase,
                },
            )
        })
        .collect()
}

/// Two static charges at `±position`, with signs `q` and `q * sign`.
pub fn symmetric_pair(q: f64, sign: f64, position: DVec2) -> Vec<ChargeSource> {
    vec![
        static_charge(q, position),
        static_charge(q * sign, -position),
    ]
}

/// Trajectory that moves linearly until `fail_after`, then returns NaN.
#[derive(Clone, Copy, Debug)]
pub struct NonFiniteTrajectory {
    pub fail_after: f64,
}

impl Trajectory for NonFiniteTrajectory {
    fn position(&self, t: f64) -> DVec2 {
        if t > self.fail_after {
            DVec2::NAN
        } else {
            DVec2::new(0.1 * t + 0.05, 0.05)
        }
    }
}

/// A charge riding a [`NonFiniteTrajectory`].
pub fn failing_charge(fail_after: f64) -> ChargeSource {
    ChargeSource::new(1.0, NonFiniteTrajectory { fail_after })
}
