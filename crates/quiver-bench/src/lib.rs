//! Benchmark profiles and utilities for Quiver.
//!
//! Provides pre-built [`SimulationConfig`] profiles for benchmarking:
//!
//! - [`reference_profile`]: 100x100 grid (10K points), 4 orbiting charges
//! - [`stress_profile`]: 316x316 grid (~100K points), 8 orbiting charges
//! - [`orbit_charges`]: deterministic orbiting charges via seed
//!
//! Profile grids are spaced in powers of two, so some samples land exactly
//! on orbits; both profiles soften the field to keep every frame finite.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::f64::consts::TAU;

use quiver_engine::{ChargeConfig, GridConfig, SimulationConfig, TimeConfig};
use quiver_field::{SingularityPolicy, TrajectorySpec};
use quiver_space::AxisSpec;

fn square_grid(lower: f64, upper: f64, step: f64) -> GridConfig {
    let axis = AxisSpec { lower, upper, step };
    GridConfig { x: axis, y: axis }
}

fn profile(grid: GridConfig, charges: Vec<ChargeConfig>) -> SimulationConfig {
    SimulationConfig {
        singularity: SingularityPolicy::Soften { epsilon: 1e-3 },
        time: TimeConfig {
            dt: 0.05,
            steps: 100,
            ..TimeConfig::default()
        },
        grid,
        charges,
        ..SimulationConfig::default()
    }
}

/// Build a reference benchmark profile: 100x100 grid (10K points).
///
/// Four charges from [`orbit_charges`], 100 frames at dt=0.05.
pub fn reference_profile(seed: u64) -> SimulationConfig {
    profile(square_grid(-6.25, 6.25, 0.125), orbit_charges(4, seed))
}

/// Build a stress benchmark profile: 316x316 grid (~100K points).
///
/// Same timing as [`reference_profile`] with twice the charges.
pub fn stress_profile(seed: u64) -> SimulationConfig {
    profile(square_grid(-4.9375, 4.9375, 0.03125), orbit_charges(8, seed))
}

/// Generate deterministic orbiting charges.
///
/// Charges alternate in sign and sit on three concentric orbits about the
/// origin. Phase and angular velocity come from a simple hash of the seed.
pub fn orbit_charges(n: usize, seed: u64) -> Vec<ChargeConfig> {
    (0..n)
        .map(|i| {
            let h = seed
                .wrapping_mul(6364136223846793005)
                .wrapping_add(i as u64 * 1442695040888963407);
            let phase = (h % 3600) as f64 / 3600.0 * TAU;
            let angular_velocity = 0.5 + ((h >> 32) % 100) as f64 / 100.0;
            ChargeConfig {
                name: format!("q{i}"),
                charge: if i % 2 == 0 { 1.0 } else { -1.0 },
                trajectory: TrajectorySpec::Circular {
                    center: [0.0, 0.0],
                    radius: 1.0 + (i % 3) as f64 * 0.75,
                    angular_velocity,
                    phase,
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_profile_validates() {
        let config = reference_profile(42);
        config.validate().unwrap();
        assert_eq!(config.grid().unwrap().shape(), (100, 100));
    }

    #[test]
    fn stress_profile_validates() {
        let config = stress_profile(42);
        config.validate().unwrap();
        assert_eq!(config.grid().unwrap().point_count(), 316 * 316);
    }

    #[test]
    fn orbit_charges_are_neutral_and_uniquely_named() {
        let charges = orbit_charges(6, 7);
        assert_eq!(charges.iter().map(|c| c.charge).sum::<f64>(), 0.0);
        let names: std::collections::HashSet<_> = charges.iter().map(|c| &c.name).collect();
        assert_eq!(names.len(), 6);
    }

    #[test]
    fn orbit_charges_deterministic() {
        assert_eq!(orbit_charges(5, 42), orbit_charges(5, 42));
        assert_ne!(orbit_charges(5, 42), orbit_charges(5, 43));
    }
}
