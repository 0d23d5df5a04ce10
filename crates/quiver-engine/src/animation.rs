//! Synchronous frame-by-frame animation driver.
//!
//! [`FieldAnimation`] is the primary user-facing API. Each call to
//! [`step()`](FieldAnimation::step) generates one complete snapshot at
//! the next frame time; [`run()`](FieldAnimation::run) drives every
//! remaining frame into a [`SnapshotSink`].
//!
//! # Frame lifecycle
//!
//! generate snapshot → present to sink → optional pacing sleep.
//!
//! A frame is fully computed before the sink sees it, and the first
//! fault, in generation or in the sink, halts the run. The failing
//! frame is never presented. There is no cancellation model: a run ends
//! when its fixed step count is exhausted or a fault occurs.

use std::error::Error;
use std::fmt;
use std::time::{Duration, Instant};

use quiver_core::{FieldError, StepId};
use quiver_field::{
    snapshot_digest, ChargeMarker, FieldAggregator, FieldSnapshot, SinkError, SnapshotSink,
};
use tracing::{debug, error, info};

use crate::config::{ConfigError, SimulationConfig, TimeConfig};
use crate::metrics::StepMetrics;
use crate::scene::Scene;

// ── AnimationError ──────────────────────────────────────────────

/// A fault that halts the animation.
#[derive(Clone, Debug, PartialEq)]
pub enum AnimationError {
    /// Generating the snapshot for a frame failed.
    FrameFailed {
        /// The frame that failed.
        step: StepId,
        /// Its time.
        time: f64,
        /// The underlying field error.
        reason: FieldError,
    },
    /// The sink rejected a frame.
    SinkFailed {
        /// The frame that was rejected.
        step: StepId,
        /// The sink's error.
        reason: SinkError,
    },
}

impl fmt::Display for AnimationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FrameFailed { step, time, reason } => {
                write!(f, "frame {step} (t={time}) failed: {reason}")
            }
            Self::SinkFailed { step, reason } => write!(f, "frame {step}: {reason}"),
        }
    }
}

impl Error for AnimationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::FrameFailed { reason, .. } => Some(reason),
            Self::SinkFailed { reason, .. } => Some(reason),
        }
    }
}

// ── Frame ───────────────────────────────────────────────────────

/// One generated frame.
#[derive(Clone, Debug)]
pub struct Frame {
    /// Frame index.
    pub step: StepId,
    /// Frame time, `start_time + step * dt`.
    pub time: f64,
    /// The field at `time`.
    pub snapshot: FieldSnapshot,
    /// Charge positions at `time`.
    pub markers: Vec<ChargeMarker>,
    /// Generation metrics. `present_us` is zero until the frame has been
    /// presented by [`FieldAnimation::run`].
    pub metrics: StepMetrics,
}

/// Totals for a completed [`FieldAnimation::run`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunSummary {
    /// Frames generated and presented during this run.
    pub frames: u64,
    /// Wall-clock time for the run, in microseconds, including pacing.
    pub elapsed_us: u64,
    /// Largest field magnitude over all frames.
    pub max_field_magnitude: f64,
    /// Digest of the last frame, if any.
    pub last_digest: Option<u64>,
}

// ── FieldAnimation ──────────────────────────────────────────────

/// Drives a [`FieldAggregator`] over a fixed sequence of frame times.
///
/// Created from a [`SimulationConfig`] via [`new()`](FieldAnimation::new).
///
/// # Example
///
/// ```
/// use quiver_engine::{FieldAnimation, SimulationConfig};
/// use quiver_field::SummarySink;
///
/// let mut config = SimulationConfig::default();
/// config.time.steps = 3;
/// let mut animation = FieldAnimation::new(&config).unwrap();
/// let mut sink = SummarySink::new();
/// let summary = animation.run(&mut sink).unwrap();
/// assert_eq!(summary.frames, 3);
/// assert_eq!(sink.frames().len(), 3);
/// ```
pub struct FieldAnimation {
    aggregator: FieldAggregator,
    scene: Scene,
    dt: f64,
    start_time: f64,
    steps: u64,
    frame_delay: Option<Duration>,
    next: StepId,
    last_metrics: StepMetrics,
}

impl FieldAnimation {
    /// Validate `config` and build a ready-to-run animation at step 0.
    pub fn new(config: &SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let aggregator = FieldAggregator::new(config.grid()?, config.evaluator()?);
        Self::from_parts(aggregator, config.scene()?, &config.time)
    }

    /// Build from an aggregator and a scene assembled in code.
    ///
    /// Use this for trajectories that cannot be described in a
    /// [`SimulationConfig`], such as closures.
    pub fn from_parts(
        aggregator: FieldAggregator,
        scene: Scene,
        t: &TimeConfig,
    ) -> Result<Self, ConfigError> {
        t.validate()?;
        info!(
            points = aggregator.grid().point_count(),
            charges = scene.len(),
            steps = t.steps,
            dt = t.dt,
            "field animation built"
        );
        Ok(Self {
            aggregator,
            scene,
            dt: t.dt,
            start_time: t.start_time,
            steps: t.steps,
            frame_delay: (t.frame_delay_ms > 0).then(|| Duration::from_millis(t.frame_delay_ms)),
            next: StepId::default(),
            last_metrics: StepMetrics::default(),
        })
    }

    /// Time of frame `step`.
    pub fn time_at(&self, step: StepId) -> f64 {
        self.start_time + step.0 as f64 * self.dt
    }

    /// The next frame to be generated.
    pub fn current_step(&self) -> StepId {
        self.next
    }

    /// Total number of frames in the run.
    pub fn total_steps(&self) -> u64 {
        self.steps
    }

    /// `true` once every frame has been generated.
    pub fn is_finished(&self) -> bool {
        self.next.0 >= self.steps
    }

    /// The charges being animated.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The grid and evaluator.
    pub fn aggregator(&self) -> &FieldAggregator {
        &self.aggregator
    }

    /// Metrics from the most recent successful frame.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// Rewind to step 0.
    pub fn reset(&mut self) {
        self.next = StepId::default();
        self.last_metrics = StepMetrics::default();
    }

    /// Generate the next frame.
    ///
    /// Returns `Ok(None)` once the step count is exhausted. On error the
    /// step counter does not advance.
    pub fn step(&mut self) -> Result<Option<Frame>, AnimationError> {
        if self.is_finished() {
            return Ok(None);
        }
        let step = self.next;
        let time = self.time_at(step);
        let started = Instant::now();
        let snapshot = self
            .aggregator
            .generate(time, self.scene.sources())
            .map_err(|reason| AnimationError::FrameFailed { step, time, reason })?;
        let markers = self.scene.markers_at(time);
        let generate_us = started.elapsed().as_micros() as u64;

        let metrics = StepMetrics {
            total_us: generate_us,
            generate_us,
            present_us: 0,
            point_count: snapshot.len(),
            charge_count: self.scene.len(),
            max_field_magnitude: snapshot.max_field_magnitude(),
            digest: snapshot_digest(&snapshot),
        };
        self.last_metrics = metrics.clone();
        self.next = step.next();
        Ok(Some(Frame {
            step,
            time,
            snapshot,
            markers,
            metrics,
        }))
    }

    /// Generate and present every remaining frame.
    ///
    /// # Errors
    ///
    /// Returns the first [`AnimationError`]; later frames are not
    /// generated.
    pub fn run<S: SnapshotSink + ?Sized>(
        &mut self,
        sink: &mut S,
    ) -> Result<RunSummary, AnimationError> {
        info!(from = %self.next, to = self.steps, "run started");
        let started = Instant::now();
        let mut summary = RunSummary::default();
        loop {
            let frame = match self.step() {
                Ok(Some(frame)) => frame,
                Ok(None) => break,
                Err(e) => {
                    error!(error = %e, "animation halted");
                    return Err(e);
                }
            };

            let presenting = Instant::now();
            if let Err(reason) = sink.present(frame.step, &frame.snapshot, &frame.markers) {
                let e = AnimationError::SinkFailed {
                    step: frame.step,
                    reason,
                };
                error!(error = %e, "animation halted");
                return Err(e);
            }
            let mut metrics = frame.metrics;
            metrics.present_us = presenting.elapsed().as_micros() as u64;
            metrics.total_us = metrics.generate_us + metrics.present_us;
            debug!(
                step = %frame.step,
                t = frame.time,
                digest = format_args!("{:016x}", metrics.digest),
                generate_us = metrics.generate_us,
                present_us = metrics.present_us,
                "frame presented"
            );

            summary.frames += 1;
            summary.max_field_magnitude = summary.max_field_magnitude.max(metrics.max_field_magnitude);
            summary.last_digest = Some(metrics.digest);
            self.last_metrics = metrics;

            if let Some(delay) = self.frame_delay {
                std::thread::sleep(delay);
            }
        }
        summary.elapsed_us = started.elapsed().as_micros() as u64;
        info!(
            frames = summary.frames,
            elapsed_us = summary.elapsed_us,
            "run finished"
        );
        Ok(summary)
    }
}

impl fmt::Debug for FieldAnimation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldAnimation")
            .field("current_step", &self.next)
            .field("steps", &self.steps)
            .field("charges", &self.scene.len())
            .field("shape", &self.aggregator.grid().shape())
            .finish()
    }
}
