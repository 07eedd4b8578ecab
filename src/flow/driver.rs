//! Iterating a flow across generations.
//!
//! [`iterate`] applies a flow a fixed number of times, threading each step's
//! output into the next step's input. [`iterate_recorded`] additionally hands
//! every completed generation to a [`FrameRecorder`]; recorder failures are
//! collected in the returned [`FlowRecording`] and never interrupt the
//! geometric iteration, while flow errors terminate the run immediately.

use crate::error::{CaptureError, Result};
use crate::flow::Flow;

/// Applies `flow` to `initial` for `iterations` steps.
///
/// Zero iterations return `initial` unchanged. A failing step aborts the run
/// with its error; intermediate generations are dropped as soon as the next
/// one is computed.
pub fn iterate<F: Flow>(flow: &F, initial: F::Geometry, iterations: usize) -> Result<F::Geometry> {
    let mut current = initial;
    for _ in 0..iterations {
        current = flow.step(&current)?;
    }
    Ok(current)
}

/// Observes generations as a flow iterates.
///
/// `generation` is the 1-based step index of the geometry being captured.
/// Capturing is strictly observational: the driver hands the recorder a
/// reference to each completed generation and continues regardless of the
/// outcome.
pub trait FrameRecorder<G> {
    /// Captures one completed generation.
    fn capture(&mut self, generation: usize, geometry: &G) -> std::result::Result<(), CaptureError>;
}

/// A recorder that clones every captured generation into memory.
///
/// Useful for inspecting an evolution sequence in tests, and the shape a
/// host adapter would wrap to export real frames.
#[derive(Debug, Clone, Default)]
pub struct SnapshotRecorder<G> {
    frames: Vec<G>,
}

impl<G: Clone> SnapshotRecorder<G> {
    /// An empty recorder.
    pub fn new() -> Self {
        SnapshotRecorder { frames: Vec::new() }
    }

    /// The captured generations, in step order.
    #[inline]
    pub fn frames(&self) -> &[G] {
        &self.frames
    }
}

impl<G: Clone> FrameRecorder<G> for SnapshotRecorder<G> {
    fn capture(&mut self, _generation: usize, geometry: &G) -> std::result::Result<(), CaptureError> {
        self.frames.push(geometry.clone());
        Ok(())
    }
}

/// The outcome of a recorded flow run.
#[derive(Debug)]
pub struct FlowRecording<G> {
    /// The final generation.
    pub geometry: G,
    /// Number of frames the recorder accepted.
    pub frames_captured: usize,
    /// Capture failures by generation index, reported but non-fatal.
    pub capture_failures: Vec<(usize, CaptureError)>,
}

/// Applies `flow` for `iterations` steps, reporting each generation to
/// `recorder`.
///
/// The recorder sees every completed generation exactly once, in order.
/// Its failures accumulate in [`FlowRecording::capture_failures`]; only flow
/// errors abort the run.
pub fn iterate_recorded<F, R>(
    flow: &F,
    initial: F::Geometry,
    iterations: usize,
    recorder: &mut R,
) -> Result<FlowRecording<F::Geometry>>
where
    F: Flow,
    R: FrameRecorder<F::Geometry>,
{
    let mut current = initial;
    let mut frames_captured = 0;
    let mut capture_failures = Vec::new();
    for generation in 1..=iterations {
        current = flow.step(&current)?;
        match recorder.capture(generation, &current) {
            Ok(()) => frames_captured += 1,
            Err(error) => capture_failures.push((generation, error)),
        }
    }
    Ok(FlowRecording {
        geometry: current,
        frames_captured,
        capture_failures,
    })
}
