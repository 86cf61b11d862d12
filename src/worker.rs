//! Background analysis worker
//!
//! Runs the fake analysis on its own thread and streams events back to
//! whoever owns the receiver (the window, or the headless runner).

use std::sync::{Arc, atomic::{AtomicBool, Ordering}};
use std::thread::JoinHandle;
use std::time::Duration;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::error::{EncabulatorError, Result};
use crate::messages;

/// Last progress value of a run
pub const FINAL_PROGRESS: u8 = 100;

/// Events emitted by the analysis worker, in emission order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisEvent {
    /// Progress moved to the given percentage
    Progress(u8),
    /// A line for the analysis log
    Log(String),
    /// The visualizer should flash
    Visualize,
    /// The run reached the end with this verdict
    Complete(String),
    /// The run was stopped before the end
    Aborted,
    /// The worker thread is about to exit; always the last event
    Finished,
}

/// Timing and probability knobs for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Pause after each warmup line
    pub warmup_delay_ms: u64,
    /// Lower bound of the random pause between steps
    pub min_step_delay_ms: u64,
    /// Upper bound of the random pause between steps
    pub max_step_delay_ms: u64,
    /// Probability of a chatter line on each step
    pub chatter_chance: f64,
    /// Flash the visualizer every N steps
    pub visualize_every: u8,
    /// Fixed RNG seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            warmup_delay_ms: 500,
            min_step_delay_ms: 50,
            max_step_delay_ms: 150,
            chatter_chance: 0.1,
            visualize_every: 2,
            seed: None,
        }
    }
}

impl AnalysisSettings {
    /// Settings with every delay removed
    pub fn instant() -> Self {
        Self {
            warmup_delay_ms: 0,
            min_step_delay_ms: 0,
            max_step_delay_ms: 0,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_step_delay_ms > self.max_step_delay_ms {
            return Err(EncabulatorError::InvalidSettings(format!(
                "min_step_delay_ms ({}) exceeds max_step_delay_ms ({})",
                self.min_step_delay_ms, self.max_step_delay_ms
            )));
        }
        if !(0.0..=1.0).contains(&self.chatter_chance) {
            return Err(EncabulatorError::InvalidSettings(format!(
                "chatter_chance must be within [0, 1], got {}",
                self.chatter_chance
            )));
        }
        if self.visualize_every == 0 {
            return Err(EncabulatorError::InvalidSettings(
                "visualize_every must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Build the RNG for a run, seeded if a seed is configured
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed(String),
    Aborted,
    /// Nobody is listening anymore
    Disconnected,
}

/// Drive one analysis run on the current thread.
///
/// `emit` returns `false` once the consumer is gone; the run then ends
/// without emitting anything else. The `running` flag is checked before
/// every step.
pub fn run_analysis<R, F>(
    settings: &AnalysisSettings,
    rng: &mut R,
    running: &AtomicBool,
    mut emit: F,
) -> RunOutcome
where
    R: Rng,
    F: FnMut(AnalysisEvent) -> bool,
{
    for line in messages::WARMUP_LINES {
        if !emit(AnalysisEvent::Log(line.to_string())) {
            return RunOutcome::Disconnected;
        }
        pause(settings.warmup_delay_ms);
    }

    for step in 0..=FINAL_PROGRESS {
        if !running.load(Ordering::SeqCst) {
            info!("Analysis aborted at {}%", step);
            if !emit(AnalysisEvent::Aborted) {
                return RunOutcome::Disconnected;
            }
            return RunOutcome::Aborted;
        }

        if !emit(AnalysisEvent::Progress(step)) {
            return RunOutcome::Disconnected;
        }

        if step % settings.visualize_every == 0 && !emit(AnalysisEvent::Visualize) {
            return RunOutcome::Disconnected;
        }

        if rng.random_bool(settings.chatter_chance) {
            let line = messages::random_chatter(rng);
            debug!("Chatter at {}%: {}", step, line);
            if !emit(AnalysisEvent::Log(line.to_string())) {
                return RunOutcome::Disconnected;
            }
        }

        let delay = rng.random_range(settings.min_step_delay_ms..=settings.max_step_delay_ms);
        pause(delay);
    }

    if !emit(AnalysisEvent::Log(messages::COMPLETE_LINE.to_string())) {
        return RunOutcome::Disconnected;
    }

    let verdict = messages::random_verdict(rng).to_string();
    if !emit(AnalysisEvent::Complete(verdict.clone())) {
        return RunOutcome::Disconnected;
    }
    RunOutcome::Completed(verdict)
}

fn pause(ms: u64) {
    if ms > 0 {
        std::thread::sleep(Duration::from_millis(ms));
    }
}

/// Handle to a running analysis thread
pub struct AnalysisWorker {
    /// Cooperative cancellation flag, cleared to stop the run
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<RunOutcome>>,
}

impl AnalysisWorker {
    /// Start a run on a new thread.
    ///
    /// `notify` is invoked after each event is queued; the window uses it to
    /// wake the UI thread.
    pub fn spawn<N>(
        settings: AnalysisSettings,
        notify: N,
    ) -> Result<(Self, mpsc::UnboundedReceiver<AnalysisEvent>)>
    where
        N: Fn() + Send + 'static,
    {
        settings.validate()?;

        let (tx, rx) = mpsc::unbounded_channel();
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);

        let handle = std::thread::Builder::new()
            .name("encabulator-worker".into())
            .spawn(move || {
                let mut rng = settings.rng();
                let send = |event: AnalysisEvent| {
                    let delivered = tx.send(event).is_ok();
                    notify();
                    delivered
                };

                let outcome = run_analysis(&settings, &mut rng, &flag, send);
                match &outcome {
                    RunOutcome::Completed(verdict) => info!("Analysis complete: {}", verdict),
                    RunOutcome::Aborted => info!("Analysis stopped early"),
                    RunOutcome::Disconnected => warn!("Event receiver dropped, ending analysis"),
                }

                flag.store(false, Ordering::SeqCst);
                let _ = tx.send(AnalysisEvent::Finished);
                notify();
                outcome
            })?;

        info!("Analysis worker started");

        Ok((
            Self {
                running,
                handle: Some(handle),
            },
            rx,
        ))
    }

    /// Ask the run to stop at the next step
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Whether the run is still in progress
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
            && self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Block until the worker thread exits
    pub fn join(&mut self) -> Result<Option<RunOutcome>> {
        let Some(handle) = self.handle.take() else {
            return Ok(None);
        };
        match handle.join() {
            Ok(outcome) => {
                debug!("Analysis worker joined: {:?}", outcome);
                Ok(Some(outcome))
            }
            Err(_) => {
                error!("Analysis worker panicked");
                Err(EncabulatorError::WorkerPanicked)
            }
        }
    }

    /// Stop the run and wait for the thread to exit
    pub fn shutdown(&mut self) -> Result<Option<RunOutcome>> {
        self.stop();
        self.join()
    }
}

impl Drop for AnalysisWorker {
    fn drop(&mut self) {
        if self.handle.is_some() {
            let _ = self.shutdown();
        }
    }
}
