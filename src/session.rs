//! Analysis session state
//!
//! Everything the window shows about a run, updated one event at a time on
//! the UI thread.

use tracing::debug;

use crate::messages;
use crate::worker::{AnalysisEvent, FINAL_PROGRESS};

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No worker; a new run may start
    Idle,
    /// A worker is producing events
    Running,
    /// Stop was requested; waiting for the worker to finish
    Stopping,
}

#[derive(Debug, Clone)]
pub struct AnalysisSession {
    progress: u8,
    log: Vec<String>,
    verdict: String,
    phase: SessionPhase,
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self {
            progress: 0,
            log: Vec::new(),
            verdict: messages::VERDICT_IDLE.to_string(),
            phase: SessionPhase::Idle,
        }
    }

    /// Reset the display for a new run. Returns `false` if a run is active.
    pub fn begin(&mut self) -> bool {
        if self.phase != SessionPhase::Idle {
            return false;
        }
        self.progress = 0;
        self.log.clear();
        self.verdict = messages::VERDICT_RUNNING.to_string();
        self.phase = SessionPhase::Running;
        true
    }

    /// Mark a running session as stopping
    pub fn request_stop(&mut self) {
        if self.phase == SessionPhase::Running {
            self.phase = SessionPhase::Stopping;
        }
    }

    /// Show a failure that prevented a run from starting or finishing
    pub fn fail(&mut self, reason: impl std::fmt::Display) {
        self.verdict = format!("Verdict: Encabulator malfunction ({reason}).");
        self.phase = SessionPhase::Idle;
    }

    /// Apply one worker event. Returns `true` when the grid should flash.
    pub fn apply(&mut self, event: AnalysisEvent) -> bool {
        match event {
            AnalysisEvent::Progress(p) => {
                self.progress = p.min(FINAL_PROGRESS);
            }
            AnalysisEvent::Log(line) => self.log.push(line),
            AnalysisEvent::Visualize => return true,
            AnalysisEvent::Complete(verdict) => {
                self.verdict = verdict;
                self.phase = SessionPhase::Idle;
            }
            AnalysisEvent::Aborted => {
                self.log.push(messages::ABORT_LINE.to_string());
                self.verdict = messages::VERDICT_ABORTED.to_string();
            }
            AnalysisEvent::Finished => {
                debug!("Session finished at {}%", self.progress);
                self.log.push(messages::READY_LINE.to_string());
                self.phase = SessionPhase::Idle;
            }
        }
        false
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    /// Progress as a fraction for progress bars
    pub fn progress_fraction(&self) -> f32 {
        f32::from(self.progress) / f32::from(FINAL_PROGRESS)
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    pub fn verdict(&self) -> &str {
        &self.verdict
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn can_start(&self) -> bool {
        self.phase == SessionPhase::Idle
    }

    pub fn button_label(&self) -> &'static str {
        match self.phase {
            SessionPhase::Idle => "ENGAGE ENCABULATOR",
            SessionPhase::Running => "ENCABULATING...",
            SessionPhase::Stopping => "ABORTING...",
        }
    }
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worker::{run_analysis, AnalysisSettings};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::atomic::AtomicBool;

    #[test]
    fn test_new_session_awaits_input() {
        let session = AnalysisSession::new();
        assert_eq!(session.verdict(), "Verdict: Awaiting Input...");
        assert_eq!(session.button_label(), "ENGAGE ENCABULATOR");
        assert!(session.can_start());
    }

    #[test]
    fn test_begin_resets_display() {
        let mut session = AnalysisSession::new();
        session.apply(AnalysisEvent::Log("stale".into()));
        session.apply(AnalysisEvent::Progress(40));

        assert!(session.begin());
        assert_eq!(session.progress(), 0);
        assert!(session.log().is_empty());
        assert_eq!(session.verdict(), "Verdict: Encabulating...");
        assert_eq!(session.button_label(), "ENCABULATING...");
        assert!(!session.can_start());
    }

    #[test]
    fn test_begin_refused_while_running() {
        let mut session = AnalysisSession::new();
        assert!(session.begin());
        assert!(!session.begin());

        session.request_stop();
        assert!(!session.begin());
    }

    #[test]
    fn test_full_run_reaches_one_hundred() {
        let mut session = AnalysisSession::new();
        session.begin();

        let mut rng = StdRng::seed_from_u64(3);
        let running = AtomicBool::new(true);
        let mut flashes = 0;
        run_analysis(&AnalysisSettings::instant(), &mut rng, &running, |event| {
            if session.apply(event) {
                flashes += 1;
            }
            true
        });

        assert_eq!(session.progress(), 100);
        assert_eq!(session.progress_fraction(), 1.0);
        assert!(messages::VERDICTS.contains(&session.verdict()));
        assert_eq!(flashes, 51);
        assert!(session.can_start());

        session.apply(AnalysisEvent::Finished);
        assert!(session.can_start());
        assert_eq!(session.log().last().map(String::as_str), Some(messages::READY_LINE));
    }

    #[test]
    fn test_complete_reenables_button() {
        let mut session = AnalysisSession::new();
        session.begin();
        session.apply(AnalysisEvent::Complete(messages::VERDICTS[4].into()));

        assert!(session.can_start());
        assert_eq!(session.button_label(), "ENGAGE ENCABULATOR");
        assert_eq!(session.verdict(), "Verdict: All signs point to 'maybe'.");

        // The trailing Finished keeps the session idle
        session.apply(AnalysisEvent::Finished);
        assert_eq!(session.phase(), SessionPhase::Idle);
    }

    #[test]
    fn test_abort_path() {
        let mut session = AnalysisSession::new();
        session.begin();
        session.apply(AnalysisEvent::Progress(12));
        session.request_stop();
        assert_eq!(session.button_label(), "ABORTING...");

        session.apply(AnalysisEvent::Aborted);
        session.apply(AnalysisEvent::Finished);

        assert_eq!(session.progress(), 12);
        assert_eq!(session.verdict(), messages::VERDICT_ABORTED);
        assert_eq!(
            session.log(),
            &[messages::ABORT_LINE.to_string(), messages::READY_LINE.to_string()]
        );
        assert_eq!(session.phase(), SessionPhase::Idle);
    }

    #[test]
    fn test_fail_returns_to_idle() {
        let mut session = AnalysisSession::new();
        session.begin();
        session.fail("worker panicked");
        assert!(session.can_start());
        assert!(session.verdict().contains("worker panicked"));
    }
}
