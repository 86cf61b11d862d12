//! Headless runner
//!
//! Runs one analysis without a window and prints the event stream, for
//! terminals and for anyone who wants their ambiguity scriptable.

use std::io::Write;
use anyhow::{Result, Context};
use tracing::info;

use crate::messages;
use crate::worker::{AnalysisEvent, AnalysisSettings, AnalysisWorker, RunOutcome, FINAL_PROGRESS};

const BAR_WIDTH: usize = 40;

/// Render a progress bar like `[#######.....]  42%`
pub fn progress_bar(progress: u8) -> String {
    let progress = progress.min(FINAL_PROGRESS);
    let filled = BAR_WIDTH * usize::from(progress) / usize::from(FINAL_PROGRESS);
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH - filled),
        progress
    )
}

/// Text to print for an event, if any
pub fn render_event(event: &AnalysisEvent) -> Option<String> {
    match event {
        AnalysisEvent::Progress(p) if p % 10 == 0 => Some(progress_bar(*p)),
        AnalysisEvent::Progress(_) | AnalysisEvent::Visualize => None,
        AnalysisEvent::Log(line) => Some(format!("> {}", line)),
        AnalysisEvent::Complete(verdict) => Some(format!("\n{}", verdict)),
        AnalysisEvent::Aborted => Some(format!("> {}", messages::ABORT_LINE)),
        AnalysisEvent::Finished => Some(messages::READY_LINE.to_string()),
    }
}

/// Run one analysis and write its events to `out` as they arrive
pub async fn run<W: Write>(query: &str, settings: AnalysisSettings, out: &mut W) -> Result<Option<RunOutcome>> {
    info!("Headless analysis of {} chars of input", query.chars().count());
    writeln!(out, "Encabulating: {:?}", query)?;

    let (mut worker, mut events) = AnalysisWorker::spawn(settings, || {})
        .context("Failed to start analysis")?;

    while let Some(event) = events.recv().await {
        if let Some(text) = render_event(&event) {
            writeln!(out, "{}", text)?;
        }
        if event == AnalysisEvent::Finished {
            break;
        }
    }

    let outcome = worker.join().context("Analysis worker failed")?;
    out.flush()?;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar_bounds() {
        assert_eq!(progress_bar(0), format!("[{}]   0%", ".".repeat(40)));
        assert_eq!(progress_bar(100), format!("[{}] 100%", "#".repeat(40)));
        assert_eq!(progress_bar(250), progress_bar(100));
    }

    #[test]
    fn test_render_skips_noise() {
        assert!(render_event(&AnalysisEvent::Visualize).is_none());
        assert!(render_event(&AnalysisEvent::Progress(7)).is_none());
        assert!(render_event(&AnalysisEvent::Progress(50)).is_some());
        assert_eq!(
            render_event(&AnalysisEvent::Log("hello".into())).as_deref(),
            Some("> hello")
        );
    }

    #[tokio::test]
    async fn test_headless_run_prints_verdict() {
        let settings = AnalysisSettings { seed: Some(99), ..AnalysisSettings::instant() };
        let mut out = Vec::new();

        let outcome = run("Should I get a coffee?", settings, &mut out).await.unwrap();
        let Some(RunOutcome::Completed(verdict)) = outcome else {
            panic!("expected a completed run");
        };

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Encabulating: \"Should I get a coffee?\""));
        assert!(text.contains(&progress_bar(100)));
        assert!(text.contains(&verdict));
        assert!(text.trim_end().ends_with("System ready for next analysis."));
    }
}
