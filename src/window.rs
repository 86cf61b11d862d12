//! Main window
//!
//! Input and controls on the left, the visualizer and log on the right.
//! Worker events are drained here, on the UI thread, once per frame.

use eframe::egui;
use egui_phosphor::regular::{CPU, LIGHTNING, STOP_CIRCLE, TERMINAL_WINDOW};
use tokio::sync::mpsc::{self, error::TryRecvError};
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::session::{AnalysisSession, SessionPhase};
use crate::theme::{self, ThemeChoice};
use crate::visualizer::QuantumGrid;
use crate::worker::{AnalysisEvent, AnalysisWorker};

pub const WINDOW_TITLE: &str = "Advanced Hyper-Encabulator Matrix";
const INPUT_HINT: &str = "e.g., 'Should I get a coffee?'";

/// Window state
pub struct EncabulatorWindow {
    config: Config,
    theme: ThemeChoice,
    /// Text typed by the user; it is never actually looked at
    query: String,
    session: AnalysisSession,
    grid: QuantumGrid,
    worker: Option<AnalysisWorker>,
    events: Option<mpsc::UnboundedReceiver<AnalysisEvent>>,
}

impl EncabulatorWindow {
    pub fn new(config: Config) -> Self {
        let grid = match config.analysis.seed {
            Some(seed) => QuantumGrid::seeded(config.grid_size, seed),
            None => QuantumGrid::new(config.grid_size),
        };

        Self {
            theme: config.theme_choice(),
            config,
            query: String::new(),
            session: AnalysisSession::new(),
            grid,
            worker: None,
            events: None,
        }
    }

    /// Open the window and block until it is closed
    pub fn run(config: Config) -> Result<(), eframe::Error> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([config.window_width, config.window_height])
                .with_position([100.0, 100.0])
                .with_min_inner_size([600.0, 450.0])
                .with_title(WINDOW_TITLE),
            ..Default::default()
        };

        eframe::run_native(
            WINDOW_TITLE,
            options,
            Box::new(move |cc| {
                let mut fonts = egui::FontDefinitions::default();
                egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
                cc.egui_ctx.set_fonts(fonts);
                theme::apply(&cc.egui_ctx, config.theme_choice());

                Ok(Box::new(EncabulatorWindow::new(config)))
            }),
        )
    }

    fn start_analysis(&mut self, ctx: &egui::Context) {
        if self.worker.as_ref().is_some_and(AnalysisWorker::is_running) {
            return;
        }
        // A completed run whose Finished event has not been drained yet
        if self.worker.is_some() {
            self.release_worker();
        }
        if !self.session.begin() {
            return;
        }

        info!("Engaging encabulator on {} chars of input", self.query.chars().count());

        let repaint = ctx.clone();
        match AnalysisWorker::spawn(self.config.analysis.clone(), move || repaint.request_repaint()) {
            Ok((worker, events)) => {
                self.worker = Some(worker);
                self.events = Some(events);
            }
            Err(e) => {
                error!("Failed to start analysis: {}", e);
                self.session.fail(e);
            }
        }
    }

    fn stop_analysis(&mut self) {
        if let Some(worker) = &self.worker {
            info!("Abort requested");
            worker.stop();
            self.session.request_stop();
        }
    }

    /// Apply every queued worker event
    fn drain_events(&mut self) {
        let Some(events) = self.events.as_mut() else {
            return;
        };

        let mut finished = false;
        loop {
            match events.try_recv() {
                Ok(event) => {
                    finished |= event == AnalysisEvent::Finished;
                    if self.session.apply(event) {
                        self.grid.scramble();
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    // The thread died without saying goodbye; join surfaces why
                    if !finished {
                        warn!("Analysis worker hung up without finishing");
                    }
                    finished = true;
                    break;
                }
            }
        }

        if finished {
            self.release_worker();
        }
    }

    /// Join and drop the finished worker so the next run can start
    fn release_worker(&mut self) {
        self.events = None;
        if let Some(mut worker) = self.worker.take() {
            match worker.join() {
                Ok(_) if self.session.phase() != SessionPhase::Idle => {
                    self.session.fail("worker exited early");
                }
                Ok(_) => {}
                Err(e) => {
                    error!("Analysis worker failed: {}", e);
                    self.session.fail(e);
                }
            }
        }
        debug!("Worker released");
    }

    /// Stop any active run and wait for its thread to exit
    fn shutdown(&mut self) {
        if let Some(mut worker) = self.worker.take() {
            info!("Window closing, waiting for analysis worker");
            if let Err(e) = worker.shutdown() {
                error!("Analysis worker failed during shutdown: {}", e);
            }
        }
        self.events = None;
    }

    fn show_controls(&mut self, ui: &mut egui::Ui) {
        let accent = self.theme.accent();

        ui.add_space(10.0);
        ui.label(egui::RichText::new("Enter Data for Encabulation:").size(theme::BODY_SIZE));
        ui.add(
            egui::TextEdit::singleline(&mut self.query)
                .hint_text(INPUT_HINT)
                .desired_width(f32::INFINITY)
                .margin(egui::vec2(5.0, 5.0)),
        );

        ui.add_space(20.0);

        let enabled = self.session.can_start();
        let label = format!("{} {}", LIGHTNING, self.session.button_label());
        let clicked = ui
            .scope(|ui| {
                theme::style_primary_button(ui.visuals_mut(), accent);
                let button = theme::primary_button(&label, enabled)
                    .min_size(egui::vec2(ui.available_width(), 44.0));
                ui.add_enabled(enabled, button).clicked()
            })
            .inner;
        if clicked {
            self.start_analysis(ui.ctx());
        }

        if self.session.phase() == SessionPhase::Running {
            ui.add_space(6.0);
            let abort = egui::Button::new(format!("{} ABORT", STOP_CIRCLE))
                .min_size(egui::vec2(ui.available_width(), 28.0));
            if ui.add(abort).clicked() {
                self.stop_analysis();
            }
        }

        ui.add_space(20.0);
        egui::Frame::new()
            .stroke(egui::Stroke::new(1.0, accent))
            .corner_radius(5.0)
            .inner_margin(1.0)
            .show(ui, |ui| {
                ui.add(
                    egui::ProgressBar::new(self.session.progress_fraction())
                        .fill(accent)
                        .text(
                            egui::RichText::new(format!("{}%", self.session.progress()))
                                .color(theme::BACKGROUND),
                        ),
                );
            });

        ui.add_space(20.0);
        ui.vertical_centered(|ui| {
            ui.add(
                egui::Label::new(
                    egui::RichText::new(self.session.verdict())
                        .size(theme::VERDICT_SIZE)
                        .strong(),
                )
                .wrap(),
            );
        });
    }

    fn show_readouts(&mut self, ui: &mut egui::Ui) {
        // Visualizer and log split the height evenly
        let label_space = 60.0;
        let half = ((ui.available_height() - label_space) / 2.0).max(0.0);

        ui.add_space(10.0);
        ui.label(format!("{} Quantum State Visualizer:", CPU));
        self.grid.show(ui, half);

        ui.add_space(8.0);
        ui.label(format!("{} Analysis Log:", TERMINAL_WINDOW));
        egui::Frame::new()
            .fill(theme::FIELD)
            .stroke(egui::Stroke::new(1.0, self.theme.accent()))
            .inner_margin(5.0)
            .show(ui, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("analysis_log")
                    .stick_to_bottom(true)
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        for line in self.session.log() {
                            ui.label(egui::RichText::new(line).monospace());
                        }
                    });
            });
    }
}

impl eframe::App for EncabulatorWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.frame(ctx);
    }
}

impl EncabulatorWindow {
    /// One UI frame: close handling, event drain, layout
    fn frame(&mut self, ctx: &egui::Context) {
        if ctx.input(|i| i.viewport().close_requested()) {
            self.shutdown();
            return;
        }

        self.drain_events();

        egui::SidePanel::left("controls")
            .resizable(false)
            .exact_width(self.config.window_width / 3.0)
            .show(ctx, |ui| self.show_controls(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.show_readouts(ui));
    }
}

impl Drop for EncabulatorWindow {
    fn drop(&mut self) {
        self.shutdown();
    }
}
