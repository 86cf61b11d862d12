//! Hyper-Encabulator
//!
//! A desktop console that performs an elaborate, entirely fake analysis of
//! whatever you type into it and then delivers a verdict of no value.

pub mod config;
pub mod error;
pub mod headless;
pub mod messages;
pub mod session;
pub mod theme;
pub mod visualizer;
pub mod window;
pub mod worker;

pub use config::Config;
pub use error::EncabulatorError;
pub use session::AnalysisSession;
pub use worker::{AnalysisEvent, AnalysisSettings, AnalysisWorker};
