//! Interactive numeric plotting demos built on egui/eframe.
//!
//! Three windows share one shell ([`app::DemoApp`]):
//! - Lissajous curve viewer (`panels::LissajousPanel`)
//! - Van der Pol oscillator viewer with PNG export (`panels::VanDerPolPanel`)
//! - Rosenbrock minimization visualizer (`panels::RosenbrockPanel`)
//!
//! The oscillator is integrated with the `ivp` crate's dense-output solver;
//! `optimize` holds the unconstrained minimizers with iteration callbacks.

pub mod app;
pub mod color_scheme;
pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod optimize;
pub mod panels;

pub use app::{run_demo, DemoApp};
pub use color_scheme::ColorScheme;
pub use config::{DemoConfig, LissajousConfig, RosenbrockConfig, VanDerPolConfig};
pub use error::{DemoError, Result};
pub use panels::{DemoPanel, LissajousPanel, RosenbrockPanel, VanDerPolPanel};
