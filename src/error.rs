//! Error type shared by the demo handlers.

use thiserror::Error;

use crate::optimize::OptimizeError;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("ODE solver failed: {0}")]
    Solver(String),

    #[error("minimization failed: {0}")]
    Optimize(#[from] OptimizeError),

    #[error("image export failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("screenshot did not contain the plot area")]
    EmptyCapture,
}

pub type Result<T> = std::result::Result<T, DemoError>;
