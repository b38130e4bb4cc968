//! Phase orchestration under a shared time budget.
//!
//! [`WaveRunner`] sequences seed, exactify, sweep refine and local search,
//! keeping one [`Incumbent`](crate::eval::Incumbent) across phases.

mod config;
mod runner;
mod strategy;

pub use config::WaveConfig;
pub use runner::{WaveError, WaveResult, WaveRunner};
pub use strategy::{Phase, SweepStrategy};
