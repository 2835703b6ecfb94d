//! serene - meditation timer and breathing practice tracker
//!
//! This crate provides the practice state machine (session timer, breathing
//! cycle, statistics and achievements), its persistence, and the `serene`
//! command-line front end.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod output;
pub mod storage;
pub mod store;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::SereneError;
pub use store::{MeditationStore, PersistedState};
