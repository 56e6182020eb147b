//! # redshiftctl
//!
//! A terminal front-end for the `redshift` color-temperature utility.
//!
//! ## Architecture
//!
//! - **config**: Reading and writing redshift's INI configuration file
//! - **validation**: Range checks that gate every launch
//! - **command**: redshift argument vectors for each mode
//! - **process**: Starting, stopping and querying redshift
//! - **status**: Parsing the process listing into a live status
//! - **form**: The editable settings shared by all commands
//! - **geo**: Built-in city table and the interactive picker
//! - **logger**: Structured logging with visual formatting

pub mod args;
pub mod command;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod form;
pub mod geo;
pub mod logger;
pub mod process;
pub mod status;
pub mod validation;

// Re-export important types for easier access
pub use config::{ConfigSections, ConfigStore};
pub use error::ControlError;
pub use form::FormState;
pub use logger::{Log, LogLevel};
pub use process::{CommandOutput, CommandRunner, RedshiftController, SystemRunner};
pub use status::LiveStatus;
pub use validation::{AutoModeInput, GammaTriple, ManualEffect, ValidationError};
