//! Implementation of the `auto` command.
//!
//! Builds the settings from defaults, the saved configuration and the
//! command-line overrides, then replaces whatever redshift is running with
//! an automatic day/night instance.

use anyhow::{Context, Result};

use super::{Session, resolve_location};
use crate::args::{FieldOverrides, LocationArgs};
use crate::command::{auto_mode_args, describe};
use crate::constants::REDSHIFT_BIN;
use crate::error::ControlError;
use crate::logger::Log;
use crate::process::CommandRunner;

pub fn handle_auto_command<R: CommandRunner>(
    session: &Session<R>,
    location: &LocationArgs,
    fields: &FieldOverrides,
) -> Result<()> {
    Log::log_block_start("Starting automatic mode");

    let mut form = session.load_form();
    resolve_location(&mut form, location)?;
    fields.apply_to(&mut form);

    let settings = form
        .auto_input()
        .validate()
        .map_err(ControlError::from)?;

    session.controller.stop_tray_applet();
    session
        .controller
        .launch_auto(&settings)
        .context("Failed to start automatic mode")?;
    Log::log_decorated(&format!(
        "Launched: {}",
        describe(REDSHIFT_BIN, &auto_mode_args(&settings))
    ));

    session.wait_for_launch();
    session.show_status()?;
    Ok(())
}
