//! Implementation of the `reset` command.
//!
//! Besides restoring the default gamma ramps, a reset returns the manual
//! controls to neutral. The saved gamma is what `manual` starts from, so a
//! non-neutral value is written back as 1.0:1.0:1.0.

use anyhow::{Context, Result};

use super::Session;
use crate::form::FormState;
use crate::logger::Log;
use crate::process::CommandRunner;

/// Stop redshift and restore the default gamma ramps.
pub fn handle_reset_command<R: CommandRunner>(session: &Session<R>) -> Result<()> {
    Log::log_block_start("Resetting display colors");

    session
        .controller
        .reset()
        .context("Failed to reset display colors")?;

    // A missing or unreadable file already yields neutral gamma; leave it alone
    let config = session.store.load();
    let mut form = FormState::from_config(config.as_ref());
    let saved_gamma = form.gamma;
    form.reset_manual();

    if config.is_some() && saved_gamma != form.gamma {
        Log::log_info(&format!(
            "Saved gamma {} restored to {}",
            saved_gamma, form.gamma
        ));
        session.save_form(&form)?;
    }
    Log::log_decorated(&format!(
        "Manual controls restored to {}K, brightness {:.1}, gamma {}",
        form.manual_temperature, form.manual_brightness, form.gamma
    ));

    session.show_status()?;
    Ok(())
}
