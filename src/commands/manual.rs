//! Implementation of the `manual` command: a one-shot color effect.

use anyhow::{Context, Result};

use super::Session;
use crate::error::ControlError;
use crate::logger::Log;
use crate::process::CommandRunner;
use crate::validation::GammaTriple;

pub fn handle_manual_command<R: CommandRunner>(
    session: &Session<R>,
    temperature: Option<u32>,
    brightness: Option<f64>,
    gamma: Option<GammaTriple>,
) -> Result<()> {
    Log::log_block_start("Applying manual effect");

    // Gamma defaults to the saved value; temperature and brightness to neutral.
    let mut form = session.load_form();
    if let Some(temperature) = temperature {
        form.manual_temperature = temperature;
    }
    if let Some(brightness) = brightness {
        form.manual_brightness = brightness;
    }
    if let Some(gamma) = gamma {
        form.gamma = gamma;
    }

    let effect = form.manual_effect().map_err(ControlError::from)?;

    session.controller.stop_tray_applet();
    session
        .controller
        .apply_manual(&effect)
        .context("Failed to apply manual effect")?;

    Log::log_decorated("Manual effect applied:");
    Log::log_indented(&format!("Temperature: {}K", effect.temperature()));
    Log::log_indented(&format!("Brightness: {:.2}", effect.brightness()));
    Log::log_indented(&format!("Gamma: {}", effect.gamma()));
    Ok(())
}
