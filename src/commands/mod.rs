//! Command-line command handlers for redshiftctl.
//!
//! Each subcommand lives in its own submodule. Handlers are generic over the
//! [`CommandRunner`] so they can be driven against a fake process table.

pub mod auto;
pub mod cities;
pub mod manual;
pub mod nudge;
pub mod reset;
pub mod save;
pub mod status;
pub mod stop;

use std::thread;
use std::time::Duration;

use anyhow::{Result, bail};

use crate::args::LocationArgs;
use crate::config::{ConfigStore, path_for_display};
use crate::constants::*;
use crate::form::FormState;
use crate::geo::{self, city_selector};
use crate::logger::Log;
use crate::process::{CommandRunner, RedshiftController};
use crate::status::LiveStatus;

/// Everything a handler needs to touch the outside world.
pub struct Session<R: CommandRunner> {
    pub controller: RedshiftController<R>,
    pub store: ConfigStore,
    status_delay: Duration,
}

impl<R: CommandRunner> Session<R> {
    pub fn new(controller: RedshiftController<R>, store: ConfigStore) -> Self {
        Self {
            controller,
            store,
            status_delay: Duration::from_millis(STATUS_DELAY_MS),
        }
    }

    /// Override the pause between a background launch and the status check.
    pub fn with_status_delay(mut self, status_delay: Duration) -> Self {
        self.status_delay = status_delay;
        self
    }

    /// Give a freshly spawned instance time to show up in the listing.
    pub fn wait_for_launch(&self) {
        if !self.status_delay.is_zero() {
            thread::sleep(self.status_delay);
        }
    }

    /// Defaults overlaid with the saved configuration, if any.
    pub fn load_form(&self) -> FormState {
        let config = self.store.load();
        if config.is_none() {
            Log::log_debug("No usable configuration file, using defaults");
        }
        FormState::from_config(config.as_ref())
    }

    pub fn save_form(&self, form: &FormState) -> Result<()> {
        let (redshift, manual) = form.to_sections();
        self.store.save(&redshift, &manual)?;
        Log::log_decorated(&format!(
            "Configuration saved to {}",
            path_for_display(self.store.path())
        ));
        Ok(())
    }

    /// Query and print the live status.
    pub fn show_status(&self) -> Result<LiveStatus> {
        let status = self.controller.query_status()?;
        report_status(&status);
        Ok(status)
    }
}

/// Fill the form's coordinates from `--city` or the interactive picker.
pub fn resolve_location(form: &mut FormState, location: &LocationArgs) -> Result<()> {
    if let Some(name) = &location.city {
        match form.select_city(name) {
            Some(city) => Log::log_decorated(&format!(
                "Using {} ({}, {})",
                city.name, city.latitude, city.longitude
            )),
            None => bail!("Unknown city '{}'. Run 'redshiftctl cities' for the list", name),
        }
    } else if location.pick_city {
        let city = city_selector::select_city_interactive()?;
        form.set_city(city);
    }
    Ok(())
}

pub fn report_status(status: &LiveStatus) {
    let lines = status.summary_lines();
    let Some((headline, details)) = lines.split_first() else {
        return;
    };

    Log::log_block_start(headline);
    for line in details {
        Log::log_indented(line);
    }

    if let LiveStatus::Auto {
        latitude,
        longitude,
        ..
    } = status
    {
        if let (Ok(lat), Ok(lon)) = (latitude.parse::<f64>(), longitude.parse::<f64>()) {
            if let Some(city) = geo::nearest_city(lat, lon, NEAREST_CITY_TOLERANCE_DEG) {
                Log::log_indented(&format!("Near: {}", city.name));
            }
        }
    }
}
