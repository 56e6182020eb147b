//! Implementation of the `save` command.

use anyhow::Result;

use super::{Session, resolve_location};
use crate::args::{FieldOverrides, LocationArgs};
use crate::logger::Log;
use crate::process::CommandRunner;
use crate::validation::GammaTriple;

/// Write the configuration file from the saved values plus overrides.
///
/// Values are stored as given; they are validated when auto mode starts.
pub fn handle_save_command<R: CommandRunner>(
    session: &Session<R>,
    location: &LocationArgs,
    fields: &FieldOverrides,
    gamma: Option<GammaTriple>,
) -> Result<()> {
    Log::log_block_start("Saving configuration");

    let mut form = session.load_form();
    resolve_location(&mut form, location)?;
    fields.apply_to(&mut form);
    if let Some(gamma) = gamma {
        form.gamma = gamma;
    }

    session.save_form(&form)
}
