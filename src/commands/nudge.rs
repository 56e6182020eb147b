//! Implementation of the `nudge` command.

use anyhow::Result;

use super::Session;
use crate::form::{AdjustableField, Direction};
use crate::logger::Log;
use crate::process::CommandRunner;

/// Step one saved field and write the file back.
pub fn handle_nudge_command<R: CommandRunner>(
    session: &Session<R>,
    field: AdjustableField,
    direction: Direction,
) -> Result<()> {
    let mut form = session.load_form();
    let before = form.field_value(field).to_string();
    form.nudge(field, direction);

    Log::log_block_start(&format!(
        "{}: {} → {}",
        field.label(),
        before,
        form.field_value(field)
    ));
    session.save_form(&form)
}
