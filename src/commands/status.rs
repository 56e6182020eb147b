//! Implementation of the `status` command.
//!
//! With `--save`, the parameters of a running automatic-mode instance are
//! adopted into the saved configuration. Any other state leaves the file
//! alone.

use anyhow::Result;

use super::Session;
use crate::logger::Log;
use crate::process::CommandRunner;

pub fn handle_status_command<R: CommandRunner>(session: &Session<R>, save: bool) -> Result<()> {
    let status = session.show_status()?;
    if !save {
        return Ok(());
    }

    let mut form = session.load_form();
    if form.apply_status(&status) {
        session.save_form(&form)?;
    } else {
        Log::log_pipe();
        Log::log_warning("No automatic-mode instance running, nothing to save");
    }
    Ok(())
}
