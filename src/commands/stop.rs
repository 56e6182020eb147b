//! Implementation of the `stop` command.

use anyhow::Result;

use super::Session;
use crate::logger::Log;
use crate::process::CommandRunner;

pub fn handle_stop_command<R: CommandRunner>(session: &Session<R>) -> Result<()> {
    Log::log_block_start("Stopping redshift");
    session.controller.stop();
    session.show_status()?;
    Ok(())
}
