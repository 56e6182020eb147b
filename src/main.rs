use anyhow::Result;
use std::process;

use redshiftctl::args::{self, CliAction, ParsedArgs};
use redshiftctl::commands::{
    self, Session, auto::handle_auto_command, manual::handle_manual_command,
    nudge::handle_nudge_command, reset::handle_reset_command, save::handle_save_command,
    status::handle_status_command, stop::handle_stop_command,
};
use redshiftctl::config::ConfigStore;
use redshiftctl::constants::EXIT_FAILURE;
use redshiftctl::logger::Log;
use redshiftctl::process::RedshiftController;

fn main() {
    let parsed = ParsedArgs::from_env();

    match parsed.action {
        CliAction::ShowHelp => {
            args::display_help();
            return;
        }
        CliAction::ShowVersion => {
            args::display_version_info();
            return;
        }
        CliAction::ShowHelpDueToError => {
            args::display_help();
            process::exit(EXIT_FAILURE);
        }
        _ => {}
    }

    if parsed.quiet {
        Log::set_enabled(false);
    }

    Log::log_version();
    let result = run(parsed);

    match result {
        Ok(()) => Log::log_end(),
        Err(e) => {
            if !Log::is_enabled() {
                eprintln!("redshiftctl: {:#}", e);
            }
            Log::log_pipe();
            Log::log_error(&format!("{:#}", e));
            Log::log_end();
            process::exit(EXIT_FAILURE);
        }
    }
}

fn run(parsed: ParsedArgs) -> Result<()> {
    let store = match parsed.config_path {
        Some(path) => ConfigStore::new(path),
        None => ConfigStore::at_default_location()?,
    };
    let session = Session::new(RedshiftController::system(), store);

    match parsed.action {
        CliAction::Auto { location, fields } => handle_auto_command(&session, &location, &fields),
        CliAction::Manual {
            temperature,
            brightness,
            gamma,
        } => handle_manual_command(&session, temperature, brightness, gamma),
        CliAction::Reset => handle_reset_command(&session),
        CliAction::Stop => handle_stop_command(&session),
        CliAction::Status { save } => handle_status_command(&session, save),
        CliAction::Save {
            location,
            fields,
            gamma,
        } => handle_save_command(&session, &location, &fields, gamma),
        CliAction::Nudge { field, direction } => handle_nudge_command(&session, field, direction),
        CliAction::Cities => {
            commands::cities::handle_cities_command();
            Ok(())
        }
        CliAction::ShowHelp | CliAction::ShowVersion | CliAction::ShowHelpDueToError => Ok(()),
    }
}
