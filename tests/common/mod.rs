#![allow(dead_code)]

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use redshiftctl::commands::Session;
use redshiftctl::{CommandOutput, CommandRunner, ConfigStore, RedshiftController};

/// Process table stand-in that records every invocation.
#[derive(Default)]
pub struct FakeRunner {
    pub listing: Option<String>,
    pub calls: RefCell<Vec<(String, Vec<String>)>>,
    pub spawned: RefCell<Vec<Vec<String>>>,
}

impl FakeRunner {
    pub fn with_listing(listing: &str) -> Self {
        Self {
            listing: Some(listing.to_string()),
            ..Default::default()
        }
    }

    pub fn ran(&self, program: &str) -> Vec<Vec<String>> {
        self.calls
            .borrow()
            .iter()
            .filter(|(p, _)| p == program)
            .map(|(_, args)| args.clone())
            .collect()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<CommandOutput> {
        self.calls
            .borrow_mut()
            .push((program.to_string(), args.to_vec()));

        let output = match (program, &self.listing) {
            ("pgrep", Some(listing)) => CommandOutput {
                status: Some(0),
                stdout: listing.clone(),
                stderr: String::new(),
            },
            ("pgrep", None) => CommandOutput {
                status: Some(1),
                ..Default::default()
            },
            _ => CommandOutput {
                status: Some(0),
                ..Default::default()
            },
        };
        Ok(output)
    }

    fn spawn_detached(&self, _program: &str, args: &[String]) -> io::Result<u32> {
        self.spawned.borrow_mut().push(args.to_vec());
        Ok(4242)
    }
}

pub fn session_at(path: PathBuf, runner: FakeRunner) -> Session<FakeRunner> {
    let controller = RedshiftController::new(runner).with_settle_delay(Duration::ZERO);
    Session::new(controller, ConfigStore::new(path)).with_status_delay(Duration::ZERO)
}
