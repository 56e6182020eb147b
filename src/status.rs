//! Reconstruction of redshift's running state from the process listing.
//!
//! The listing comes from `pgrep -a redshift`: one line per process, the
//! numeric PID followed by the full command line. Parsing is best-effort.
//! When the automatic-mode flag triple is not found verbatim the raw
//! argument text is reported instead of failing.

use regex::Regex;
use std::path::Path;

use crate::constants::{DEFAULT_MODE_LABEL, REDSHIFT_BIN};

/// Running state of redshift as seen in the process listing.
#[derive(Debug, Clone, PartialEq)]
pub enum LiveStatus {
    NotRunning,
    /// Started with the `-l`, `-t` and `-b` flags this tool uses for auto mode.
    Auto {
        pid: u32,
        latitude: String,
        longitude: String,
        temp_day: String,
        temp_night: String,
        brightness_day: String,
        brightness_night: String,
    },
    /// Running with some other argument set (or none at all).
    Other { pid: u32, arguments: String },
}

impl LiveStatus {
    pub fn pid(&self) -> Option<u32> {
        match self {
            LiveStatus::NotRunning => None,
            LiveStatus::Auto { pid, .. } | LiveStatus::Other { pid, .. } => Some(*pid),
        }
    }

    /// Human-readable description, headline first.
    pub fn summary_lines(&self) -> Vec<String> {
        match self {
            LiveStatus::NotRunning => vec!["Redshift is not running".to_string()],
            LiveStatus::Auto {
                pid,
                latitude,
                longitude,
                temp_day,
                temp_night,
                brightness_day,
                brightness_night,
            } => vec![
                format!("Automatic mode active (PID: {})", pid),
                format!("Location: {}, {}", latitude, longitude),
                format!("Temperature (day/night): {}K / {}K", temp_day, temp_night),
                format!(
                    "Brightness (day/night): {} / {}",
                    brightness_day, brightness_night
                ),
            ],
            LiveStatus::Other { pid, arguments } => vec![
                format!("Redshift is running (PID: {})", pid),
                format!("Started with: {}", arguments),
            ],
        }
    }
}

/// Parse `pgrep -a` output into a [`LiveStatus`].
///
/// Only the first line carrying a numeric PID is considered; a line for
/// `exclude_pid` (this program itself, whose name also matches) is skipped.
pub fn parse_process_listing(listing: &str, exclude_pid: Option<u32>) -> LiveStatus {
    let Some((pid, cmd_line)) = listing.lines().find_map(|line| {
        let line = line.trim();
        let mut tokens = line.split_whitespace();
        let pid = tokens.next()?.parse::<u32>().ok()?;
        if Some(pid) == exclude_pid {
            return None;
        }
        // pgrep matches substrings, so redshift-gtk and redshiftctl are listed too
        if Path::new(tokens.next()?).file_name()? != REDSHIFT_BIN {
            return None;
        }
        Some((pid, line))
    }) else {
        return LiveStatus::NotRunning;
    };

    let location = capture_pair(r"-l\s+([\d.-]+):([\d.-]+)", cmd_line);
    let temperature = capture_pair(r"-t\s+(\d+):(\d+)", cmd_line);
    let brightness = capture_pair(r"-b\s+([\d.]+):([\d.]+)", cmd_line);

    match (location, temperature, brightness) {
        (
            Some((latitude, longitude)),
            Some((temp_day, temp_night)),
            Some((brightness_day, brightness_night)),
        ) => LiveStatus::Auto {
            pid,
            latitude,
            longitude,
            temp_day,
            temp_night,
            brightness_day,
            brightness_night,
        },
        _ => {
            // Skip the PID and the executable path
            let parts: Vec<&str> = cmd_line.split_whitespace().collect();
            let arguments = if parts.len() > 2 {
                parts[2..].join(" ")
            } else {
                DEFAULT_MODE_LABEL.to_string()
            };
            LiveStatus::Other { pid, arguments }
        }
    }
}

/// Find the first match of a two-group pattern.
fn capture_pair(pattern: &str, text: &str) -> Option<(String, String)> {
    let re = Regex::new(pattern).ok()?;
    let captures = re.captures(text)?;
    Some((
        captures.get(1)?.as_str().to_string(),
        captures.get(2)?.as_str().to_string(),
    ))
}
