//! Command-line argument parsing and processing.
//!
//! Parsing is done by `clap`; the result is flattened into a [`CliAction`]
//! so `main` only has to dispatch. Help and version output go through the
//! structured logger instead of clap's own renderer.

use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::form::{AdjustableField, Direction, FormState};
use crate::logger::Log;
use crate::validation::GammaTriple;

#[derive(Parser, Debug)]
#[command(name = "redshiftctl")]
#[command(version, about, long_about = None, disable_help_subcommand = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file to read and write
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Silence the structured log
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Auto {
        #[command(flatten)]
        location: LocationArgs,
        #[command(flatten)]
        fields: FieldOverrides,
    },
    Manual {
        #[arg(long, value_name = "KELVIN")]
        temp: Option<u32>,
        #[arg(long, value_name = "LEVEL")]
        brightness: Option<f64>,
        #[arg(long, value_name = "R:G:B", value_parser = parse_gamma)]
        gamma: Option<GammaTriple>,
    },
    Reset,
    Stop,
    Status {
        #[arg(long)]
        save: bool,
    },
    Save {
        #[command(flatten)]
        location: LocationArgs,
        #[command(flatten)]
        fields: FieldOverrides,
        #[arg(long, value_name = "R:G:B", value_parser = parse_gamma)]
        gamma: Option<GammaTriple>,
    },
    Nudge {
        #[arg(value_enum)]
        field: FieldArg,
        #[arg(value_enum)]
        direction: DirectionArg,
    },
    Cities,
}

/// Where auto-mode coordinates come from, besides `--lat`/`--lon`.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct LocationArgs {
    /// Take coordinates from the built-in city table
    #[arg(long, value_name = "NAME", conflicts_with = "pick_city")]
    pub city: Option<String>,

    /// Choose a city interactively
    #[arg(long)]
    pub pick_city: bool,
}

/// Auto-mode fields given on the command line, kept as typed.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct FieldOverrides {
    #[arg(long, value_name = "DEG", allow_hyphen_values = true)]
    pub lat: Option<String>,
    #[arg(long, value_name = "DEG", allow_hyphen_values = true)]
    pub lon: Option<String>,
    #[arg(long, value_name = "KELVIN", allow_hyphen_values = true)]
    pub temp_day: Option<String>,
    #[arg(long, value_name = "KELVIN", allow_hyphen_values = true)]
    pub temp_night: Option<String>,
    #[arg(long, value_name = "LEVEL", allow_hyphen_values = true)]
    pub brightness_day: Option<String>,
    #[arg(long, value_name = "LEVEL", allow_hyphen_values = true)]
    pub brightness_night: Option<String>,
}

impl FieldOverrides {
    pub fn apply_to(&self, form: &mut FormState) {
        let pairs = [
            (&self.lat, &mut form.latitude),
            (&self.lon, &mut form.longitude),
            (&self.temp_day, &mut form.temp_day),
            (&self.temp_night, &mut form.temp_night),
            (&self.brightness_day, &mut form.brightness_day),
            (&self.brightness_night, &mut form.brightness_night),
        ];
        for (value, field) in pairs {
            if let Some(value) = value {
                *field = value.clone();
            }
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum FieldArg {
    TempDay,
    TempNight,
    BrightnessDay,
    BrightnessNight,
}

impl From<FieldArg> for AdjustableField {
    fn from(arg: FieldArg) -> Self {
        match arg {
            FieldArg::TempDay => AdjustableField::TempDay,
            FieldArg::TempNight => AdjustableField::TempNight,
            FieldArg::BrightnessDay => AdjustableField::BrightnessDay,
            FieldArg::BrightnessNight => AdjustableField::BrightnessNight,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum DirectionArg {
    Up,
    Down,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Up => Direction::Up,
            DirectionArg::Down => Direction::Down,
        }
    }
}

fn parse_gamma(value: &str) -> Result<GammaTriple, String> {
    value.parse::<GammaTriple>().map_err(|e| e.to_string())
}

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Start automatic day/night mode
    Auto {
        location: LocationArgs,
        fields: FieldOverrides,
    },
    /// Apply a one-shot effect
    Manual {
        temperature: Option<u32>,
        brightness: Option<f64>,
        gamma: Option<GammaTriple>,
    },
    /// Stop redshift and restore default gamma
    Reset,
    /// Stop every running instance
    Stop,
    /// Show what is running, optionally saving its settings
    Status { save: bool },
    /// Write the configuration file
    Save {
        location: LocationArgs,
        fields: FieldOverrides,
        gamma: Option<GammaTriple>,
    },
    /// Step one saved field up or down
    Nudge {
        field: AdjustableField,
        direction: Direction,
    },
    /// List the built-in cities
    Cities,
    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to unusable arguments and exit
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
#[derive(Debug)]
pub struct ParsedArgs {
    pub action: CliAction,
    pub config_path: Option<PathBuf>,
    pub quiet: bool,
}

impl ParsedArgs {
    /// Parse command-line arguments, program name first.
    ///
    /// With no subcommand the live status is shown.
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

        let cli = match Cli::try_parse_from(&args) {
            Ok(cli) => cli,
            Err(e) => {
                let action = match e.kind() {
                    ErrorKind::DisplayHelp => CliAction::ShowHelp,
                    ErrorKind::DisplayVersion => CliAction::ShowVersion,
                    _ => {
                        let message = e.to_string();
                        let first_line = message.lines().next().unwrap_or_default();
                        Log::log_warning(first_line.trim_start_matches("error: "));
                        CliAction::ShowHelpDueToError
                    }
                };
                return ParsedArgs {
                    action,
                    config_path: None,
                    quiet: false,
                };
            }
        };

        let action = match cli.command {
            None => CliAction::Status { save: false },
            Some(Commands::Auto { location, fields }) => CliAction::Auto { location, fields },
            Some(Commands::Manual {
                temp,
                brightness,
                gamma,
            }) => CliAction::Manual {
                temperature: temp,
                brightness,
                gamma,
            },
            Some(Commands::Reset) => CliAction::Reset,
            Some(Commands::Stop) => CliAction::Stop,
            Some(Commands::Status { save }) => CliAction::Status { save },
            Some(Commands::Save {
                location,
                fields,
                gamma,
            }) => CliAction::Save {
                location,
                fields,
                gamma,
            },
            Some(Commands::Nudge { field, direction }) => CliAction::Nudge {
                field: field.into(),
                direction: direction.into(),
            },
            Some(Commands::Cities) => CliAction::Cities,
        };

        ParsedArgs {
            action,
            config_path: cli.config,
            quiet: cli.quiet,
        }
    }

    /// Convenience method to parse from std::env::args()
    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args())
    }
}

/// Displays version information using custom logging style.
pub fn display_version_info() {
    Log::log_version();
    Log::log_pipe();
    println!("┗ {}", env!("CARGO_PKG_DESCRIPTION"));
}

/// Displays custom help message using logger methods.
pub fn display_help() {
    Log::log_version();
    Log::log_block_start(env!("CARGO_PKG_DESCRIPTION"));
    Log::log_block_start("Usage: redshiftctl [OPTIONS] [COMMAND]");
    Log::log_block_start("Commands:");
    Log::log_indented("auto      Start automatic day/night mode");
    Log::log_indented("            --city <NAME> | --pick-city, --lat <DEG>, --lon <DEG>");
    Log::log_indented("            --temp-day <K>, --temp-night <K>");
    Log::log_indented("            --brightness-day <L>, --brightness-night <L>");
    Log::log_indented("manual    Apply a one-shot effect");
    Log::log_indented("            --temp <K>, --brightness <L>, --gamma <R:G:B>");
    Log::log_indented("reset     Stop redshift and restore default gamma");
    Log::log_indented("stop      Stop every running redshift instance");
    Log::log_indented("status    Show the running instance (--save stores its settings)");
    Log::log_indented("save      Write the configuration file (auto options and --gamma)");
    Log::log_indented("nudge     Step a saved field: nudge <temp-day|temp-night|");
    Log::log_indented("            brightness-day|brightness-night> <up|down>");
    Log::log_indented("cities    List the built-in cities");
    Log::log_block_start("Options:");
    Log::log_indented("    --config <PATH>  Configuration file to read and write");
    Log::log_indented("-q, --quiet          Silence the structured log");
    Log::log_indented("-h, --help           Print help information");
    Log::log_indented("-V, --version        Print version information");
    Log::log_end();
}
