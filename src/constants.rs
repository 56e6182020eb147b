//! Application constants and default values for redshiftctl.
//!
//! This module contains the form defaults, validation limits, external
//! program names and operational timing constants used throughout the
//! application.

// ═══ External Programs ═══
// Executables this tool shells out to

pub const REDSHIFT_BIN: &str = "redshift";
pub const TRAY_APPLET_BIN: &str = "redshift-gtk"; // Competes for gamma ramps when left running
pub const PROCESS_LIST_BIN: &str = "pgrep";
pub const KILL_BY_NAME_BIN: &str = "killall";

// ═══ Form Defaults ═══
// Values used when neither the config file nor the command line provide one

pub const DEFAULT_TEMP_DAY: &str = "6500"; // Kelvin - close to natural sunlight
pub const DEFAULT_TEMP_NIGHT: &str = "4500"; // Kelvin - warm evening light
pub const DEFAULT_BRIGHTNESS_DAY: &str = "1.0";
pub const DEFAULT_BRIGHTNESS_NIGHT: &str = "1.0";
pub const DEFAULT_GAMMA: &str = "1.0:1.0:1.0";
pub const DEFAULT_MANUAL_TEMP: u32 = 6500;
pub const DEFAULT_MANUAL_BRIGHTNESS: f64 = 1.0;
pub const DEFAULT_GAMMA_CHANNEL: f64 = 1.0;

// ═══ Validation Limits ═══
// Ranges every field must satisfy before a process is launched

pub const MINIMUM_LATITUDE: f64 = -90.0;
pub const MAXIMUM_LATITUDE: f64 = 90.0;
pub const MINIMUM_LONGITUDE: f64 = -180.0;
pub const MAXIMUM_LONGITUDE: f64 = 180.0;

// Auto mode accepts the full redshift range
pub const MINIMUM_TEMP: i64 = 1000;
pub const MAXIMUM_TEMP: i64 = 25000;

// One-shot effects are bounded like the old temperature slider
pub const MINIMUM_MANUAL_TEMP: u32 = 1000;
pub const MAXIMUM_MANUAL_TEMP: u32 = 9000;

pub const MINIMUM_BRIGHTNESS: f64 = 0.1;
pub const MAXIMUM_BRIGHTNESS: f64 = 1.0;

pub const MINIMUM_GAMMA: f64 = 0.1;
pub const MAXIMUM_GAMMA: f64 = 2.0;

// ═══ Nudge Steps ═══
// Increments applied by `redshiftctl nudge`

pub const TEMP_STEP: i64 = 100;
pub const BRIGHTNESS_STEP: f64 = 0.05;

// ═══ Configuration File ═══

pub const CONFIG_DIR_NAME: &str = "redshift";
pub const CONFIG_FILE_NAME: &str = "redshift.conf";
pub const CONFIG_HEADER: &str = "; Configuration generated by redshiftctl";
pub const REDSHIFT_SECTION: &str = "redshift";
pub const MANUAL_SECTION: &str = "manual";
pub const LOCATION_PROVIDER: &str = "manual";

// ═══ Operational Timing Constants ═══

pub const SETTLE_DELAY_MS: u64 = 200; // Let the old instance release the gamma ramps
pub const STATUS_DELAY_MS: u64 = 500; // Give a freshly spawned instance time to appear in the listing

// ═══ Status Display ═══

pub const DEFAULT_MODE_LABEL: &str = "default mode (geolocation)";
pub const NEAREST_CITY_TOLERANCE_DEG: f64 = 0.1;

// ═══ Exit Codes ═══

pub const EXIT_FAILURE: i32 = 1; // General failure
