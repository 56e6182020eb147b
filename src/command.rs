//! Argument lists for the three redshift invocations.
//!
//! These builders are pure: they take already-validated values and return
//! the exact argv (minus the executable name) handed to
//! [`crate::process::RedshiftController::start`].

use crate::validation::{AutoModeSettings, ManualEffect};

/// `-l LAT:LON -t DAY:NIGHT -b DAY:NIGHT`, run in the background.
pub fn auto_mode_args(settings: &AutoModeSettings) -> Vec<String> {
    vec![
        "-l".to_string(),
        format!("{}:{}", settings.latitude(), settings.longitude()),
        "-t".to_string(),
        format!("{}:{}", settings.temp_day(), settings.temp_night()),
        "-b".to_string(),
        format!(
            "{}:{}",
            settings.brightness_day(),
            settings.brightness_night()
        ),
    ]
}

/// `-P -O TEMP -b BRIGHT -g R:G:B`, run synchronously.
///
/// `-P` drops any previous gamma ramp so the one-shot value is absolute.
pub fn manual_effect_args(effect: &ManualEffect) -> Vec<String> {
    vec![
        "-P".to_string(),
        "-O".to_string(),
        effect.temperature().to_string(),
        "-b".to_string(),
        format!("{:.2}", effect.brightness()),
        "-g".to_string(),
        effect.gamma().to_string(),
    ]
}

/// `-x`: restore the default gamma ramps.
pub fn reset_args() -> Vec<String> {
    vec!["-x".to_string()]
}

/// Render an argument list the way a shell user would type it.
pub fn describe(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}
