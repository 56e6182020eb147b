//! Input validation for automatic mode and one-shot effects.
//!
//! Form fields arrive as text. Auto-mode text is checked group by group
//! (presence, coordinates, temperatures, brightness) and the first failing
//! group aborts the operation. Successful validation produces an
//! [`AutoModeSettings`] that keeps the user's own spelling of each value, so
//! `1.0` reaches redshift as `1.0` and not as a reformatted float.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::constants::*;

/// Reasons a set of form fields is rejected.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("All automatic mode fields must be filled in")]
    MissingFields,

    #[error(
        "Invalid geographic coordinates (latitude {} to {}, longitude {} to {})",
        MINIMUM_LATITUDE,
        MAXIMUM_LATITUDE,
        MINIMUM_LONGITUDE,
        MAXIMUM_LONGITUDE
    )]
    Coordinates,

    #[error(
        "Temperature must be a whole number between {} and {}",
        MINIMUM_TEMP,
        MAXIMUM_TEMP
    )]
    Temperature,

    #[error(
        "Brightness must be a number between {} and {}",
        MINIMUM_BRIGHTNESS,
        MAXIMUM_BRIGHTNESS
    )]
    Brightness,

    #[error(
        "Manual temperature must be between {} and {} Kelvin",
        MINIMUM_MANUAL_TEMP,
        MAXIMUM_MANUAL_TEMP
    )]
    ManualTemperature,

    #[error("Gamma channels must be between {} and {}", MINIMUM_GAMMA, MAXIMUM_GAMMA)]
    Gamma,

    #[error("Gamma must be written as R:G:B (got '{0}')")]
    GammaFormat(String),
}

/// Check that `value` parses as a float inside `[min, max]`.
///
/// Unparseable text and NaN are treated as invalid rather than as errors.
pub fn validate_float(value: &str, min: f64, max: f64) -> bool {
    match value.trim().parse::<f64>() {
        Ok(parsed) => (min..=max).contains(&parsed),
        Err(_) => false,
    }
}

/// Check that `value` parses as an integer inside `[min, max]`.
pub fn validate_int(value: &str, min: i64, max: i64) -> bool {
    match value.trim().parse::<i64>() {
        Ok(parsed) => (min..=max).contains(&parsed),
        Err(_) => false,
    }
}

/// Raw automatic-mode fields as typed by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AutoModeInput {
    pub latitude: String,
    pub longitude: String,
    pub temp_day: String,
    pub temp_night: String,
    pub brightness_day: String,
    pub brightness_night: String,
}

impl AutoModeInput {
    /// Validate all fields in the fixed group order.
    pub fn validate(&self) -> Result<AutoModeSettings, ValidationError> {
        let fields = [
            &self.latitude,
            &self.longitude,
            &self.temp_day,
            &self.temp_night,
            &self.brightness_day,
            &self.brightness_night,
        ];
        if fields.iter().any(|field| field.trim().is_empty()) {
            return Err(ValidationError::MissingFields);
        }

        if !(validate_float(&self.latitude, MINIMUM_LATITUDE, MAXIMUM_LATITUDE)
            && validate_float(&self.longitude, MINIMUM_LONGITUDE, MAXIMUM_LONGITUDE))
        {
            return Err(ValidationError::Coordinates);
        }

        if !(validate_int(&self.temp_day, MINIMUM_TEMP, MAXIMUM_TEMP)
            && validate_int(&self.temp_night, MINIMUM_TEMP, MAXIMUM_TEMP))
        {
            return Err(ValidationError::Temperature);
        }

        if !(validate_float(&self.brightness_day, MINIMUM_BRIGHTNESS, MAXIMUM_BRIGHTNESS)
            && validate_float(&self.brightness_night, MINIMUM_BRIGHTNESS, MAXIMUM_BRIGHTNESS))
        {
            return Err(ValidationError::Brightness);
        }

        Ok(AutoModeSettings {
            latitude: self.latitude.trim().to_string(),
            longitude: self.longitude.trim().to_string(),
            temp_day: self.temp_day.trim().to_string(),
            temp_night: self.temp_night.trim().to_string(),
            brightness_day: self.brightness_day.trim().to_string(),
            brightness_night: self.brightness_night.trim().to_string(),
        })
    }
}

/// Automatic-mode parameters that passed validation.
///
/// Only obtainable through [`AutoModeInput::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct AutoModeSettings {
    latitude: String,
    longitude: String,
    temp_day: String,
    temp_night: String,
    brightness_day: String,
    brightness_night: String,
}

impl AutoModeSettings {
    pub fn latitude(&self) -> &str {
        &self.latitude
    }

    pub fn longitude(&self) -> &str {
        &self.longitude
    }

    pub fn temp_day(&self) -> &str {
        &self.temp_day
    }

    pub fn temp_night(&self) -> &str {
        &self.temp_night
    }

    pub fn brightness_day(&self) -> &str {
        &self.brightness_day
    }

    pub fn brightness_night(&self) -> &str {
        &self.brightness_night
    }
}

/// Red, green and blue gamma correction factors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GammaTriple {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl GammaTriple {
    pub fn new(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue }
    }

    pub fn is_in_range(&self) -> bool {
        [self.red, self.green, self.blue]
            .iter()
            .all(|channel| (MINIMUM_GAMMA..=MAXIMUM_GAMMA).contains(channel))
    }
}

impl Default for GammaTriple {
    fn default() -> Self {
        Self::new(
            DEFAULT_GAMMA_CHANNEL,
            DEFAULT_GAMMA_CHANNEL,
            DEFAULT_GAMMA_CHANNEL,
        )
    }
}

impl FromStr for GammaTriple {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let channels: Vec<f64> = s
            .split(':')
            .map(|part| part.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .map_err(|_| ValidationError::GammaFormat(s.to_string()))?;

        match channels.as_slice() {
            [red, green, blue] => Ok(Self::new(*red, *green, *blue)),
            _ => Err(ValidationError::GammaFormat(s.to_string())),
        }
    }
}

impl fmt::Display for GammaTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}:{:.2}:{:.2}", self.red, self.green, self.blue)
    }
}

/// A single immediate color adjustment with no schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManualEffect {
    temperature: u32,
    brightness: f64,
    gamma: GammaTriple,
}

impl ManualEffect {
    /// Build an effect, checking temperature, brightness and gamma in that order.
    pub fn new(
        temperature: u32,
        brightness: f64,
        gamma: GammaTriple,
    ) -> Result<Self, ValidationError> {
        if !(MINIMUM_MANUAL_TEMP..=MAXIMUM_MANUAL_TEMP).contains(&temperature) {
            return Err(ValidationError::ManualTemperature);
        }
        if !(MINIMUM_BRIGHTNESS..=MAXIMUM_BRIGHTNESS).contains(&brightness) {
            return Err(ValidationError::Brightness);
        }
        if !gamma.is_in_range() {
            return Err(ValidationError::Gamma);
        }
        Ok(Self {
            temperature,
            brightness,
            gamma,
        })
    }

    pub fn temperature(&self) -> u32 {
        self.temperature
    }

    pub fn brightness(&self) -> f64 {
        self.brightness
    }

    pub fn gamma(&self) -> GammaTriple {
        self.gamma
    }
}
