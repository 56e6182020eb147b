//! The editable settings a user works with between commands.
//!
//! A `FormState` starts from built-in defaults, takes values from the config
//! file, then from command-line overrides, and finally feeds validation,
//! command construction and saving. It plays the role of the on-screen
//! fields of a settings window: auto-mode values stay as text until they are
//! validated, manual-effect values are already numeric.

use crate::config::{ConfigSections, ManualSection, RedshiftSection};
use crate::constants::*;
use crate::geo::{self, City};
use crate::logger::Log;
use crate::status::LiveStatus;
use crate::validation::{AutoModeInput, GammaTriple, ManualEffect, ValidationError};

/// Fields that `nudge` can step up or down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustableField {
    TempDay,
    TempNight,
    BrightnessDay,
    BrightnessNight,
}

impl AdjustableField {
    pub fn label(&self) -> &'static str {
        match self {
            AdjustableField::TempDay => "Day temperature",
            AdjustableField::TempNight => "Night temperature",
            AdjustableField::BrightnessDay => "Day brightness",
            AdjustableField::BrightnessNight => "Night brightness",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub latitude: String,
    pub longitude: String,
    pub temp_day: String,
    pub temp_night: String,
    pub brightness_day: String,
    pub brightness_night: String,
    pub manual_temperature: u32,
    pub manual_brightness: f64,
    pub gamma: GammaTriple,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            latitude: String::new(),
            longitude: String::new(),
            temp_day: DEFAULT_TEMP_DAY.to_string(),
            temp_night: DEFAULT_TEMP_NIGHT.to_string(),
            brightness_day: DEFAULT_BRIGHTNESS_DAY.to_string(),
            brightness_night: DEFAULT_BRIGHTNESS_NIGHT.to_string(),
            manual_temperature: DEFAULT_MANUAL_TEMP,
            manual_brightness: DEFAULT_MANUAL_BRIGHTNESS,
            gamma: GammaTriple::default(),
        }
    }
}

impl FormState {
    /// Defaults overlaid with whatever the config file provides.
    pub fn from_config(config: Option<&ConfigSections>) -> Self {
        let mut form = Self::default();
        if let Some(config) = config {
            form.apply_config(config);
        }
        form
    }

    /// Copy values from a loaded config file.
    ///
    /// Sections that are absent leave their fields untouched; keys missing
    /// from a present section fall back to the built-in defaults. A gamma
    /// value that cannot be parsed is reported and ignored.
    pub fn apply_config(&mut self, config: &ConfigSections) {
        if config.has_section(REDSHIFT_SECTION) {
            let get = |key: &str, fallback: &str| {
                config
                    .get(REDSHIFT_SECTION, key)
                    .unwrap_or(fallback)
                    .to_string()
            };
            self.temp_day = get("temp-day", DEFAULT_TEMP_DAY);
            self.temp_night = get("temp-night", DEFAULT_TEMP_NIGHT);
            self.brightness_day = get("brightness-day", DEFAULT_BRIGHTNESS_DAY);
            self.brightness_night = get("brightness-night", DEFAULT_BRIGHTNESS_NIGHT);

            let gamma_text = get("gamma", DEFAULT_GAMMA);
            match gamma_text.parse::<GammaTriple>() {
                Ok(gamma) => self.gamma = gamma,
                Err(_) => Log::log_warning(&format!(
                    "Invalid gamma format in configuration file: {}",
                    gamma_text
                )),
            }
        }

        if config.has_section(MANUAL_SECTION) {
            self.latitude = config.get(MANUAL_SECTION, "lat").unwrap_or("").to_string();
            self.longitude = config.get(MANUAL_SECTION, "lon").unwrap_or("").to_string();
        }
    }

    /// Adopt the parameters of a running automatic-mode instance.
    ///
    /// Returns `true` when fields were overwritten; any other status leaves
    /// the form as it was.
    pub fn apply_status(&mut self, status: &LiveStatus) -> bool {
        match status {
            LiveStatus::Auto {
                latitude,
                longitude,
                temp_day,
                temp_night,
                brightness_day,
                brightness_night,
                ..
            } => {
                self.latitude = latitude.clone();
                self.longitude = longitude.clone();
                self.temp_day = temp_day.clone();
                self.temp_night = temp_night.clone();
                self.brightness_day = brightness_day.clone();
                self.brightness_night = brightness_night.clone();
                true
            }
            LiveStatus::NotRunning | LiveStatus::Other { .. } => false,
        }
    }

    /// Fill latitude and longitude from the city table.
    pub fn select_city(&mut self, name: &str) -> Option<&'static City> {
        let city = geo::lookup(name)?;
        self.set_city(city);
        Some(city)
    }

    pub fn set_city(&mut self, city: &City) {
        self.latitude = city.latitude.to_string();
        self.longitude = city.longitude.to_string();
    }

    /// Step a field by one increment, clamped to its valid range.
    ///
    /// Text that does not parse is replaced by the field's default.
    pub fn nudge(&mut self, field: AdjustableField, direction: Direction) {
        let sign = match direction {
            Direction::Up => 1,
            Direction::Down => -1,
        };

        match field {
            AdjustableField::TempDay | AdjustableField::TempNight => {
                let entry = self.temp_entry(field);
                *entry = match entry.trim().parse::<i64>() {
                    Ok(value) => value
                        .saturating_add(sign * TEMP_STEP)
                        .clamp(MINIMUM_TEMP, MAXIMUM_TEMP)
                        .to_string(),
                    Err(_) => DEFAULT_TEMP_DAY.to_string(),
                };
            }
            AdjustableField::BrightnessDay | AdjustableField::BrightnessNight => {
                let entry = self.brightness_entry(field);
                *entry = match entry.trim().parse::<f64>() {
                    Ok(value) if value.is_finite() => format!(
                        "{:.2}",
                        (value + sign as f64 * BRIGHTNESS_STEP)
                            .clamp(MINIMUM_BRIGHTNESS, MAXIMUM_BRIGHTNESS)
                    ),
                    _ => DEFAULT_BRIGHTNESS_DAY.to_string(),
                };
            }
        }
    }

    fn temp_entry(&mut self, field: AdjustableField) -> &mut String {
        if field == AdjustableField::TempNight {
            &mut self.temp_night
        } else {
            &mut self.temp_day
        }
    }

    fn brightness_entry(&mut self, field: AdjustableField) -> &mut String {
        if field == AdjustableField::BrightnessNight {
            &mut self.brightness_night
        } else {
            &mut self.brightness_day
        }
    }

    pub fn field_value(&self, field: AdjustableField) -> &str {
        match field {
            AdjustableField::TempDay => &self.temp_day,
            AdjustableField::TempNight => &self.temp_night,
            AdjustableField::BrightnessDay => &self.brightness_day,
            AdjustableField::BrightnessNight => &self.brightness_night,
        }
    }

    /// Return the one-shot controls to neutral after a reset.
    pub fn reset_manual(&mut self) {
        self.manual_temperature = DEFAULT_MANUAL_TEMP;
        self.manual_brightness = DEFAULT_MANUAL_BRIGHTNESS;
        self.gamma = GammaTriple::default();
    }

    pub fn auto_input(&self) -> AutoModeInput {
        AutoModeInput {
            latitude: self.latitude.clone(),
            longitude: self.longitude.clone(),
            temp_day: self.temp_day.clone(),
            temp_night: self.temp_night.clone(),
            brightness_day: self.brightness_day.clone(),
            brightness_night: self.brightness_night.clone(),
        }
    }

    pub fn manual_effect(&self) -> Result<ManualEffect, ValidationError> {
        ManualEffect::new(self.manual_temperature, self.manual_brightness, self.gamma)
    }

    /// Both config sections, written verbatim from the current fields.
    pub fn to_sections(&self) -> (RedshiftSection, ManualSection) {
        (
            RedshiftSection {
                temp_day: self.temp_day.clone(),
                temp_night: self.temp_night.clone(),
                brightness_day: self.brightness_day.clone(),
                brightness_night: self.brightness_night.clone(),
                gamma: self.gamma,
            },
            ManualSection {
                lat: self.latitude.clone(),
                lon: self.longitude.clone(),
            },
        )
    }
}
