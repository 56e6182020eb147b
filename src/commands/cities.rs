//! Implementation of the `cities` command.

use crate::geo::CITIES;
use crate::logger::Log;

pub fn handle_cities_command() {
    Log::log_block_start("Available cities:");
    for city in CITIES {
        Log::log_indented(&format!(
            "{:<20} {:>6}, {:>6}",
            city.name, city.latitude, city.longitude
        ));
    }
}
