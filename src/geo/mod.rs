//! Geographic lookup for the built-in city list.
//!
//! The table holds the Polish voivodeship capitals with their coordinates as
//! text, exactly as they are written to the command line and the config
//! file. Entries are kept in code-point order so listings match the order of
//! a sorted picker.

pub mod city_selector;

/// A named location with tabulated coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct City {
    pub name: &'static str,
    pub latitude: &'static str,
    pub longitude: &'static str,
}

const fn city(name: &'static str, latitude: &'static str, longitude: &'static str) -> City {
    City {
        name,
        latitude,
        longitude,
    }
}

pub const CITIES: &[City] = &[
    city("Białystok", "53.13", "23.16"),
    city("Bydgoszcz", "53.12", "18.00"),
    city("Gdańsk", "54.35", "18.64"),
    city("Gorzów Wielkopolski", "52.73", "15.24"),
    city("Katowice", "50.26", "19.02"),
    city("Kielce", "50.87", "20.62"),
    city("Kraków", "50.06", "19.94"),
    city("Lublin", "51.24", "22.56"),
    city("Olsztyn", "53.77", "20.49"),
    city("Opole", "50.67", "17.92"),
    city("Poznań", "52.40", "16.92"),
    city("Rzeszów", "50.04", "21.99"),
    city("Szczecin", "53.42", "14.55"),
    city("Toruń", "53.01", "18.61"),
    city("Warszawa", "52.23", "21.01"),
    city("Wrocław", "51.10", "17.03"),
    city("Zielona Góra", "51.93", "15.50"),
    city("Łódź", "51.76", "19.45"),
];

impl City {
    pub fn latitude_deg(&self) -> Option<f64> {
        self.latitude.parse().ok()
    }

    pub fn longitude_deg(&self) -> Option<f64> {
        self.longitude.parse().ok()
    }
}

/// Find a city by name.
///
/// An exact match wins; otherwise the comparison ignores case and Polish
/// diacritics, so `krakow` and `LODZ` resolve too.
pub fn lookup(name: &str) -> Option<&'static City> {
    let name = name.trim();
    if let Some(found) = CITIES.iter().find(|city| city.name == name) {
        return Some(found);
    }

    let wanted = fold(name);
    CITIES.iter().find(|city| fold(city.name) == wanted)
}

/// The closest city within `tolerance` degrees on both axes.
pub fn nearest_city(latitude: f64, longitude: f64, tolerance: f64) -> Option<&'static City> {
    CITIES
        .iter()
        .filter_map(|city| {
            let lat_diff = (city.latitude_deg()? - latitude).abs();
            let lon_diff = (city.longitude_deg()? - longitude).abs();
            if lat_diff <= tolerance && lon_diff <= tolerance {
                Some((city, calculate_distance(lat_diff, lon_diff)))
            } else {
                None
            }
        })
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(city, _)| city)
}

/// Euclidean distance in degree space; good enough for picking a neighbour.
fn calculate_distance(lat_diff: f64, lon_diff: f64) -> f64 {
    (lat_diff * lat_diff + lon_diff * lon_diff).sqrt()
}

/// Lower-case and strip Polish diacritics.
pub fn fold(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'ą' => 'a',
            'ć' => 'c',
            'ę' => 'e',
            'ł' => 'l',
            'ń' => 'n',
            'ó' => 'o',
            'ś' => 's',
            'ź' | 'ż' => 'z',
            other => other,
        })
        .collect()
}
