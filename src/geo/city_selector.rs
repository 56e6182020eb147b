//! Interactive city selection in the terminal.
//!
//! Type-to-filter list over the built-in city table. Matching uses the same
//! case- and diacritic-insensitive folding as [`super::lookup`].

use crate::geo::{CITIES, City, fold};
use crate::logger::Log;
use anyhow::Result;
use crossterm::{
    ExecutableCommand,
    cursor::{Hide, MoveDown, MoveUp, Show},
    event::{self, Event, KeyCode, KeyEventKind},
    style::Print,
    terminal::{self, Clear, ClearType},
};
use std::io::{Write, stdout};

const VISIBLE_ITEMS: usize = 6;
// pipe gap + search line + list + status line
const LINES_DRAWN: u16 = 1 + 1 + VISIBLE_ITEMS as u16 + 1;

/// Let the user pick a city; `Err` when cancelled with Esc.
pub fn select_city_interactive() -> Result<&'static City> {
    Log::log_block_start("Select a city");
    Log::log_indented("Type to search, use ↑/↓ to navigate, Enter to select, Esc to cancel");

    let selected = filter_and_pick(CITIES)?;

    Log::log_block_start(&format!("Selected: {}", selected.name));
    Log::log_indented(&format!(
        "Coordinates: {}, {}",
        selected.latitude, selected.longitude
    ));

    Ok(selected)
}

/// Cities whose folded name contains the folded query.
pub fn filter_cities<'a>(cities: &'a [City], query: &str) -> Vec<&'a City> {
    let query = fold(query.trim());
    cities
        .iter()
        .filter(|city| query.is_empty() || fold(city.name).contains(&query))
        .collect()
}

fn filter_and_pick(cities: &'static [City]) -> Result<&'static City> {
    if cities.is_empty() {
        return Err(anyhow::anyhow!("No cities available"));
    }

    let mut stdout = stdout();
    stdout.flush()?;
    terminal::enable_raw_mode()?;
    let _guard = TerminalGuard {
        lines_drawn: LINES_DRAWN,
    };
    stdout.execute(Hide)?;

    let mut search_query = String::new();
    let mut selected_index = 0;
    let mut scroll_offset = 0;

    loop {
        let filtered = filter_cities(cities, &search_query);

        if selected_index >= filtered.len() && !filtered.is_empty() {
            selected_index = filtered.len() - 1;
        }
        if selected_index < scroll_offset {
            scroll_offset = selected_index;
        } else if selected_index >= scroll_offset + VISIBLE_ITEMS {
            scroll_offset = selected_index - VISIBLE_ITEMS + 1;
        }

        stdout.execute(Clear(ClearType::FromCursorDown))?;
        stdout.execute(Print("┃\r\n"))?;

        stdout.execute(Print("┃ Search: "))?;
        stdout.execute(Print(&search_query))?;
        if search_query.is_empty() {
            stdout.execute(Print("_"))?;
        }
        stdout.execute(Print("\r\n"))?;

        for i in 0..VISIBLE_ITEMS {
            match filtered.get(scroll_offset + i) {
                Some(city) if scroll_offset + i == selected_index => {
                    stdout.execute(Print(format!("┃ ▶ {}", city.name)))?;
                }
                Some(city) => {
                    stdout.execute(Print(format!("┃   {}", city.name)))?;
                }
                None => {
                    stdout.execute(Print("┃"))?;
                }
            }
            stdout.execute(Print("\r\n"))?;
        }

        if filtered.is_empty() {
            stdout.execute(Print("┃ No cities found\r\n"))?;
        } else {
            stdout.execute(Print(format!(
                "┃ {} of {} cities\r\n",
                filtered.len(),
                cities.len()
            )))?;
        }
        stdout.flush()?;
        stdout.execute(MoveUp(LINES_DRAWN))?;

        if let Event::Key(key) = event::read()? {
            // Windows reports releases too
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Esc => {
                    return Err(anyhow::anyhow!("City selection cancelled by user"));
                }
                KeyCode::Enter => {
                    if let Some(city) = filtered.get(selected_index) {
                        return Ok(*city);
                    }
                }
                KeyCode::Up => {
                    selected_index = selected_index.saturating_sub(1);
                }
                KeyCode::Down => {
                    if selected_index + 1 < filtered.len() {
                        selected_index += 1;
                    }
                }
                KeyCode::Backspace => {
                    search_query.pop();
                    selected_index = 0;
                    scroll_offset = 0;
                }
                KeyCode::Char(c) => {
                    search_query.push(c);
                    selected_index = 0;
                    scroll_offset = 0;
                }
                _ => {}
            }
        }
    }
}

/// Leaves raw mode and moves below the picker however the loop exits.
struct TerminalGuard {
    lines_drawn: u16,
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let mut stdout = stdout();
        let _ = stdout.execute(Show);
        let _ = stdout.execute(MoveDown(self.lines_drawn));
        let _ = stdout.flush();
    }
}
