//! Keyboard layout lookup through `setxkbmap`.

use std::process::Command;

use crate::core::status::LayoutQuery;
use crate::error::{Result, StatusError};

/// Queries the XKB symbols name with `setxkbmap -print`.
#[derive(Debug, Default)]
pub struct SetxkbmapQuery;

impl SetxkbmapQuery {
    pub fn new() -> Self {
        Self
    }
}

impl LayoutQuery for SetxkbmapQuery {
    fn query(&mut self) -> Result<String> {
        let output = Command::new("setxkbmap")
            .arg("-print")
            .output()
            .map_err(|e| StatusError::query(format!("setxkbmap: {}", e)))?;

        if !output.status.success() {
            return Err(StatusError::query(format!("setxkbmap exited with {}", output.status)));
        }

        let text = String::from_utf8_lossy(&output.stdout);
        parse_symbols(&text)
            .ok_or_else(|| StatusError::query("no xkb_symbols in setxkbmap output"))
    }
}

/// Layout part of the `xkb_symbols` include string.
///
/// Option components such as `inet(evdev)` and group suffixes (`:2`) are
/// dropped so the final `+` segment is the layout itself:
/// `pc+us+cz:2+inet(evdev)` becomes `pc+us+cz`.
pub fn parse_symbols(print_output: &str) -> Option<String> {
    let line = print_output
        .lines()
        .find(|line| line.trim_start().starts_with("xkb_symbols"))?;
    let start = line.find('"')? + 1;
    let end = start + line[start..].find('"')?;

    let layouts: Vec<&str> = line[start..end]
        .split('+')
        .filter(|part| !part.contains('('))
        .map(|part| part.split(':').next().unwrap_or(part))
        .filter(|part| !part.is_empty())
        .collect();

    if layouts.is_empty() {
        None
    } else {
        Some(layouts.join("+"))
    }
}
