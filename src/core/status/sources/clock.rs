use chrono::{Local, NaiveDateTime};

use super::MetricSource;
use crate::error::Result;

/// `05/03/2024 07:08:09 Tue Mar`
pub const CLOCK_FORMAT: &str = "%d/%m/%Y %H:%M:%S %a %b";

/// Local wall-clock time. Never fails.
#[derive(Debug, Default)]
pub struct ClockSource;

impl ClockSource {
    pub fn new() -> Self {
        Self
    }
}

pub fn format_clock(time: &NaiveDateTime) -> String {
    time.format(CLOCK_FORMAT).to_string()
}

impl MetricSource for ClockSource {
    fn name(&self) -> &'static str {
        "clock"
    }

    fn try_sample(&mut self) -> Result<String> {
        Ok(format_clock(&Local::now().naive_local()))
    }
}
