//! Metric sources feeding the status line.
//!
//! Each source owns its handles and caches for the life of the process and
//! produces one short display string per cycle, or nothing.

mod battery;
mod clock;
mod layout;
mod ram;

pub use battery::{BatterySource, BATTERY_CAPACITY_PATH, BATTERY_STATUS_PATH};
pub use clock::{format_clock, ClockSource, CLOCK_FORMAT};
pub use layout::{layout_code, LayoutQuery, LayoutSource};
pub use ram::{MeminfoField, RamSource, MEMINFO_PATH};

use crate::error::Result;

/// Capability shared by every metric source
pub trait MetricSource {
    /// Short name used in log messages
    fn name(&self) -> &'static str;

    /// Produce this cycle's text; an empty string means "no contribution".
    fn try_sample(&mut self) -> Result<String>;

    /// Sample with per-source failure isolation.
    ///
    /// Errors are logged and turned into an empty contribution so the rest of
    /// the line and the next cycle are unaffected.
    fn sample(&mut self) -> Option<String> {
        match self.try_sample() {
            Ok(text) if text.is_empty() => None,
            Ok(text) => Some(text),
            Err(e) => {
                log::warn!("{} sample failed: {}", self.name(), e);
                None
            }
        }
    }
}

/// Type-erased source for the compositor's ordered table
pub type BoxedSource = Box<dyn MetricSource>;
