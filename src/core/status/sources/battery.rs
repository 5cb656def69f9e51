use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

use super::MetricSource;
use crate::core::status::line_reader::read_at_most;
use crate::error::{Result, StatusError};

pub const BATTERY_CAPACITY_PATH: &str = "/sys/class/power_supply/BAT0/capacity";
pub const BATTERY_STATUS_PATH: &str = "/sys/class/power_supply/BAT0/status";

const CHARGING: &[u8] = b"Charging\n";

/// Battery charge and charging state from sysfs.
///
/// Either file missing at setup means there is no battery; the source then
/// stays silent for the life of the process.
pub struct BatterySource {
    capacity: Option<File>,
    status: Option<File>,
}

impl BatterySource {
    pub fn open<P: AsRef<Path>, Q: AsRef<Path>>(capacity_path: P, status_path: Q) -> Result<Self> {
        let capacity = open_optional(capacity_path.as_ref())?;
        let status = open_optional(status_path.as_ref())?;

        if capacity.is_none() || status.is_none() {
            log::info!("No battery found, battery segment disabled");
        }

        Ok(Self { capacity, status })
    }

    pub fn is_present(&self) -> bool {
        self.capacity.is_some() && self.status.is_some()
    }
}

/// `NotFound` is "no battery", anything else is a setup failure.
fn open_optional(path: &Path) -> Result<Option<File>> {
    match File::open(path) {
        Ok(file) => Ok(Some(file)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StatusError::setup(format!("open {}: {}", path.display(), e))),
    }
}

impl MetricSource for BatterySource {
    fn name(&self) -> &'static str {
        "battery"
    }

    fn try_sample(&mut self) -> Result<String> {
        let (Some(capacity_file), Some(status_file)) = (&self.capacity, &self.status) else {
            return Ok(String::new());
        };

        let mut status = [0u8; 16];
        let got = read_at_most(status_file, 0, &mut status)?;
        let charging = &status[..got] == CHARGING;

        let mut capacity = [0u8; 8];
        let got = read_at_most(capacity_file, 0, &mut capacity)?;
        let capacity = String::from_utf8_lossy(&capacity[..got]);
        let capacity = capacity.trim_end_matches('\n');
        if capacity.is_empty() {
            return Err(StatusError::ShortRead {
                offset: 0,
                expected: 1,
                got: 0,
            });
        }

        Ok(format!("{}{} %", if charging { '+' } else { ' ' }, capacity))
    }
}
