//! RAM usage from `/proc/meminfo`.
//!
//! Every meminfo line has the same width, so fields are fetched with a single
//! positioned read at `line_index * width` instead of scanning the file each
//! cycle. Each read is checked against the expected label; when the kernel
//! layout differs the field is located with one full scan and its new offset
//! is kept for later cycles.

use std::fs::File;
use std::path::Path;

use super::MetricSource;
use crate::core::status::field::extract_field;
use crate::core::status::line_reader::{probe_line_width, read_all_at, read_line_at};
use crate::error::{Result, StatusError};
use crate::ui::formatters::format_kb;

pub const MEMINFO_PATH: &str = "/proc/meminfo";

const UNIT: &str = "kB";
const FIELD_COUNT: usize = 5;

/// Meminfo lines the RAM source reads, in their stable kernel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeminfoField {
    MemTotal,
    MemFree,
    Buffers,
    Cached,
    SReclaimable,
}

impl MeminfoField {
    const ALL: [MeminfoField; FIELD_COUNT] = [
        MeminfoField::MemTotal,
        MeminfoField::MemFree,
        MeminfoField::Buffers,
        MeminfoField::Cached,
        MeminfoField::SReclaimable,
    ];

    /// Fields subtracted from the total to get used memory
    const RECLAIMABLE: [MeminfoField; 4] = [
        MeminfoField::MemFree,
        MeminfoField::Buffers,
        MeminfoField::Cached,
        MeminfoField::SReclaimable,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            MeminfoField::MemTotal => "MemTotal:",
            MeminfoField::MemFree => "MemFree:",
            MeminfoField::Buffers => "Buffers:",
            MeminfoField::Cached => "Cached:",
            MeminfoField::SReclaimable => "SReclaimable:",
        }
    }

    /// Zero-based line number in the kernel's meminfo layout
    pub const fn line_index(self) -> u64 {
        match self {
            MeminfoField::MemTotal => 0,
            MeminfoField::MemFree => 1,
            MeminfoField::Buffers => 3,
            MeminfoField::Cached => 4,
            MeminfoField::SReclaimable => 23,
        }
    }

    const fn slot(self) -> usize {
        self as usize
    }
}

pub struct RamSource {
    file: File,
    width: usize,
    offsets: [u64; FIELD_COUNT],
    total_kb: i64,
    total_fmt: String,
    scratch: Vec<u8>,
}

impl RamSource {
    /// Open the meminfo file and read the immutable total.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| StatusError::setup(format!("open {}: {}", path.display(), e)))?;
        Self::from_file(file)
    }

    pub fn from_file(file: File) -> Result<Self> {
        let width = probe_line_width(&file)?;
        let offsets = MeminfoField::ALL.map(|field| field.line_index() * width as u64);

        let mut source = Self {
            file,
            width,
            offsets,
            total_kb: 0,
            total_fmt: String::new(),
            scratch: vec![0u8; width],
        };

        source.total_kb = source.read_field(MeminfoField::MemTotal)?;
        source.total_fmt = format_kb(source.total_kb.max(0) as u64);
        log::debug!(
            "meminfo line width {} bytes, total {} kB ({})",
            width,
            source.total_kb,
            source.total_fmt
        );

        Ok(source)
    }

    pub fn line_width(&self) -> usize {
        self.width
    }

    pub fn total_kb(&self) -> i64 {
        self.total_kb
    }

    /// Byte offset currently used for `field`
    pub fn offset_of(&self, field: MeminfoField) -> u64 {
        self.offsets[field.slot()]
    }

    /// Used memory in kB: total minus free, buffers, page cache and
    /// reclaimable slab.
    pub fn used_kb(&mut self) -> Result<i64> {
        let mut used = self.total_kb;
        for field in MeminfoField::RECLAIMABLE {
            let value = self.read_field(field)?;
            used = used.checked_sub(value).ok_or_else(|| {
                StatusError::query(format!("meminfo {} out of range: {}", field.label(), value))
            })?;
        }
        Ok(used)
    }

    fn read_field(&mut self, field: MeminfoField) -> Result<i64> {
        match self.read_at_known_offset(field) {
            Ok(Some(value)) => Ok(value),
            Ok(None) | Err(StatusError::ShortRead { .. }) => self.rescan(field),
            Err(e) => Err(e),
        }
    }

    /// `Ok(None)` when the line at the stored offset is not `field`'s line.
    fn read_at_known_offset(&mut self, field: MeminfoField) -> Result<Option<i64>> {
        let offset = self.offsets[field.slot()];
        read_line_at(&self.file, offset, &mut self.scratch)?;

        let Some(end) = self.scratch.iter().position(|&b| b == b'\n') else {
            return Ok(None);
        };
        let Ok(line) = std::str::from_utf8(&self.scratch[..end]) else {
            return Ok(None);
        };
        if !line.starts_with(field.label()) {
            return Ok(None);
        }

        Ok(Some(extract_field(line, field.label(), UNIT)))
    }

    fn rescan(&mut self, field: MeminfoField) -> Result<i64> {
        let data = read_all_at(&self.file)?;
        let text = String::from_utf8_lossy(&data);

        let mut offset = 0u64;
        for line in text.split_inclusive('\n') {
            if line.starts_with(field.label()) {
                log::warn!(
                    "meminfo layout changed: {} expected at offset {}, found at {}",
                    field.label(),
                    self.offsets[field.slot()],
                    offset
                );
                self.offsets[field.slot()] = offset;
                return Ok(extract_field(line, field.label(), UNIT));
            }
            offset += line.len() as u64;
        }

        Err(StatusError::field_not_found(field.label()))
    }
}

impl MetricSource for RamSource {
    fn name(&self) -> &'static str {
        "ram"
    }

    fn try_sample(&mut self) -> Result<String> {
        let used = self.used_kb()?;
        Ok(format!("{}/{}", format_kb(used.max(0) as u64), self.total_fmt))
    }
}
