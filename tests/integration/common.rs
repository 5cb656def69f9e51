use std::path::Path;

const LABELS: [&str; 24] = [
    "MemTotal", "MemFree", "MemAvailable", "Buffers", "Cached", "SwapCached", "Active",
    "Inactive", "Active(anon)", "Inactive(anon)", "Active(file)", "Inactive(file)",
    "Unevictable", "Mlocked", "SwapTotal", "SwapFree", "Dirty", "Writeback", "AnonPages",
    "Mapped", "Shmem", "KReclaimable", "Slab", "SReclaimable",
];

/// Kernel-style meminfo text: 16-char label column, 8-digit value, ` kB`.
pub fn meminfo(total: u64, free: u64, buffers: u64, cached: u64, reclaimable: u64) -> String {
    LABELS
        .iter()
        .map(|label| {
            let kb = match *label {
                "MemTotal" => total,
                "MemFree" => free,
                "Buffers" => buffers,
                "Cached" => cached,
                "SReclaimable" => reclaimable,
                _ => 0,
            };
            format!("{:<16}{:>8} kB\n", format!("{}:", label), kb)
        })
        .collect()
}

pub fn write_battery(dir: &Path, capacity: &str, status: &str) {
    std::fs::write(dir.join("capacity"), capacity).unwrap();
    std::fs::write(dir.join("status"), status).unwrap();
}
