const KIB_PER_MIB: u64 = 1024;
const KIB_PER_GIB: u64 = 1024 * 1024;

/// Format a kibibyte count the way the status line shows memory.
///
/// `>= 1 GiB` renders with two decimals (`"7.67 GiB"`), `>= 1 MiB` as a whole
/// number of MiB (floor), anything smaller as plain KiB. The GiB branch divides
/// in single precision so the rounding of the second decimal stays stable.
pub fn format_kb(kb: u64) -> String {
    if kb >= KIB_PER_GIB {
        format!("{:.2} GiB", kb as f32 / KIB_PER_GIB as f32)
    } else if kb >= KIB_PER_MIB {
        format!("{} MiB", kb / KIB_PER_MIB)
    } else {
        format!("{} KiB", kb)
    }
}
