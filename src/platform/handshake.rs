//! One-time registration with the window manager.
//!
//! The peer learns our pid from the signal payload and queues
//! [`NOTIFY_SIGNAL`] back to us whenever the keyboard layout changes.

use std::fs;
use std::path::Path;

use libc::c_void;

use super::signals::NOTIFY_SIGNAL;
use crate::error::{Result, StatusError};

pub const PROC_ROOT: &str = "/proc";

/// First pid under `proc_root` whose `comm` equals `name`.
///
/// Processes that exit while the table is being walked are skipped.
pub fn find_process(proc_root: &Path, name: &str) -> Result<Option<i32>> {
    for entry in fs::read_dir(proc_root)? {
        let entry = entry?;
        let Some(pid) = entry
            .file_name()
            .to_str()
            .and_then(|s| s.parse::<i32>().ok())
        else {
            continue;
        };

        let comm = match fs::read_to_string(entry.path().join("comm")) {
            Ok(comm) => comm,
            Err(e) => {
                log::trace!("skipping pid {}: {}", pid, e);
                continue;
            }
        };

        if comm.trim_end_matches('\n') == name {
            return Ok(Some(pid));
        }
    }

    Ok(None)
}

/// Queue the notification signal to `pid` carrying our own pid.
pub fn notify_peer(pid: i32) -> Result<()> {
    let value = libc::sigval {
        sival_ptr: unsafe { libc::getpid() } as usize as *mut c_void,
    };

    if unsafe { libc::sigqueue(pid, NOTIFY_SIGNAL, value) } == -1 {
        return Err(StatusError::last_os_signal(format!("sigqueue to {}", pid)));
    }

    Ok(())
}

/// Locate `peer` and register with it. Not finding it is a setup failure.
pub fn handshake(peer: &str) -> Result<i32> {
    let pid = find_process(Path::new(PROC_ROOT), peer)?
        .ok_or_else(|| StatusError::setup(format!("{} pid not found", peer)))?;

    notify_peer(pid)?;
    log::info!("Registered with {} (pid {})", peer, pid);

    Ok(pid)
}
