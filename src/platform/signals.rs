//! Layout-change notification delivery and the interruptible sleep.

use std::io;
use std::mem;
use std::ptr;
use std::time::Duration;

use libc::{c_int, c_void, siginfo_t};

use crate::core::status::invalidation::LAYOUT_DIRTY;
use crate::core::status::scheduler::{SleepOutcome, Sleeper};
use crate::error::{Result, StatusError};

/// Signal the window manager queues when the keyboard layout changes
pub const NOTIFY_SIGNAL: c_int = libc::SIGUSR1;

extern "C" fn on_layout_changed(_sig: c_int, _info: *mut siginfo_t, _ctx: *mut c_void) {
    // payload is the sender's pid, only the fact of delivery matters
    LAYOUT_DIRTY.mark();
}

/// Install the notification handler.
///
/// `SA_RESTART` is deliberately left out so a pending `nanosleep` returns
/// `EINTR` and the line is refreshed right away.
pub fn install_layout_handler() -> Result<()> {
    let handler: extern "C" fn(c_int, *mut siginfo_t, *mut c_void) = on_layout_changed;

    unsafe {
        let mut action: libc::sigaction = mem::zeroed();
        action.sa_sigaction = handler as libc::sighandler_t;
        action.sa_flags = libc::SA_SIGINFO;
        libc::sigemptyset(&mut action.sa_mask);

        if libc::sigaction(NOTIFY_SIGNAL, &action, ptr::null_mut()) == -1 {
            return Err(StatusError::last_os_signal("sigaction"));
        }
    }

    log::debug!("Layout notification handler installed");
    Ok(())
}

/// Run `f` with the notification signal blocked on this thread.
///
/// Threads spawned inside `f` inherit the mask, so notifications keep
/// landing on the thread that sleeps.
pub fn block_notifications_during<T, F: FnOnce() -> T>(f: F) -> Result<T> {
    unsafe {
        let mut set: libc::sigset_t = mem::zeroed();
        let mut previous: libc::sigset_t = mem::zeroed();
        libc::sigemptyset(&mut set);
        libc::sigaddset(&mut set, NOTIFY_SIGNAL);

        let rc = libc::pthread_sigmask(libc::SIG_BLOCK, &set, &mut previous);
        if rc != 0 {
            return Err(StatusError::Signal(format!(
                "pthread_sigmask: {}",
                io::Error::from_raw_os_error(rc)
            )));
        }

        let out = f();

        let rc = libc::pthread_sigmask(libc::SIG_SETMASK, &previous, ptr::null_mut());
        if rc != 0 {
            return Err(StatusError::Signal(format!(
                "pthread_sigmask restore: {}",
                io::Error::from_raw_os_error(rc)
            )));
        }

        Ok(out)
    }
}

/// `nanosleep(2)` based sleeper reporting early wake-ups.
#[derive(Debug, Default)]
pub struct NanoSleeper;

impl Sleeper for NanoSleeper {
    fn sleep(&mut self, duration: Duration) -> SleepOutcome {
        let (request, mut remaining) = unsafe {
            let mut request: libc::timespec = mem::zeroed();
            request.tv_sec = duration.as_secs() as libc::time_t;
            request.tv_nsec = duration.subsec_nanos() as libc::c_long;
            (request, mem::zeroed::<libc::timespec>())
        };

        if unsafe { libc::nanosleep(&request, &mut remaining) } == 0 {
            return SleepOutcome::Completed;
        }

        let err = io::Error::last_os_error();
        if err.raw_os_error() == Some(libc::EINTR) {
            SleepOutcome::Interrupted {
                remaining: Duration::new(remaining.tv_sec as u64, remaining.tv_nsec as u32),
            }
        } else {
            log::warn!("nanosleep failed: {}", err);
            SleepOutcome::Completed
        }
    }
}
