//! Publish sinks for the composed status line.

use std::io::{self, Write};
use std::process::Command;

use crate::core::status::{CompositeLine, PublishSink};
use crate::error::{Result, StatusError};

/// Sets the X root window name through `xsetroot`, which dwm displays as
/// its status text.
///
/// Each publish forks one `xsetroot` process, so at the default period that
/// is two short-lived processes per second. Setting `WM_NAME` over a kept
/// X connection would avoid this if an X client crate is ever pulled in.
#[derive(Debug, Default)]
pub struct XRootSink;

impl XRootSink {
    pub fn new() -> Self {
        Self
    }
}

impl PublishSink for XRootSink {
    fn publish(&mut self, line: &CompositeLine) -> Result<()> {
        let status = Command::new("xsetroot")
            .arg("-name")
            .arg(line.as_str())
            .status()
            .map_err(|e| StatusError::publish(format!("xsetroot: {}", e)))?;

        if !status.success() {
            return Err(StatusError::publish(format!("xsetroot exited with {}", status)));
        }

        Ok(())
    }
}

/// Writes one line per publish, for bars that read their status from stdin.
pub struct StdoutSink<W: Write = io::Stdout> {
    out: W,
}

impl StdoutSink {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> StdoutSink<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> PublishSink for StdoutSink<W> {
    fn publish(&mut self, line: &CompositeLine) -> Result<()> {
        writeln!(self.out, "{}", line)?;
        self.out.flush()?;
        Ok(())
    }
}
