//! Keyboard layout, refreshed only when the window manager says it changed.

use super::MetricSource;
use crate::core::status::invalidation::DirtyFlag;
use crate::error::{Result, StatusError};

const CODE_LEN: usize = 2;

/// External facility reporting the current XKB symbols identifier
/// (e.g. `pc+us+cz`).
pub trait LayoutQuery {
    fn query(&mut self) -> Result<String>;
}

impl<F> LayoutQuery for F
where
    F: FnMut() -> Result<String>,
{
    fn query(&mut self) -> Result<String> {
        self()
    }
}

/// Two-letter code from the final `+`-separated segment of `identifier`.
pub fn layout_code(identifier: &str) -> Option<String> {
    let segment = identifier
        .trim()
        .rsplit('+')
        .next()
        .unwrap_or_default();
    let code: String = segment.chars().take(CODE_LEN).collect();

    if code.is_empty() {
        None
    } else {
        Some(code)
    }
}

pub struct LayoutSource {
    query: Box<dyn LayoutQuery>,
    dirty: &'static DirtyFlag,
    cached: String,
}

impl LayoutSource {
    /// Query the initial layout; failing here is a setup error.
    pub fn new(mut query: Box<dyn LayoutQuery>, dirty: &'static DirtyFlag) -> Result<Self> {
        dirty.take();
        let identifier = query.query()?;
        let cached = layout_code(&identifier).ok_or_else(|| {
            StatusError::setup(format!("no layout code in {:?}", identifier))
        })?;
        log::info!("Keyboard layout: {}", cached);

        Ok(Self {
            query,
            dirty,
            cached,
        })
    }

    pub fn cached(&self) -> &str {
        &self.cached
    }

    fn refresh(&mut self) -> Result<()> {
        let identifier = match self.query.query() {
            Ok(identifier) => identifier,
            Err(e) => {
                // retry on the next cycle
                self.dirty.mark();
                return Err(e);
            }
        };

        let code = layout_code(&identifier)
            .ok_or_else(|| StatusError::query(format!("no layout code in {:?}", identifier)))?;
        log::debug!("Keyboard layout changed: {} -> {}", self.cached, code);
        self.cached = code;
        Ok(())
    }
}

impl MetricSource for LayoutSource {
    fn name(&self) -> &'static str {
        "layout"
    }

    fn try_sample(&mut self) -> Result<String> {
        if self.dirty.take() {
            self.refresh()?;
        }
        Ok(self.cached.clone())
    }
}
