//! Joins source outputs into the single bounded status line.

use std::fmt;

use super::sources::BoxedSource;

/// Default display budget of the status line, in characters
pub const DEFAULT_CAPACITY: usize = 64;
pub const SEPARATOR: &str = " | ";

/// Status text bounded by a character capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeLine {
    text: String,
    capacity: usize,
}

impl CompositeLine {
    pub fn new(capacity: usize) -> Self {
        Self {
            text: String::with_capacity(capacity + SEPARATOR.len()),
            capacity,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    fn clear(&mut self) {
        self.text.clear();
    }

    /// Cut to at most `capacity` characters on a char boundary.
    fn clamp(&mut self) {
        if let Some((idx, _)) = self.text.char_indices().nth(self.capacity) {
            self.text.truncate(idx);
        }
    }
}

impl fmt::Display for CompositeLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Samples sources in table order and assembles the line.
pub struct Compositor {
    sources: Vec<BoxedSource>,
    line: CompositeLine,
}

impl Compositor {
    pub fn new(sources: Vec<BoxedSource>, capacity: usize) -> Self {
        Self {
            sources,
            line: CompositeLine::new(capacity),
        }
    }

    pub fn source_names(&self) -> Vec<&'static str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Run one composition pass.
    ///
    /// Empty and whitespace-only outputs are skipped without a separator.
    /// Once the written content reaches the capacity, remaining sources are
    /// not sampled; the final text is clamped to the capacity.
    pub fn compose(&mut self) -> &CompositeLine {
        self.line.clear();
        let capacity = self.line.capacity;
        let mut written = 0usize;

        for source in self.sources.iter_mut() {
            let Some(text) = source.sample() else {
                continue;
            };
            let segment = text.trim();
            if segment.is_empty() {
                continue;
            }

            self.line.text.push_str(segment);
            self.line.text.push_str(SEPARATOR);
            written += segment.chars().count() + SEPARATOR.len();

            if written - SEPARATOR.len() >= capacity {
                break;
            }
        }

        if written > 0 {
            let end = self.line.text.len() - SEPARATOR.len();
            self.line.text.truncate(end);
        }
        self.line.clamp();

        &self.line
    }
}
