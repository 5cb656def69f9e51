use super::compositor::CompositeLine;
use crate::error::Result;

/// Destination of the composed status line (root window name, stdout, ...).
pub trait PublishSink {
    fn publish(&mut self, line: &CompositeLine) -> Result<()>;
}

impl<S: PublishSink + ?Sized> PublishSink for Box<S> {
    fn publish(&mut self, line: &CompositeLine) -> Result<()> {
        (**self).publish(line)
    }
}
