//! Status line generation pipeline.
//!
//! Sources are sampled in a fixed order, joined into one bounded line and
//! handed to a sink on a drift-corrected period.

pub mod compositor;
pub mod field;
pub mod invalidation;
pub mod line_reader;
pub mod scheduler;
pub mod sink;
pub mod sources;

pub use compositor::{CompositeLine, Compositor, DEFAULT_CAPACITY, SEPARATOR};
pub use invalidation::{DirtyFlag, LAYOUT_DIRTY};
pub use scheduler::{next_sleep, Scheduler, SchedulerState, SleepOutcome, Sleeper, DEFAULT_PERIOD};
pub use sink::PublishSink;
pub use sources::{
    BatterySource, BoxedSource, ClockSource, LayoutQuery, LayoutSource, MetricSource, RamSource,
};
