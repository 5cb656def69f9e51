use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;
use wmstatus::core::status::sources::{BatterySource, ClockSource, LayoutSource, RamSource};
use wmstatus::core::status::{
    BoxedSource, CompositeLine, Compositor, DirtyFlag, PublishSink, Scheduler, SleepOutcome,
    Sleeper, DEFAULT_CAPACITY,
};

use super::common::{meminfo, write_battery};

struct Collect(Vec<String>);

impl PublishSink for Collect {
    fn publish(&mut self, line: &CompositeLine) -> wmstatus::Result<()> {
        assert!(line.len() <= line.capacity());
        self.0.push(line.as_str().to_string());
        Ok(())
    }
}

fn sources(
    dir: &TempDir,
    dirty: &'static DirtyFlag,
    layouts: Vec<&'static str>,
) -> Vec<BoxedSource> {
    let meminfo_path = dir.path().join("meminfo");
    std::fs::write(
        &meminfo_path,
        meminfo(16_000_000, 8_000_000, 100_000, 500_000, 50_000),
    )
    .unwrap();

    let mut layouts = layouts.into_iter();
    let query = move || -> wmstatus::Result<String> {
        Ok(layouts.next().unwrap_or("pc+us").to_string())
    };

    vec![
        Box::new(RamSource::open(&meminfo_path).unwrap()),
        Box::new(
            BatterySource::open(dir.path().join("capacity"), dir.path().join("status")).unwrap(),
        ),
        Box::new(LayoutSource::new(Box::new(query), dirty).unwrap()),
        Box::new(ClockSource::new()),
    ]
}

#[test]
fn test_full_line_with_battery() {
    static DIRTY: DirtyFlag = DirtyFlag::new(false);
    let dir = TempDir::new().unwrap();
    write_battery(dir.path(), "42\n", "Charging\n");

    let mut compositor = Compositor::new(sources(&dir, &DIRTY, vec!["pc+us"]), DEFAULT_CAPACITY);
    let line = compositor.compose().as_str().to_string();
    let segments: Vec<&str> = line.split(" | ").collect();

    assert_eq!(segments.len(), 4);
    assert_eq!(segments[0], "7.01 GiB/15.26 GiB");
    assert_eq!(segments[1], "+42 %");
    assert_eq!(segments[2], "us");
    assert_eq!(segments[3].len(), 27);
}

#[test]
fn test_missing_battery_is_omitted() {
    static DIRTY: DirtyFlag = DirtyFlag::new(false);
    let dir = TempDir::new().unwrap();

    let mut compositor = Compositor::new(sources(&dir, &DIRTY, vec!["pc+de"]), DEFAULT_CAPACITY);
    let line = compositor.compose().as_str().to_string();
    let segments: Vec<&str> = line.split(" | ").collect();

    assert_eq!(segments.len(), 3);
    assert_eq!(segments[0], "7.01 GiB/15.26 GiB");
    assert_eq!(segments[1], "de");
}

#[test]
fn test_discharging_battery_is_trimmed() {
    static DIRTY: DirtyFlag = DirtyFlag::new(false);
    let dir = TempDir::new().unwrap();
    write_battery(dir.path(), "87\n", "Discharging\n");

    let mut compositor = Compositor::new(sources(&dir, &DIRTY, vec!["pc+us"]), DEFAULT_CAPACITY);
    let line = compositor.compose().as_str().to_string();
    assert!(line.contains("GiB | 87 % | us | "));
}

#[test]
fn test_small_capacity_drops_trailing_sources() {
    static DIRTY: DirtyFlag = DirtyFlag::new(false);
    let dir = TempDir::new().unwrap();
    write_battery(dir.path(), "42\n", "Charging\n");

    let mut compositor = Compositor::new(sources(&dir, &DIRTY, vec!["pc+us"]), 20);
    assert_eq!(compositor.compose().as_str(), "7.01 GiB/15.26 GiB |");
}

/// Marks the layout dirty during the first sleep, like the window manager
/// would, and stops after a few cycles.
struct NotifyingSleeper {
    dirty: &'static DirtyFlag,
    shutdown: Arc<AtomicBool>,
    requested: Vec<Duration>,
}

impl Sleeper for NotifyingSleeper {
    fn sleep(&mut self, duration: Duration) -> SleepOutcome {
        self.requested.push(duration);
        match self.requested.len() {
            1 => {
                self.dirty.mark();
                SleepOutcome::Interrupted {
                    remaining: Duration::from_millis(400),
                }
            }
            2 => SleepOutcome::Completed,
            _ => {
                self.shutdown.store(true, Ordering::Relaxed);
                SleepOutcome::Completed
            }
        }
    }
}

#[test]
fn test_layout_notification_refreshes_line_early() {
    static DIRTY: DirtyFlag = DirtyFlag::new(false);
    let dir = TempDir::new().unwrap();
    write_battery(dir.path(), "42\n", "Charging\n");

    let shutdown = Arc::new(AtomicBool::new(false));
    let mut compositor = Compositor::new(
        sources(&dir, &DIRTY, vec!["pc+us", "pc+us+cz"]),
        DEFAULT_CAPACITY,
    );
    let mut sink = Collect(Vec::new());
    let mut scheduler = Scheduler::new(
        Duration::from_millis(500),
        true,
        NotifyingSleeper {
            dirty: &DIRTY,
            shutdown: shutdown.clone(),
            requested: Vec::new(),
        },
    );

    scheduler.run(&mut compositor, &mut sink, &shutdown);

    assert_eq!(sink.0.len(), 3);
    assert!(sink.0[0].contains(" | us | "));
    assert!(sink.0[1].contains(" | cz | "));
    assert!(sink.0[2].contains(" | cz | "));

    let requested = &scheduler.sleeper().requested;
    assert_eq!(requested[0], Duration::from_millis(500));
    assert!(requested[1] <= Duration::from_millis(400));
    assert_eq!(requested[2], Duration::from_millis(500));
}
