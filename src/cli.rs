use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;

use crate::core::config::SinkKind;

pub fn build_cli() -> Command {
    Command::new("wmstatus")
        .author("wmstatus Contributors")
        .about(
            "Publishes RAM, battery, keyboard layout and time as the window manager status line",
        )
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .short('V')
                .long("version")
                .help("Print version information")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable debug logging (RUST_LOG takes precedence)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("Config file (default: <config dir>/wmstatus/config.json)")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("period")
                .short('p')
                .long("period")
                .value_name("MS")
                .help("Update period in milliseconds")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new("capacity")
                .long("capacity")
                .value_name("CHARS")
                .help("Maximum status line length")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("sink")
                .short('s')
                .long("sink")
                .value_name("SINK")
                .help("Where to publish: xroot (X root window name) or stdout")
                .value_parser(clap::value_parser!(SinkKind)),
        )
        .arg(
            Arg::new("peer")
                .long("peer")
                .value_name("NAME")
                .help("Register with this process (e.g. dwm) for layout change notifications"),
        )
        .arg(
            Arg::new("no-layout")
                .long("no-layout")
                .help("Do not show the keyboard layout")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-drift-correction")
                .long("no-drift-correction")
                .help("Always sleep the full period, even after an early wake-up")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("once")
                .long("once")
                .help("Publish a single status line and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("print-config")
                .long("print-config")
                .help("Print the effective configuration as JSON and exit")
                .action(ArgAction::SetTrue),
        )
}
