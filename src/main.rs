use anyhow::Result;
use log::LevelFilter;

use wmstatus::cli::build_cli;
use wmstatus::commands;

fn main() -> Result<()> {
    let matches = build_cli().get_matches();

    if matches.get_flag("version") {
        return commands::version();
    }

    let level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    wmstatus::init_logging(level);

    commands::run(&matches)
}
