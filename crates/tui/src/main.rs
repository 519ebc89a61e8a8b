mod renderer;

use std::path::PathBuf;

use anyhow::{Result, bail};

use airgrid_core::feed::parse_auto;
use airgrid_core::layout::{DEFAULT_LANE_CAP, GridLayout};
use airgrid_core::model::Timetable;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: airgrid <feed.json>...");
        std::process::exit(1);
    }

    let mut timetable = Timetable::new();
    for arg in &args[1..] {
        let path = PathBuf::from(arg);
        let data = std::fs::read(&path)?;
        let day = parse_auto(&data)?;
        timetable.add_day(day);
    }
    if timetable.is_empty() {
        bail!("no days parsed from the given feeds");
    }

    let catalog = timetable.row_catalog();
    let layout = GridLayout::build(&timetable, &catalog, DEFAULT_LANE_CAP);

    renderer::render_tui(&timetable, &layout)?;
    Ok(())
}
