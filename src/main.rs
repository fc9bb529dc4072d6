use std::io::Read;
use std::path::PathBuf;

use chrono::Local;
use tracing::info;

use daygrid::ingest;

/// Read a day snapshot (JSON) from the path given as the first argument or
/// from stdin, run one layout pass against the system clock, and print the
/// layout as JSON.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let row_height: Option<f64> = std::env::var("DAYGRID_ROW_HEIGHT")
        .ok()
        .and_then(|s| s.parse().ok());
    let min_block_height: Option<f64> = std::env::var("DAYGRID_MIN_BLOCK_HEIGHT")
        .ok()
        .and_then(|s| s.parse().ok());
    let show_all = std::env::var("DAYGRID_SHOW_ALL").is_ok();

    let mut file = match std::env::args().nth(1) {
        Some(path) => ingest::from_path(&PathBuf::from(path))?,
        None => {
            let mut json = String::new();
            std::io::stdin().read_to_string(&mut json)?;
            ingest::from_json(&json)?
        }
    };

    if let Some(h) = row_height {
        file.options.row_height_px = h;
    }
    if let Some(h) = min_block_height {
        file.options.min_block_height_px = h;
    }

    // Cancelled and expired appointments vacate their slot unless asked for.
    if !show_all {
        file.snapshot.appointments.retain(|a| a.status.occupies_slot());
    }

    // The single clock read: everything downstream takes `now` as data.
    let now = Local::now();

    info!(date = %file.snapshot.selected_date, appointments = file.snapshot.appointments.len(), "laying out day");
    info!(row_height_px = file.options.row_height_px, min_block_height_px = file.options.min_block_height_px);

    let layout = daygrid::layout_day(&file.snapshot, &file.options, &now);
    println!("{}", serde_json::to_string_pretty(&layout)?);
    Ok(())
}
