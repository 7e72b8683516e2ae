//! Expirations calendar CLI.
//!
//! # Usage
//! ```ignore
//! vencimientos                  // Current month
//! vencimientos 3 2024           // March 2024
//! vencimientos -e docs.json -a  // With events and agenda
//! vencimientos --next 1         // Next month
//! ```

use vencimientos::args::{Args, get_display_month};
use vencimientos::calendar::CalendarWindow;
use vencimientos::clock::{Clock, SystemClock};
use vencimientos::error::CalendarError;
use vencimientos::formatter::{print_categories, print_window};
use vencimientos::source::{JsonFileSource, refresh};
use vencimientos::types::DisplayContext;

fn main() {
    env_logger::init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("vencimientos: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), CalendarError> {
    let clock = SystemClock;
    let ctx = DisplayContext::new(args, &clock);
    let month = get_display_month(args, clock.today())?;

    let mut window = CalendarWindow::new(month, args.window_options())?;
    window.shift_months(args.month_offset()?)?;

    if let Some(path) = &args.events {
        let source = JsonFileSource::new(path);
        if args.categories {
            // List the whole file, not just the viewed range.
            window.load_events(source.read_all()?);
            print_categories(&window);
            return Ok(());
        }
        let summary = refresh(&mut window, &source)?;
        if summary.skipped > 0 {
            eprintln!(
                "vencimientos: skipped {} event(s) with an invalid due date",
                summary.skipped
            );
        }
    } else if args.categories {
        return Err(CalendarError::InvalidArgument(
            "--categories requires an events file (-e)".to_string(),
        ));
    }

    print_window(&ctx, &window);
    Ok(())
}
