//! # Pathline CLI Application
//!
//! Renders plan timelines in the terminal or writes the computed layout as
//! JSON for another front end to draw.
//!
//! ```text
//! timeline_cli layout plan.json --school-year 2024 --collapse 3
//! timeline_cli layout plan.json --json --output layout.json
//! timeline_cli axis --from 2024-09 --to 2025-06
//! ```

mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{ArgAction, Args, Parser, Subcommand};
use flexi_logger::{Logger, LoggerHandle};
use timeline_core::{
    layout_timeline, load_config, load_plan, parse_iso_date, save_layout, ExpansionState, ItemId, LabelMap,
    TimelineConfig, TimelineError, WindowSelector, YearMonth,
};

#[derive(Parser, Debug)]
#[command(name = "timeline_cli", version, about = "Gantt-style timelines for student-support plans")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lay out a plan file against a month window
    Layout(LayoutArgs),
    /// Print the month axis for a window
    Axis(AxisArgs),
}

#[derive(Args, Debug)]
struct WindowArgs {
    /// Calendar year (Jan-Dec)
    #[arg(long, conflicts_with_all = ["school_year", "from", "to"])]
    year: Option<i32>,

    /// School year starting in September of this year
    #[arg(long, conflicts_with_all = ["from", "to"])]
    school_year: Option<i32>,

    /// First month (YYYY-MM)
    #[arg(long, requires = "to")]
    from: Option<YearMonth>,

    /// Last month (YYYY-MM), inclusive
    #[arg(long, requires = "from")]
    to: Option<YearMonth>,
}

impl WindowArgs {
    fn selector(&self) -> Option<WindowSelector> {
        if let Some(year) = self.year {
            return Some(WindowSelector::CalendarYear { year });
        }
        if let Some(start_year) = self.school_year {
            return Some(WindowSelector::SchoolYear { start_year });
        }
        match (self.from, self.to) {
            (Some(start), Some(end)) => Some(WindowSelector::Range { start, end }),
            _ => None,
        }
    }
}

#[derive(Args, Debug)]
struct LayoutArgs {
    /// Plan document (JSON)
    plan: PathBuf,

    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    window: WindowArgs,

    /// Collapse the children of this item (repeatable)
    #[arg(long = "collapse", value_name = "ID")]
    collapse: Vec<u64>,

    /// Draw a marker line at this date (YYYY-MM-DD, or "today")
    #[arg(long)]
    marker: Option<String>,

    /// Print the layout as JSON instead of a chart
    #[arg(long)]
    json: bool,

    /// Write the JSON layout to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Chart width in characters
    #[arg(long, default_value_t = 60)]
    width: usize,
}

#[derive(Args, Debug)]
struct AxisArgs {
    /// Configuration file (TOML), for month labels
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    window: WindowArgs,
}

fn init_logging(verbose: u8) -> Result<LoggerHandle> {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    Logger::try_with_env_or_str(level)
        .context("invalid log specification")?
        .log_to_stderr()
        .start()
        .context("failed to start logger")
}

fn read_config(path: Option<&PathBuf>) -> Result<TimelineConfig> {
    match path {
        Some(path) => Ok(load_config(path)?),
        None => Ok(TimelineConfig::default()),
    }
}

fn run_layout(args: &LayoutArgs) -> Result<()> {
    let config = read_config(args.config.as_ref())?;
    let labels: &LabelMap = &config.labels;

    let plan = load_plan(&args.plan)?;
    let selector = match args.window.selector().or(plan.window) {
        Some(selector) => selector,
        None => bail!("no display window: pass --year, --school-year or --from/--to, or set \"window\" in the plan"),
    };
    let window = selector.resolve(labels)?;

    let roots = plan
        .to_nodes()
        .with_context(|| format!("invalid plan {}", args.plan.display()))?;

    let mut expansion = ExpansionState::new();
    expansion.collapse_all(args.collapse.iter().copied().map(ItemId));

    let marker = match args.marker.as_deref() {
        None => None,
        Some("today") => Some(Local::now().date_naive()),
        Some(value) => Some(parse_iso_date("marker", value)?),
    };

    let layout = layout_timeline(&roots, &expansion, &window, config.min_bar_width, labels, marker)?;
    log::info!("laid out {} rows for '{}'", layout.rows.len(), plan.title);

    if let Some(output) = &args.output {
        save_layout(&layout, output)?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&layout)?);
    } else if args.output.is_none() {
        println!("{}", render::render_chart(&layout, &plan.title, args.width));
    }

    Ok(())
}

fn run_axis(args: &AxisArgs) -> Result<()> {
    let config = read_config(args.config.as_ref())?;
    let Some(selector) = args.window.selector() else {
        bail!("pass --year, --school-year or --from/--to");
    };
    let window = selector.resolve(&config.labels)?;

    for (month, column) in window.months().iter().zip(window.month_columns()) {
        println!(
            "{:04}-{:02}  {:<10} {:>6.2}% .. {:>6.2}%",
            month.year,
            month.month,
            month.display_label(),
            column.left_percent,
            column.right_percent()
        );
    }
    println!("{} months, {} days", window.len(), window.total_days());
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _logger = match init_logging(cli.verbose) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Warning: logging disabled: {:#}", e);
            None
        }
    };

    let result = match &cli.command {
        Command::Layout(args) => run_layout(args),
        Command::Axis(args) => run_axis(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if let Some(timeline_error) = e.downcast_ref::<TimelineError>() {
                if let Ok(json) = serde_json::to_string_pretty(timeline_error) {
                    eprintln!();
                    eprintln!("Error JSON:");
                    eprintln!("{}", json);
                }
            }
            ExitCode::FAILURE
        }
    }
}
