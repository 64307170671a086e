// Command-line report host.
//
// The binary plays the part of the dashboard: it owns the dataset cache, the
// panel toggles and the control values, and on every "generate" re-runs the
// enabled panels from scratch. `--batch` renders once and exits, which is
// what scripts and CI use; without it an interactive menu is shown.
use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueHint};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use trip_report::output::{preview_panel, write_json, write_panel};
use trip_report::reports::summarize;
use trip_report::util::{format_int, format_number};
use trip_report::{
    Controls, DatasetCache, DistanceThreshold, HourDivisor, Panel, ReportRegistry, Selection,
};

#[derive(Parser, Debug)]
#[command(name = "trip_report", version, about = "Reports over a ride-hailing trip export", long_about = None)]
struct Cli {
    /// Trip CSV export
    #[arg(long, env = "TRIP_REPORT_DATA", default_value = "Datos.csv", value_hint = ValueHint::FilePath)]
    data: PathBuf,

    /// Directory receiving the per-panel CSV/JSON files
    #[arg(long, default_value = ".", value_hint = ValueHint::DirPath)]
    out_dir: PathBuf,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Enable a report panel (repeatable)
    #[arg(long = "panel", value_enum)]
    panels: Vec<Panel>,

    /// Enable every report panel
    #[arg(long, action = ArgAction::SetTrue)]
    all_panels: bool,

    /// Minimum trip distance for the city/fleet breakdown
    #[arg(long, default_value = "0")]
    min_distance: DistanceThreshold,

    /// Keep every trip in the city/fleet breakdown
    #[arg(long, action = ArgAction::SetTrue, conflicts_with = "min_distance")]
    no_distance_filter: bool,

    /// City filter for top spenders (`all` for every city)
    #[arg(long, default_value = "all")]
    spender_city: Selection,

    /// Fleet filter for top spenders (`all` for every fleet)
    #[arg(long, default_value = "all")]
    spender_fleet: Selection,

    /// Fleet filter for the hourly frequency panel
    #[arg(long, default_value = "all")]
    hourly_fleet: Selection,

    /// Divide hourly counts by 24 instead of the number of observed hours
    #[arg(long, action = ArgAction::SetTrue)]
    full_day_hours: bool,

    /// Fleet filter for the per-city trip counts
    #[arg(long, default_value = "all")]
    city_fleet: Selection,

    /// Rows shown per table preview
    #[arg(long, default_value_t = 10)]
    preview_rows: usize,

    /// Render the selected panels once and exit (all panels if none selected)
    #[arg(long, action = ArgAction::SetTrue)]
    batch: bool,
}

struct Host {
    cache: DatasetCache,
    registry: ReportRegistry,
    controls: Controls,
    out_dir: PathBuf,
    preview_rows: usize,
}

impl Host {
    fn from_cli(cli: &Cli) -> Self {
        let mut registry = if cli.all_panels {
            ReportRegistry::with_all_enabled()
        } else {
            ReportRegistry::new()
        };
        for p in &cli.panels {
            registry.enable(*p);
        }
        let controls = Controls {
            min_distance: if cli.no_distance_filter {
                DistanceThreshold::NO_FILTER
            } else {
                cli.min_distance
            },
            spender_city: cli.spender_city.clone(),
            spender_fleet: cli.spender_fleet.clone(),
            hourly_fleet: cli.hourly_fleet.clone(),
            hourly_divisor: if cli.full_day_hours {
                HourDivisor::FullDay
            } else {
                HourDivisor::ObservedHours
            },
            city_fleet: cli.city_fleet.clone(),
        };
        Host {
            cache: DatasetCache::new(&cli.data),
            registry,
            controls,
            out_dir: cli.out_dir.clone(),
            preview_rows: cli.preview_rows,
        }
    }

    fn load(&self) -> Result<()> {
        let data = self
            .cache
            .get()
            .with_context(|| format!("failed to load {}", self.cache.path().display()))?;
        let summary = summarize(&data);
        println!(
            "Dataset ready: {} trips ({} completed) across {} cities and {} fleets.\n",
            format_int(summary.total_trips),
            format_int(summary.completed_trips),
            summary.total_cities,
            summary.total_fleets
        );
        Ok(())
    }

    fn reset_cache(&mut self) {
        if self.cache.clear() {
            println!("Cache reset. The file will be re-read on next use.\n");
        } else {
            println!("Cache was already empty.\n");
        }
    }

    /// One refresh: every enabled panel, previewed and exported.
    fn generate(&self) -> Result<()> {
        let data = self
            .cache
            .get()
            .with_context(|| format!("failed to load {}", self.cache.path().display()))?;
        let outputs = self
            .registry
            .render(&data, &self.controls)
            .context("failed to render report panels")?;
        if outputs.is_empty() {
            println!("No report panels enabled.\n");
            return Ok(());
        }
        std::fs::create_dir_all(&self.out_dir)
            .with_context(|| format!("failed to create {}", self.out_dir.display()))?;

        for output in &outputs {
            preview_panel(output, self.preview_rows);
            match write_panel(&self.out_dir, output) {
                Ok((csv_path, _)) => println!("(Full table exported to {})\n", csv_path.display()),
                Err(e) => {
                    warn!(panel = output.panel.slug(), error = %e, "panel export failed");
                    eprintln!("Write error: {}", e);
                }
            }
        }

        let summary = summarize(&data);
        let summary_path = self.out_dir.join("summary.json");
        if let Err(e) = write_json(&summary_path, &summary) {
            warn!(error = %e, "summary export failed");
            eprintln!("Write error: {}", e);
        }
        println!(
            "Summary ({}): {} trips, {}% completed\n",
            summary_path.display(),
            format_int(summary.total_trips),
            format_number(summary.completion_rate, 2)
        );
        info!(panels = outputs.len(), "reports generated");
        Ok(())
    }
}

/// Print a prompt and read one trimmed line. `None` once stdin is closed.
fn prompt(label: &str) -> Option<String> {
    print!("{label}");
    let _ = io::stdout().flush();
    let mut buf = String::new();
    match io::stdin().lock().read_line(&mut buf) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(buf.trim().to_string()),
    }
}

fn toggle_menu(host: &mut Host) {
    loop {
        println!("Report panels:");
        for (i, p) in Panel::ALL.iter().enumerate() {
            let mark = if host.registry.is_enabled(*p) { "x" } else { " " };
            println!("[{}] [{}] {}", i + 1, mark, p.label());
        }
        let Some(choice) = prompt("Toggle panel number (blank to go back): ") else {
            return;
        };
        if choice.is_empty() {
            println!();
            return;
        }
        match choice.parse::<usize>().ok().and_then(|n| n.checked_sub(1)).and_then(|i| Panel::ALL.get(i)) {
            Some(p) => {
                host.registry.toggle(*p);
            }
            None => println!("Invalid choice. Please enter 1 to {}.", Panel::ALL.len()),
        }
    }
}

/// Choices for a selection prompt, listed only once the dataset is loaded.
/// Opening a prompt never triggers a load.
fn selection_options(cache: &DatasetCache, cities: bool) -> Option<String> {
    if !cache.is_loaded() {
        return None;
    }
    let data = cache.get().ok()?;
    let options = if cities { data.cities() } else { data.fleets() };
    Some(format!("all, {}", options.join(", ")))
}

fn prompt_selection(host: &Host, label: &str, cities: bool) -> Option<Selection> {
    match selection_options(&host.cache, cities) {
        Some(options) => println!("Options: {options}"),
        None => println!("(load the file to list the available options)"),
    }
    let value = prompt(label)?;
    value.parse::<Selection>().ok()
}

fn controls_menu(host: &mut Host) {
    loop {
        let c = &host.controls;
        let threshold = c
            .min_distance
            .value()
            .map_or_else(|| "no filter".to_string(), |v| format_number(v, 2));
        println!("Filters:");
        println!("[1] Minimum distance (city/fleet breakdown): {threshold}");
        println!("[2] Top spenders city: {}", c.spender_city);
        println!("[3] Top spenders fleet: {}", c.spender_fleet);
        println!("[4] Hourly frequency fleet: {}", c.hourly_fleet);
        println!("[5] Hourly divisor: {:?}", c.hourly_divisor);
        println!("[6] City counts fleet: {}", c.city_fleet);
        let Some(choice) = prompt("Filter to change (blank to go back): ") else {
            return;
        };
        match choice.as_str() {
            "" => {
                println!();
                return;
            }
            "1" => {
                let Some(v) = prompt("Minimum distance (>= 0, or 'none'): ") else { return };
                match v.parse::<DistanceThreshold>() {
                    Ok(t) => host.controls.min_distance = t,
                    Err(e) => println!("{e}"),
                }
            }
            "2" => {
                if let Some(s) = prompt_selection(host, "City: ", true) {
                    host.controls.spender_city = s;
                }
            }
            "3" => {
                if let Some(s) = prompt_selection(host, "Fleet: ", false) {
                    host.controls.spender_fleet = s;
                }
            }
            "4" => {
                if let Some(s) = prompt_selection(host, "Fleet: ", false) {
                    host.controls.hourly_fleet = s;
                }
            }
            "5" => {
                host.controls.hourly_divisor = match host.controls.hourly_divisor {
                    HourDivisor::ObservedHours => HourDivisor::FullDay,
                    HourDivisor::FullDay => HourDivisor::ObservedHours,
                };
            }
            "6" => {
                if let Some(s) = prompt_selection(host, "Fleet: ", false) {
                    host.controls.city_fleet = s;
                }
            }
            _ => println!("Invalid choice. Please enter 1 to 6."),
        }
    }
}

fn interactive(mut host: Host) {
    loop {
        println!("Trip Reports");
        println!("[1] Load the file");
        println!("[2] Reset cache");
        println!("[3] Toggle report panels");
        println!("[4] Set filters");
        println!("[5] Generate reports");
        println!("[0] Exit\n");
        let Some(choice) = prompt("Enter choice: ") else {
            break;
        };
        match choice.as_str() {
            "1" => {
                if let Err(e) = host.load() {
                    eprintln!("{e:#}\n");
                }
            }
            "2" => host.reset_cache(),
            "3" => toggle_menu(&mut host),
            "4" => controls_menu(&mut host),
            "5" => {
                println!();
                if let Err(e) = host.generate() {
                    eprintln!("{e:#}\n");
                }
            }
            "0" => break,
            _ => println!("Invalid choice. Please enter 0 to 5.\n"),
        }
    }
    println!("Exiting the program.");
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .init();

    let mut host = Host::from_cli(&cli);
    if cli.batch {
        if host.registry.enabled().next().is_none() {
            host.registry = ReportRegistry::with_all_enabled();
        }
        return host.generate();
    }
    interactive(host);
    Ok(())
}
