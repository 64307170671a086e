use crate::error::{Result, TripError};
use crate::registry::{PanelOutput, TableView};
use crate::types::{ChartKind, ChartSpec};
use crate::util::format_number;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tabled::{builder::Builder, settings::Style};
use tracing::debug;

const BAR_WIDTH: usize = 40;

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> TripError + '_ {
    move |source| TripError::Io {
        path: path.to_path_buf(),
        source,
    }
}

pub fn write_csv(path: &Path, table: &TableView) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(&table.headers)?;
    for row in &table.rows {
        wtr.write_record(row)?;
    }
    wtr.flush().map_err(io_err(path))?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s).map_err(io_err(path))?;
    Ok(())
}

/// Write `<slug>.csv` and `<slug>.json` for one panel; returns both paths.
pub fn write_panel(out_dir: &Path, output: &PanelOutput) -> Result<(PathBuf, PathBuf)> {
    let slug = output.panel.slug();
    let csv_path = out_dir.join(format!("{slug}.csv"));
    let json_path = out_dir.join(format!("{slug}.json"));
    write_csv(&csv_path, &output.table)?;
    write_json(
        &json_path,
        &serde_json::json!({
            "panel": slug,
            "title": output.title,
            "rows": output.rows_json,
            "chart": output.chart,
        }),
    )?;
    debug!(csv = %csv_path.display(), json = %json_path.display(), "panel written");
    Ok((csv_path, json_path))
}

/// Markdown rendering of the first `max_rows` rows.
pub fn markdown_table(table: &TableView, max_rows: usize) -> String {
    if table.is_empty() {
        return "(no rows)".to_string();
    }
    let mut records = vec![table.headers.clone()];
    records.extend(table.rows.iter().take(max_rows).cloned());
    Builder::from(records).build().with(Style::markdown()).to_string()
}

/// Plain-text bar chart, one line per category and series.
pub fn text_chart(chart: &ChartSpec) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", chart.title);
    let axis = match chart.kind {
        ChartKind::Bar => format!("{} by {}", chart.y_label, chart.x_label),
        ChartKind::HorizontalBar => format!("{} by {}", chart.x_label, chart.y_label),
    };
    let _ = writeln!(out, "({axis})");
    if chart.categories.is_empty() {
        out.push_str("(no data)\n");
        return out;
    }

    let max = chart
        .series
        .iter()
        .flat_map(|s| s.values.iter().copied())
        .fold(0.0_f64, f64::max);
    let label_width = chart.categories.iter().map(|c| c.chars().count()).max().unwrap_or(0);

    let mut order: Vec<usize> = (0..chart.categories.len()).collect();
    // Horizontal charts list the first category at the top unless inverted.
    if chart.kind == ChartKind::HorizontalBar && !chart.invert_y {
        order.reverse();
    }
    for i in order {
        for (s_idx, series) in chart.series.iter().enumerate() {
            let value = series.values.get(i).copied().unwrap_or(0.0);
            let len = if max > 0.0 {
                ((value / max) * BAR_WIDTH as f64).round() as usize
            } else {
                0
            };
            let label = if s_idx == 0 { chart.categories[i].as_str() } else { "" };
            let mark = if s_idx == 0 { '#' } else { '=' };
            let _ = writeln!(
                out,
                "{label:>label_width$} | {} {}",
                mark.to_string().repeat(len),
                format_number(value, 2)
            );
        }
    }
    if chart.series.len() > 1 {
        let legend: Vec<String> = chart
            .series
            .iter()
            .enumerate()
            .map(|(i, s)| format!("{} {}", if i == 0 { '#' } else { '=' }, s.name))
            .collect();
        let _ = writeln!(out, "legend: {}", legend.join(", "));
    }
    out
}

pub fn preview_panel(output: &PanelOutput, max_rows: usize) {
    println!("\n{}", output.title);
    println!("{}\n", output.question);
    println!("{}\n", markdown_table(&output.table, max_rows));
    if output.table.len() > max_rows {
        println!("({} more rows in the exported file)\n", output.table.len() - max_rows);
    }
    if let Some(chart) = &output.chart {
        println!("{}", text_chart(chart));
    }
}
