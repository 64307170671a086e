use crate::controls::Controls;
use crate::error::Result;
use crate::reports;
use crate::types::{ChartSpec, Dataset};
use clap::ValueEnum;
use serde::Serialize;
use tabled::Tabled;

/// The report panels, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum Panel {
    TripsByCityFleet,
    TopSpenders,
    CompletionVsCancellation,
    VehicleYearRange,
    AverageCostByFleet,
    HourlyFrequency,
    TripCountDistribution,
    TripsByCity,
}

impl Panel {
    pub const ALL: [Panel; 8] = [
        Panel::TripsByCityFleet,
        Panel::TopSpenders,
        Panel::CompletionVsCancellation,
        Panel::VehicleYearRange,
        Panel::AverageCostByFleet,
        Panel::HourlyFrequency,
        Panel::TripCountDistribution,
        Panel::TripsByCity,
    ];

    /// Kebab-case name used on the command line and for output files.
    pub fn slug(self) -> &'static str {
        match self {
            Panel::TripsByCityFleet => "trips-by-city-fleet",
            Panel::TopSpenders => "top-spenders",
            Panel::CompletionVsCancellation => "completion-vs-cancellation",
            Panel::VehicleYearRange => "vehicle-year-range",
            Panel::AverageCostByFleet => "average-cost-by-fleet",
            Panel::HourlyFrequency => "hourly-frequency",
            Panel::TripCountDistribution => "trip-count-distribution",
            Panel::TripsByCity => "trips-by-city",
        }
    }

    /// Toggle label.
    pub fn label(self) -> &'static str {
        match self {
            Panel::TripsByCityFleet => "Total trips and average distance by fleet and city",
            Panel::TopSpenders => "Users with the highest total and average spend",
            Panel::CompletionVsCancellation => "Completed vs canceled trips by city and fleet",
            Panel::VehicleYearRange => "Average vehicle year by fleet",
            Panel::AverageCostByFleet => "Average trip cost by fleet",
            Panel::HourlyFrequency => "Trip frequency by hour of day",
            Panel::TripCountDistribution => "Distribution of trips per user",
            Panel::TripsByCity => "Trips by city and fleet",
        }
    }

    pub fn question(self) -> &'static str {
        match self {
            Panel::TripsByCityFleet => {
                "What is the total number of trips and the average distance per fleet and city?"
            }
            Panel::TopSpenders => {
                "Which five users spent the most in total, and what is their average spend per trip?"
            }
            Panel::CompletionVsCancellation => {
                "How do completed and canceled trips compare for each city and fleet?"
            }
            Panel::VehicleYearRange => "What is the vehicle year range of each fleet?",
            Panel::AverageCostByFleet => {
                "Which fleet has the highest average cost for completed trips?"
            }
            Panel::HourlyFrequency => "At what hours of the day are the most trips completed?",
            Panel::TripCountDistribution => "How are completed trips distributed across users?",
            Panel::TripsByCity => "How many completed trips does each city have?",
        }
    }

    /// Evaluate this panel from scratch.
    pub fn run(self, data: &Dataset, controls: &Controls) -> Result<PanelOutput> {
        let (table, rows_json, chart) = match self {
            Panel::TripsByCityFleet => {
                tabulate(&reports::trips_by_city_fleet(data, controls.min_distance), None)?
            }
            Panel::TopSpenders => {
                let out =
                    reports::top_spenders(data, &controls.spender_city, &controls.spender_fleet);
                tabulate(&out.rows, Some(out.chart))?
            }
            Panel::CompletionVsCancellation => {
                tabulate(&reports::completion_vs_cancellation(data), None)?
            }
            Panel::VehicleYearRange => tabulate(&reports::vehicle_year_range(data), None)?,
            Panel::AverageCostByFleet => tabulate(&reports::average_cost_by_fleet(data), None)?,
            Panel::HourlyFrequency => {
                let out =
                    reports::hourly_frequency(data, &controls.hourly_fleet, controls.hourly_divisor);
                tabulate(&out.rows, Some(out.chart))?
            }
            Panel::TripCountDistribution => {
                let out = reports::trip_count_distribution(data);
                tabulate(&out.rows, Some(out.chart))?
            }
            Panel::TripsByCity => tabulate(&reports::trips_by_city(data, &controls.city_fleet), None)?,
        };
        Ok(PanelOutput {
            panel: self,
            title: self.label(),
            question: self.question(),
            table,
            rows_json,
            chart,
        })
    }
}

/// Display-ready table: headers plus already formatted cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableView {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableView {
    pub fn from_rows<T: Tabled>(rows: &[T]) -> Self {
        TableView {
            headers: T::headers().into_iter().map(|h| h.into_owned()).collect(),
            rows: rows
                .iter()
                .map(|r| r.fields().into_iter().map(|c| c.into_owned()).collect())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

type Tabulated = (TableView, serde_json::Value, Option<ChartSpec>);

fn tabulate<T: Tabled + Serialize>(rows: &[T], chart: Option<ChartSpec>) -> Result<Tabulated> {
    Ok((TableView::from_rows(rows), serde_json::to_value(rows)?, chart))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelOutput {
    pub panel: Panel,
    pub title: &'static str,
    pub question: &'static str,
    pub table: TableView,
    /// Typed rows, numbers unformatted.
    pub rows_json: serde_json::Value,
    pub chart: Option<ChartSpec>,
}

impl Serialize for Panel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.slug())
    }
}

/// Which panels are switched on. Everything starts off.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportRegistry {
    enabled: [bool; Panel::ALL.len()],
}

impl ReportRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_all_enabled() -> Self {
        ReportRegistry {
            enabled: [true; Panel::ALL.len()],
        }
    }

    fn index(panel: Panel) -> usize {
        panel as usize
    }

    pub fn is_enabled(&self, panel: Panel) -> bool {
        self.enabled[Self::index(panel)]
    }

    pub fn set(&mut self, panel: Panel, on: bool) {
        self.enabled[Self::index(panel)] = on;
    }

    pub fn enable(&mut self, panel: Panel) {
        self.set(panel, true);
    }

    pub fn disable(&mut self, panel: Panel) {
        self.set(panel, false);
    }

    /// Flip a panel and return its new state.
    pub fn toggle(&mut self, panel: Panel) -> bool {
        let on = !self.is_enabled(panel);
        self.set(panel, on);
        on
    }

    pub fn enabled(&self) -> impl Iterator<Item = Panel> + '_ {
        Panel::ALL.into_iter().filter(|p| self.is_enabled(*p))
    }

    /// Run every enabled panel in registry order.
    pub fn render(&self, data: &Dataset, controls: &Controls) -> Result<Vec<PanelOutput>> {
        self.enabled().map(|p| p.run(data, controls)).collect()
    }
}
