use crate::util::{format_number, local_hour};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};
use tabled::Tabled;

/// Headers the source file must carry, in the order they are reported when
/// missing.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "city",
    "fleet",
    "Distancia",
    "trip_cost",
    "Año del vehiculo",
    "completed",
    "user_id",
    "date",
];

#[derive(Debug, Deserialize)]
pub struct RawRow {
    #[serde(rename = "city")]
    pub city: Option<String>,
    #[serde(rename = "fleet")]
    pub fleet: Option<String>,
    #[serde(rename = "Distancia")]
    pub distance: Option<String>,
    #[serde(rename = "trip_cost")]
    pub trip_cost: Option<String>,
    #[serde(rename = "Año del vehiculo")]
    pub vehicle_year: Option<String>,
    #[serde(rename = "completed")]
    pub completed: Option<String>,
    #[serde(rename = "user_id")]
    pub user_id: Option<String>,
    #[serde(rename = "date")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    pub city: String,
    pub fleet: String,
    pub distance: f64,
    pub trip_cost: f64,
    pub vehicle_year: i32,
    pub completed: bool,
    pub user_id: String,
    /// Stored four hours ahead of local time; see [`TripRecord::local_hour`].
    pub timestamp: NaiveDateTime,
}

impl TripRecord {
    pub fn canceled(&self) -> bool {
        !self.completed
    }

    pub fn local_hour(&self) -> u32 {
        local_hour(self.timestamp)
    }
}

/// The loaded trip table. Read-only once built: panels borrow the records and
/// derive whatever extra columns they need on the fly.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<TripRecord>,
    source: PathBuf,
}

impl Dataset {
    pub fn new(records: Vec<TripRecord>, source: impl Into<PathBuf>) -> Self {
        Dataset {
            records,
            source: source.into(),
        }
    }

    pub fn from_records(records: Vec<TripRecord>) -> Self {
        Dataset::new(records, PathBuf::new())
    }

    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct cities in first-appearance order.
    pub fn cities(&self) -> Vec<&str> {
        distinct(self.records.iter().map(|r| r.city.as_str()))
    }

    /// Distinct fleets in first-appearance order.
    pub fn fleets(&self) -> Vec<&str> {
        distinct(self.records.iter().map(|r| r.fleet.as_str()))
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = std::collections::HashSet::new();
    values.filter(|v| seen.insert(*v)).collect()
}

fn display_2dp(v: &f64) -> String {
    format_number(*v, 2)
}

/// Fleet column of the city/fleet breakdown. `AllFleets` is the per-city
/// roll-up and orders after every real fleet.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FleetGroup {
    Fleet(String),
    AllFleets,
}

impl fmt::Display for FleetGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FleetGroup::Fleet(name) => f.write_str(name),
            FleetGroup::AllFleets => f.write_str("All fleets"),
        }
    }
}

impl Serialize for FleetGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Half-open bucket `[start, end)` of per-user trip counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TripInterval {
    pub start: usize,
    pub end: usize,
}

impl TripInterval {
    pub fn contains(&self, n: usize) -> bool {
        self.start <= n && n < self.end
    }
}

impl fmt::Display for TripInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

impl Serialize for TripInterval {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct CityFleetRow {
    #[serde(rename = "City")]
    #[tabled(rename = "City")]
    pub city: String,
    #[serde(rename = "Fleet")]
    #[tabled(rename = "Fleet")]
    pub fleet: FleetGroup,
    #[serde(rename = "TotalTrips")]
    #[tabled(rename = "TotalTrips")]
    pub total_trips: usize,
    #[serde(rename = "AvgDistance")]
    #[tabled(rename = "AvgDistance", display_with = "display_2dp")]
    pub distance_average: f64,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct SpenderRow {
    #[serde(rename = "UserId")]
    #[tabled(rename = "UserId")]
    pub user_id: String,
    #[serde(rename = "TotalSpent")]
    #[tabled(rename = "TotalSpent", display_with = "display_2dp")]
    pub total_spent: f64,
    #[serde(rename = "AvgSpentPerTrip")]
    #[tabled(rename = "AvgSpentPerTrip", display_with = "display_2dp")]
    pub average_spent: f64,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct CompletionRow {
    #[serde(rename = "City")]
    #[tabled(rename = "City")]
    pub city: String,
    #[serde(rename = "Fleet")]
    #[tabled(rename = "Fleet")]
    pub fleet: String,
    #[serde(rename = "Completed")]
    #[tabled(rename = "Completed")]
    pub completed_count: usize,
    #[serde(rename = "Canceled")]
    #[tabled(rename = "Canceled")]
    pub canceled_count: usize,
    #[serde(rename = "CompletedPct")]
    #[tabled(rename = "CompletedPct", display_with = "display_2dp")]
    pub completed_percentage: f64,
    #[serde(rename = "CanceledPct")]
    #[tabled(rename = "CanceledPct", display_with = "display_2dp")]
    pub canceled_percentage: f64,
}

impl CompletionRow {
    pub fn total_trips(&self) -> usize {
        self.completed_count + self.canceled_count
    }
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct VehicleYearRow {
    #[serde(rename = "Fleet")]
    #[tabled(rename = "Fleet")]
    pub fleet: String,
    #[serde(rename = "OldestYear")]
    #[tabled(rename = "OldestYear")]
    pub oldest_year: i32,
    #[serde(rename = "NewestYear")]
    #[tabled(rename = "NewestYear")]
    pub newest_year: i32,
    #[serde(rename = "AvgVehicleYear")]
    #[tabled(rename = "AvgVehicleYear")]
    pub average_year: i32,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct FleetCostRow {
    #[serde(rename = "Fleet")]
    #[tabled(rename = "Fleet")]
    pub fleet: String,
    #[serde(rename = "AvgTripCost")]
    #[tabled(rename = "AvgTripCost", display_with = "display_2dp")]
    pub average_cost: f64,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct HourlyRow {
    #[serde(rename = "Hour")]
    #[tabled(rename = "Hour")]
    pub hour: u32,
    #[serde(rename = "AvgCompletedTrips")]
    #[tabled(rename = "AvgCompletedTrips")]
    pub average_completed: i64,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct DistributionRow {
    #[serde(rename = "TripInterval")]
    #[tabled(rename = "TripInterval")]
    pub interval: TripInterval,
    #[serde(rename = "Users")]
    #[tabled(rename = "Users")]
    pub users: usize,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct CityCountRow {
    #[serde(rename = "City")]
    #[tabled(rename = "City")]
    pub city: String,
    #[serde(rename = "Trips")]
    #[tabled(rename = "Trips")]
    pub trips: usize,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DatasetSummary {
    pub total_trips: usize,
    pub completed_trips: usize,
    pub canceled_trips: usize,
    pub total_cities: usize,
    pub total_fleets: usize,
    pub total_users: usize,
    pub completion_rate: f64,
    pub first_trip: Option<NaiveDateTime>,
    pub last_trip: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    HorizontalBar,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartSeries {
    pub name: String,
    pub values: Vec<f64>,
}

/// Everything a host needs to draw a bar chart. `categories[i]` labels the
/// `i`-th value of every series.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub categories: Vec<String>,
    pub series: Vec<ChartSeries>,
    /// First category drawn at the top (horizontal charts).
    pub invert_y: bool,
    /// Category label rotation in degrees.
    pub label_rotation: u16,
    pub y_grid: bool,
}

impl ChartSpec {
    pub fn bar(title: impl Into<String>, x_label: &str, y_label: &str) -> Self {
        ChartSpec {
            kind: ChartKind::Bar,
            title: title.into(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            categories: Vec::new(),
            series: Vec::new(),
            invert_y: false,
            label_rotation: 0,
            y_grid: false,
        }
    }

    pub fn horizontal_bar(title: impl Into<String>, x_label: &str, y_label: &str) -> Self {
        ChartSpec {
            kind: ChartKind::HorizontalBar,
            ..ChartSpec::bar(title, x_label, y_label)
        }
    }

    pub fn with_series(mut self, name: &str, values: Vec<f64>) -> Self {
        self.series.push(ChartSeries {
            name: name.to_string(),
            values,
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_fleets_sorts_after_real_fleets() {
        let mut v = vec![
            FleetGroup::AllFleets,
            FleetGroup::Fleet("Zeta".into()),
            FleetGroup::Fleet("Alpha".into()),
        ];
        v.sort();
        assert_eq!(v.last(), Some(&FleetGroup::AllFleets));
        assert_eq!(v[0].to_string(), "Alpha");
    }

    #[test]
    fn interval_is_half_open() {
        let i = TripInterval { start: 2, end: 4 };
        assert!(i.contains(2));
        assert!(i.contains(3));
        assert!(!i.contains(4));
        assert_eq!(i.to_string(), "[2, 4)");
    }

    #[test]
    fn option_lists_keep_first_appearance_order() {
        let ts = chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap();
        let rec = |city: &str, fleet: &str| TripRecord {
            city: city.into(),
            fleet: fleet.into(),
            distance: 1.0,
            trip_cost: 1.0,
            vehicle_year: 2020,
            completed: true,
            user_id: "u".into(),
            timestamp: ts,
        };
        let ds = Dataset::from_records(vec![rec("Valencia", "Plus"), rec("Caracas", "Go"), rec("Valencia", "Go")]);
        assert_eq!(ds.cities(), vec!["Valencia", "Caracas"]);
        assert_eq!(ds.fleets(), vec!["Plus", "Go"]);
    }
}
