// The eight report panels plus the dataset summary.
//
// Every function here is pure: it borrows the dataset, reads its control
// values and returns fresh rows. Grouping goes through `BTreeMap` so groups
// come out in key order before any explicit sort.
use crate::controls::{DistanceThreshold, HourDivisor, Selection};
use crate::types::{
    ChartSpec, CityCountRow, CityFleetRow, CompletionRow, Dataset, DatasetSummary,
    DistributionRow, FleetCostRow, FleetGroup, HourlyRow, SpenderRow, TripInterval, TripRecord,
    VehicleYearRow,
};
use crate::util::{average, round_half_even};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

pub const TOP_SPENDERS: usize = 5;
pub const INTERVAL_WIDTH: usize = 2;
pub const HOURS_PER_DAY: u32 = 24;

#[derive(Debug, Clone, PartialEq)]
pub struct TopSpenders {
    pub rows: Vec<SpenderRow>,
    pub chart: ChartSpec,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourlyFrequency {
    pub rows: Vec<HourlyRow>,
    pub chart: ChartSpec,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TripDistribution {
    pub rows: Vec<DistributionRow>,
    pub chart: ChartSpec,
}

fn desc_f64(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

fn completed(data: &Dataset) -> impl Iterator<Item = &TripRecord> {
    data.records().iter().filter(|r| r.completed)
}

/// Trip count and mean distance per (city, fleet), plus an `AllFleets` row
/// per city carrying the summed count and the mean of that city's fleet means.
pub fn trips_by_city_fleet(data: &Dataset, min_distance: DistanceThreshold) -> Vec<CityFleetRow> {
    let mut groups: BTreeMap<(&str, &str), Vec<f64>> = BTreeMap::new();
    for r in data.records().iter().filter(|r| min_distance.admits(r.distance)) {
        groups
            .entry((r.city.as_str(), r.fleet.as_str()))
            .or_default()
            .push(r.distance);
    }

    let mut rows: Vec<CityFleetRow> = groups
        .into_iter()
        .map(|((city, fleet), distances)| CityFleetRow {
            city: city.to_string(),
            fleet: FleetGroup::Fleet(fleet.to_string()),
            total_trips: distances.len(),
            distance_average: average(&distances),
        })
        .collect();

    #[derive(Default)]
    struct CityAcc {
        trips: usize,
        means: Vec<f64>,
    }
    let mut by_city: BTreeMap<String, CityAcc> = BTreeMap::new();
    for row in &rows {
        let acc = by_city.entry(row.city.clone()).or_default();
        acc.trips += row.total_trips;
        acc.means.push(row.distance_average);
    }
    rows.extend(by_city.into_iter().map(|(city, acc)| CityFleetRow {
        city,
        fleet: FleetGroup::AllFleets,
        total_trips: acc.trips,
        distance_average: average(&acc.means),
    }));

    rows.sort_by(|a, b| a.city.cmp(&b.city).then_with(|| a.fleet.cmp(&b.fleet)));
    debug!(threshold = ?min_distance.value(), rows = rows.len(), "trips by city/fleet");
    rows
}

/// The five users with the highest total spend under the given filters.
pub fn top_spenders(data: &Dataset, city: &Selection, fleet: &Selection) -> TopSpenders {
    let mut by_user: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for r in data
        .records()
        .iter()
        .filter(|r| city.matches(&r.city) && fleet.matches(&r.fleet))
    {
        by_user.entry(r.user_id.as_str()).or_default().push(r.trip_cost);
    }

    let mut rows: Vec<SpenderRow> = by_user
        .into_iter()
        .map(|(user, costs)| SpenderRow {
            user_id: user.to_string(),
            total_spent: costs.iter().sum(),
            average_spent: average(&costs),
        })
        .collect();
    // Stable sort keeps ties in user-id order.
    rows.sort_by(|a, b| desc_f64(a.total_spent, b.total_spent));
    rows.truncate(TOP_SPENDERS);

    let mut chart = ChartSpec::horizontal_bar(
        "Users with the highest total and average spend per trip",
        "Spend ($)",
        "Users",
    )
    .with_series("Total spent", rows.iter().map(|r| r.total_spent).collect())
    .with_series(
        "Average spent per trip",
        rows.iter().map(|r| r.average_spent).collect(),
    );
    chart.categories = rows.iter().map(|r| r.user_id.clone()).collect();
    chart.invert_y = true;

    debug!(%city, %fleet, rows = rows.len(), "top spenders");
    TopSpenders { rows, chart }
}

/// Completed vs canceled trips per (city, fleet), with each share of the
/// group total rounded to two decimals.
pub fn completion_vs_cancellation(data: &Dataset) -> Vec<CompletionRow> {
    let mut groups: BTreeMap<(&str, &str), (usize, usize)> = BTreeMap::new();
    for r in data.records() {
        let e = groups.entry((r.city.as_str(), r.fleet.as_str())).or_default();
        if r.completed {
            e.0 += 1;
        }
        if r.canceled() {
            e.1 += 1;
        }
    }

    let rows: Vec<CompletionRow> = groups
        .into_iter()
        .map(|((city, fleet), (done, canceled))| {
            let total = (done + canceled) as f64;
            CompletionRow {
                city: city.to_string(),
                fleet: fleet.to_string(),
                completed_count: done,
                canceled_count: canceled,
                completed_percentage: round_half_even(done as f64 / total * 100.0, 2),
                canceled_percentage: round_half_even(canceled as f64 / total * 100.0, 2),
            }
        })
        .collect();
    debug!(rows = rows.len(), "completion vs cancellation");
    rows
}

/// Oldest and newest vehicle year per fleet and the rounded midpoint.
pub fn vehicle_year_range(data: &Dataset) -> Vec<VehicleYearRow> {
    let mut by_fleet: BTreeMap<&str, (i32, i32)> = BTreeMap::new();
    for r in data.records() {
        by_fleet
            .entry(r.fleet.as_str())
            .and_modify(|(lo, hi)| {
                *lo = (*lo).min(r.vehicle_year);
                *hi = (*hi).max(r.vehicle_year);
            })
            .or_insert((r.vehicle_year, r.vehicle_year));
    }
    by_fleet
        .into_iter()
        .map(|(fleet, (lo, hi))| VehicleYearRow {
            fleet: fleet.to_string(),
            oldest_year: lo,
            newest_year: hi,
            average_year: round_half_even((lo as f64 + hi as f64) / 2.0, 0) as i32,
        })
        .collect()
}

/// Mean cost of completed trips per fleet, most expensive first.
pub fn average_cost_by_fleet(data: &Dataset) -> Vec<FleetCostRow> {
    let mut by_fleet: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for r in completed(data) {
        by_fleet.entry(r.fleet.as_str()).or_default().push(r.trip_cost);
    }
    let mut rows: Vec<FleetCostRow> = by_fleet
        .into_iter()
        .map(|(fleet, costs)| FleetCostRow {
            fleet: fleet.to_string(),
            average_cost: average(&costs),
        })
        .collect();
    rows.sort_by(|a, b| desc_f64(a.average_cost, b.average_cost));
    rows
}

/// Average completed trips per local hour of day.
///
/// Completed trips are counted per hour and divided by the number of hours
/// picked by `divisor`; with [`HourDivisor::ObservedHours`] that is the count
/// of distinct hours among all filtered trips, canceled ones included.
pub fn hourly_frequency(data: &Dataset, fleet: &Selection, divisor: HourDivisor) -> HourlyFrequency {
    let filtered: Vec<&TripRecord> = data
        .records()
        .iter()
        .filter(|r| fleet.matches(&r.fleet))
        .collect();

    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for r in filtered.iter().filter(|r| r.completed) {
        *counts.entry(r.local_hour()).or_default() += 1;
    }
    let hours = match divisor {
        HourDivisor::ObservedHours => filtered
            .iter()
            .map(|r| r.local_hour())
            .collect::<HashSet<_>>()
            .len(),
        HourDivisor::FullDay => HOURS_PER_DAY as usize,
    };

    let rows: Vec<HourlyRow> = counts
        .into_iter()
        .map(|(hour, n)| HourlyRow {
            hour,
            // Non-empty `counts` implies `hours >= 1`.
            average_completed: round_half_even(n as f64 / hours as f64, 0) as i64,
        })
        .collect();

    let mut values = vec![0.0; HOURS_PER_DAY as usize];
    for row in &rows {
        values[row.hour as usize] = row.average_completed as f64;
    }
    let mut chart = ChartSpec::bar(
        format!("Average completed trips per hour - {fleet}"),
        "Hour of day",
        "Average completed trips",
    )
    .with_series("Average completed trips", values);
    chart.categories = (0..HOURS_PER_DAY).map(|h| h.to_string()).collect();
    chart.y_grid = true;

    debug!(%fleet, ?divisor, hours, rows = rows.len(), "hourly frequency");
    HourlyFrequency { rows, chart }
}

/// Buckets of width two covering every per-user completed-trip count.
pub fn trip_intervals(max_count: usize) -> Vec<TripInterval> {
    (0..=max_count / INTERVAL_WIDTH)
        .map(|k| TripInterval {
            start: k * INTERVAL_WIDTH,
            end: (k + 1) * INTERVAL_WIDTH,
        })
        .collect()
}

/// How many users fall in each completed-trip-count interval, busiest
/// interval first.
pub fn trip_count_distribution(data: &Dataset) -> TripDistribution {
    let mut per_user: BTreeMap<&str, usize> = BTreeMap::new();
    for r in completed(data) {
        *per_user.entry(r.user_id.as_str()).or_default() += 1;
    }

    let mut rows: Vec<DistributionRow> = match per_user.values().max() {
        Some(&max) => trip_intervals(max)
            .into_iter()
            .map(|interval| DistributionRow {
                interval,
                users: per_user.values().filter(|n| interval.contains(**n)).count(),
            })
            .collect(),
        None => Vec::new(),
    };
    rows.sort_by(|a, b| b.users.cmp(&a.users));

    let mut chart = ChartSpec::bar(
        "Distribution of trips per user",
        "Trip interval",
        "Users",
    )
    .with_series("Users", rows.iter().map(|r| r.users as f64).collect());
    chart.categories = rows.iter().map(|r| r.interval.to_string()).collect();
    chart.label_rotation = 45;
    chart.y_grid = true;

    debug!(users = per_user.len(), intervals = rows.len(), "trip count distribution");
    TripDistribution { rows, chart }
}

/// Completed trips per city, busiest first.
pub fn trips_by_city(data: &Dataset, fleet: &Selection) -> Vec<CityCountRow> {
    let mut by_city: BTreeMap<&str, usize> = BTreeMap::new();
    for r in completed(data).filter(|r| fleet.matches(&r.fleet)) {
        *by_city.entry(r.city.as_str()).or_default() += 1;
    }
    let mut rows: Vec<CityCountRow> = by_city
        .into_iter()
        .map(|(city, trips)| CityCountRow {
            city: city.to_string(),
            trips,
        })
        .collect();
    rows.sort_by(|a, b| b.trips.cmp(&a.trips));
    rows
}

pub fn summarize(data: &Dataset) -> DatasetSummary {
    let records = data.records();
    let completed_trips = records.iter().filter(|r| r.completed).count();
    let users: HashSet<&str> = records.iter().map(|r| r.user_id.as_str()).collect();
    let completion_rate = if records.is_empty() {
        0.0
    } else {
        round_half_even(completed_trips as f64 / records.len() as f64 * 100.0, 2)
    };
    DatasetSummary {
        total_trips: records.len(),
        completed_trips,
        canceled_trips: records.len() - completed_trips,
        total_cities: data.cities().len(),
        total_fleets: data.fleets().len(),
        total_users: users.len(),
        completion_rate,
        first_trip: records.iter().map(|r| r.timestamp).min(),
        last_trip: records.iter().map(|r| r.timestamp).max(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_opt(hour, 0, 0))
            .unwrap()
    }

    fn trip(city: &str, fleet: &str, distance: f64) -> TripRecord {
        TripRecord {
            city: city.into(),
            fleet: fleet.into(),
            distance,
            trip_cost: 10.0,
            vehicle_year: 2020,
            completed: true,
            user_id: "u".into(),
            timestamp: at(12),
        }
    }

    fn spend(user: &str, city: &str, fleet: &str, cost: f64) -> TripRecord {
        TripRecord {
            user_id: user.into(),
            trip_cost: cost,
            ..trip(city, fleet, 1.0)
        }
    }

    fn ds(records: Vec<TripRecord>) -> Dataset {
        Dataset::from_records(records)
    }

    #[test]
    fn city_fleet_threshold_example() {
        let data = ds(vec![
            trip("Caracas", "X", 1.0),
            trip("Caracas", "X", 2.0),
            trip("Caracas", "X", 3.0),
            trip("Caracas", "X", 10.0),
        ]);
        let rows = trips_by_city_fleet(&data, DistanceThreshold::at_least(2.0).unwrap());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].fleet, FleetGroup::Fleet("X".into()));
        assert_eq!(rows[0].total_trips, 3);
        assert_eq!(rows[0].distance_average, 5.0);
        assert_eq!(rows[1].fleet, FleetGroup::AllFleets);
        assert_eq!(rows[1].total_trips, 3);
    }

    #[test]
    fn city_totals_sum_fleets_and_sort_last() {
        let data = ds(vec![
            trip("Valencia", "Plus", 4.0),
            trip("Caracas", "Zoom", 2.0),
            trip("Caracas", "Go", 1.0),
            trip("Caracas", "Go", 3.0),
            trip("Caracas", "Zoom", 0.5),
        ]);
        let rows = trips_by_city_fleet(&data, DistanceThreshold::NO_FILTER);
        let labels: Vec<(String, String)> = rows
            .iter()
            .map(|r| (r.city.clone(), r.fleet.to_string()))
            .collect();
        assert_eq!(
            labels,
            vec![
                ("Caracas".to_string(), "Go".to_string()),
                ("Caracas".to_string(), "Zoom".to_string()),
                ("Caracas".to_string(), "All fleets".to_string()),
                ("Valencia".to_string(), "Plus".to_string()),
                ("Valencia".to_string(), "All fleets".to_string()),
            ]
        );
        // Go mean 2.0, Zoom mean 1.25 -> mean of means 1.625.
        assert_eq!(rows[2].total_trips, 4);
        assert_eq!(rows[2].distance_average, 1.625);
    }

    #[test]
    fn city_fleet_threshold_above_everything_is_empty() {
        let data = ds(vec![trip("Caracas", "X", 1.0)]);
        assert!(trips_by_city_fleet(&data, DistanceThreshold::at_least(50.0).unwrap()).is_empty());
    }

    #[test]
    fn spender_totals_example() {
        let data = ds(vec![
            spend("U", "Caracas", "Go", 10.0),
            spend("U", "Caracas", "Go", 20.0),
            spend("U", "Caracas", "Go", 30.0),
            spend("U", "Caracas", "Go", 40.0),
        ]);
        let out = top_spenders(&data, &Selection::All, &Selection::All);
        assert_eq!(out.rows.len(), 1);
        assert_eq!(out.rows[0].total_spent, 100.0);
        assert_eq!(out.rows[0].average_spent, 25.0);
    }

    #[test]
    fn top_spenders_limited_sorted_and_filtered() {
        let mut records = Vec::new();
        for (i, cost) in [5.0, 70.0, 20.0, 90.0, 10.0, 60.0, 30.0].iter().enumerate() {
            records.push(spend(&format!("u{i}"), "Caracas", "Go", *cost));
        }
        records.push(spend("rich", "Valencia", "Go", 1000.0));
        records.push(spend("plus", "Caracas", "Plus", 500.0));
        let data = ds(records);

        let out = top_spenders(&data, &Selection::only("Caracas"), &Selection::only("Go"));
        assert_eq!(out.rows.len(), TOP_SPENDERS);
        let totals: Vec<f64> = out.rows.iter().map(|r| r.total_spent).collect();
        assert_eq!(totals, vec![90.0, 70.0, 60.0, 30.0, 20.0]);
        assert_eq!(out.chart.categories, vec!["u3", "u1", "u5", "u6", "u2"]);
        assert!(out.chart.invert_y);
        assert_eq!(out.chart.series.len(), 2);

        let all = top_spenders(&data, &Selection::All, &Selection::All);
        assert_eq!(all.rows[0].user_id, "rich");
        assert_eq!(all.rows[1].user_id, "plus");

        let none = top_spenders(&data, &Selection::only("Maracay"), &Selection::All);
        assert!(none.rows.is_empty());
    }

    #[test]
    fn completion_percentages_sum_to_hundred() {
        let mut records = vec![trip("Caracas", "Go", 1.0); 2];
        records.push(TripRecord {
            completed: false,
            ..trip("Caracas", "Go", 1.0)
        });
        records.push(trip("Valencia", "Go", 1.0));
        let rows = completion_vs_cancellation(&ds(records));
        assert_eq!(rows.len(), 2);
        let caracas = &rows[0];
        assert_eq!((caracas.completed_count, caracas.canceled_count), (2, 1));
        assert_eq!(caracas.total_trips(), 3);
        assert_eq!(caracas.completed_percentage, 66.67);
        assert_eq!(caracas.canceled_percentage, 33.33);
        for r in &rows {
            assert!((r.completed_percentage + r.canceled_percentage - 100.0).abs() <= 0.011);
        }
        assert_eq!(rows[1].canceled_percentage, 0.0);
    }

    #[test]
    fn vehicle_year_midpoint_rounds_half_to_even() {
        let year = |fleet: &str, y: i32| TripRecord {
            vehicle_year: y,
            ..trip("Caracas", fleet, 1.0)
        };
        let rows = vehicle_year_range(&ds(vec![
            year("Go", 2015),
            year("Go", 2020),
            year("Plus", 2018),
            year("Plus", 2021),
            year("Go", 2017),
        ]));
        assert_eq!(
            rows[0],
            VehicleYearRow {
                fleet: "Go".into(),
                oldest_year: 2015,
                newest_year: 2020,
                average_year: 2018,
            }
        );
        // 2019.5 -> 2020
        assert_eq!(rows[1].average_year, 2020);
    }

    #[test]
    fn average_cost_ignores_canceled_and_sorts_desc() {
        let rows = average_cost_by_fleet(&ds(vec![
            spend("a", "Caracas", "Go", 10.0),
            spend("b", "Caracas", "Go", 20.0),
            spend("c", "Caracas", "Plus", 30.0),
            TripRecord {
                completed: false,
                ..spend("d", "Caracas", "Go", 1000.0)
            },
        ]));
        assert_eq!(rows[0].fleet, "Plus");
        assert_eq!(rows[0].average_cost, 30.0);
        assert_eq!(rows[1].average_cost, 15.0);
    }

    fn hourly(fleet: &str, utc_hour: u32, completed: bool) -> TripRecord {
        TripRecord {
            timestamp: at(utc_hour),
            completed,
            ..trip("Caracas", fleet, 1.0)
        }
    }

    #[test]
    fn hourly_average_uses_observed_hours() {
        // Local hours: 6, 6, 6, 7 (canceled), 22.
        let data = ds(vec![
            hourly("Go", 10, true),
            hourly("Go", 10, true),
            hourly("Go", 10, true),
            hourly("Go", 11, false),
            hourly("Plus", 2, true),
        ]);
        let out = hourly_frequency(&data, &Selection::All, HourDivisor::ObservedHours);
        // Three distinct hours observed: 3/3 = 1 at hour 6, 1/3 rounds to 0 at 22.
        assert_eq!(
            out.rows,
            vec![
                HourlyRow { hour: 6, average_completed: 1 },
                HourlyRow { hour: 22, average_completed: 0 },
            ]
        );
        assert_eq!(out.chart.categories.len(), 24);
        assert_eq!(out.chart.series[0].values[6], 1.0);
        assert_eq!(out.chart.series[0].values[7], 0.0);

        let go = hourly_frequency(&data, &Selection::only("Go"), HourDivisor::ObservedHours);
        // Hours 6 and 7 observed: 3/2 = 1.5 -> 2.
        assert_eq!(go.rows, vec![HourlyRow { hour: 6, average_completed: 2 }]);
        assert!(go.chart.title.ends_with("Go"));

        let full = hourly_frequency(&data, &Selection::only("Go"), HourDivisor::FullDay);
        assert_eq!(full.rows, vec![HourlyRow { hour: 6, average_completed: 0 }]);
    }

    #[test]
    fn hourly_rows_stay_within_a_day() {
        let data = ds((0..48).map(|h| hourly("Go", h % 24, true)).collect());
        let out = hourly_frequency(&data, &Selection::All, HourDivisor::ObservedHours);
        assert_eq!(out.rows.len(), 24);
        assert!(out.rows.iter().all(|r| r.hour < 24));
        assert!(out.rows.iter().all(|r| r.average_completed == 0));
    }

    #[test]
    fn intervals_cover_the_maximum() {
        assert_eq!(trip_intervals(0), vec![TripInterval { start: 0, end: 2 }]);
        let v = trip_intervals(4);
        assert_eq!(v.last(), Some(&TripInterval { start: 4, end: 6 }));
        for pair in v.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        assert_eq!(trip_intervals(5).len(), 3);
    }

    #[test]
    fn distribution_counts_users_per_interval() {
        let mut records = Vec::new();
        let mut add = |user: &str, n: usize, completed: bool| {
            for _ in 0..n {
                records.push(TripRecord {
                    user_id: user.into(),
                    completed,
                    ..trip("Caracas", "Go", 1.0)
                });
            }
        };
        add("a", 1, true);
        add("b", 1, true);
        add("c", 3, true);
        add("d", 4, true);
        add("e", 9, false);
        let out = trip_count_distribution(&ds(records));
        let got: Vec<(String, usize)> = out
            .rows
            .iter()
            .map(|r| (r.interval.to_string(), r.users))
            .collect();
        assert_eq!(
            got,
            vec![
                ("[0, 2)".to_string(), 2),
                ("[2, 4)".to_string(), 1),
                ("[4, 6)".to_string(), 1),
            ]
        );
        let users: usize = out.rows.iter().map(|r| r.users).sum();
        assert_eq!(users, 4);
        assert_eq!(out.chart.label_rotation, 45);
    }

    #[test]
    fn distribution_keeps_empty_intervals() {
        let records = (0..6)
            .map(|_| TripRecord {
                user_id: "busy".into(),
                ..trip("Caracas", "Go", 1.0)
            })
            .collect();
        let out = trip_count_distribution(&ds(records));
        assert_eq!(out.rows.len(), 4);
        assert_eq!(out.rows[0].interval, TripInterval { start: 6, end: 8 });
        assert!(out.rows[1..].iter().all(|r| r.users == 0));
    }

    #[test]
    fn distribution_of_no_completed_trips_is_empty() {
        let out = trip_count_distribution(&ds(vec![TripRecord {
            completed: false,
            ..trip("Caracas", "Go", 1.0)
        }]));
        assert!(out.rows.is_empty());
        assert!(out.chart.categories.is_empty());
    }

    #[test]
    fn city_counts_completed_only() {
        let data = ds(vec![
            trip("Caracas", "Go", 1.0),
            trip("Valencia", "Go", 1.0),
            trip("Valencia", "Plus", 1.0),
            TripRecord {
                completed: false,
                ..trip("Caracas", "Go", 1.0)
            },
        ]);
        let rows = trips_by_city(&data, &Selection::All);
        assert_eq!(rows[0], CityCountRow { city: "Valencia".into(), trips: 2 });
        assert_eq!(rows[1], CityCountRow { city: "Caracas".into(), trips: 1 });
        let go = trips_by_city(&data, &Selection::only("Go"));
        assert_eq!(go.iter().map(|r| r.trips).sum::<usize>(), 2);
    }

    #[test]
    fn summary_counts() {
        let data = ds(vec![
            spend("a", "Caracas", "Go", 1.0),
            TripRecord {
                completed: false,
                ..spend("b", "Valencia", "Go", 1.0)
            },
        ]);
        let s = summarize(&data);
        assert_eq!(s.total_trips, 2);
        assert_eq!(s.canceled_trips, 1);
        assert_eq!(s.total_cities, 2);
        assert_eq!(s.total_fleets, 1);
        assert_eq!(s.total_users, 2);
        assert_eq!(s.completion_rate, 50.0);
        assert_eq!(summarize(&Dataset::default()).first_trip, None);
    }
}
