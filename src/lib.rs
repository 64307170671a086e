//! Reporting over a ride-hailing trip table.
//!
//! The CSV export is loaded once through a [`cache::DatasetCache`]; each report
//! panel in [`registry::Panel`] is a pure function of the dataset and the
//! current [`controls::Controls`], returning a display table and, for some
//! panels, a bar chart description.
pub mod cache;
pub mod controls;
pub mod error;
pub mod loader;
pub mod output;
pub mod registry;
pub mod reports;
pub mod types;
pub mod util;

pub use cache::DatasetCache;
pub use controls::{Controls, DistanceThreshold, HourDivisor, Selection};
pub use error::{Result, TripError};
pub use registry::{Panel, PanelOutput, ReportRegistry, TableView};
pub use types::{ChartSpec, Dataset, TripRecord};
