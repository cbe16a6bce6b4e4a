pub mod alerts;
pub mod csv_export;
pub mod form;
pub mod page;
pub mod stats;
pub mod table;

pub use crate::domain::model::{Row, SortDirection, StatsResponse, StatsSnapshot, Table};
pub use crate::domain::ports::{DownloadTarget, Notifier, StatsSource};
pub use crate::utils::error::Result;
