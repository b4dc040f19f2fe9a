pub mod chart;
pub mod config;
pub mod filter;
pub mod histogram;
pub mod rank;
pub mod record;
pub mod session;
pub mod tally;

pub use chart::{ChartSeries, ChartSlot, Palette, RenderSink};
pub use filter::{filter_by_date, DateRange};
pub use histogram::AgeHistogram;
pub use rank::{rank_coefficients, Coefficient};
pub use record::{CaseRecord, CoefficientMap, KeyPath};
pub use session::{DashboardQuery, SessionContext};
pub use tally::{tally_by, Tally};
