pub mod entities;
pub mod ports;
pub mod services;

pub use entities::{
  ActivityItem, DemandPoint, EarningKind, EarningRecord, GigStats, SurveyRates, SurveyStats,
};
pub use ports::{EarningsRepository, GigActivityFeed};
pub use services::{DailyTotal, EarningsReport, KindTotal, share_of};
