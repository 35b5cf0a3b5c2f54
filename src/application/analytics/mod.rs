pub mod service;

pub use service::{
    AnalyticsService, BusPerformance, CustomerStats, DriverRevenue, FinancialStatistics,
    PassengerStatistics, Period, SystemOverview,
};
