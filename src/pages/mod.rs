pub mod auth;
pub mod dashboard;
pub mod statistics;

pub use auth::AuthScreen;
pub use dashboard::DashboardPage;
pub use statistics::StatisticsPage;
