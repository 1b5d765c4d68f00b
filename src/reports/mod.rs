// Reports module - window performance, time-weighted returns and fund history

pub mod history;
pub mod twr;
pub mod windows;

pub use history::{fund_points, HistoryPoint};
pub use twr::{compute_twr_series, compute_twr_series_at, TwrPoint, TwrSeries};
pub use windows::{
    compute_window_performance, compute_window_performance_at, Window, WindowPerformance,
    WindowReport, WINDOWS,
};
