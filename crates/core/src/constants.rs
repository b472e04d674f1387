/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Number of trailing chart points kept for the 7-day view
pub const LAST_7_DAYS_POINTS: usize = 7;

/// Number of trailing chart points kept for the 30-day view
pub const LAST_30_DAYS_POINTS: usize = 30;

/// Minimum number of points a chart series is padded to
pub const MIN_CHART_POINTS: usize = 2;

/// Investment status strings reported by the backend
pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_CLOSED: &str = "closed";
pub const STATUS_EXPIRED: &str = "expired";
