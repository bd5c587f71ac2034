/// Session configuration constants.
///
/// Connection ids used by the local JSON-lines driver when it grants each
/// side full permissions at startup.

/// Connection id that plays white in the driver.
pub const DRIVER_WHITE_CONNECTION: u64 = 1;

/// Connection id that plays black in the driver.
pub const DRIVER_BLACK_CONNECTION: u64 = 2;
