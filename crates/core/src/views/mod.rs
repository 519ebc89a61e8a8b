pub mod day_axis;
pub mod grid;

/// Width of the row-header column, in logical pixels. Shared by the
/// grid body and the day axis so their time origins line up.
pub const HEADER_WIDTH: f64 = 110.0;

/// Height of one lane, in logical pixels.
pub const LANE_HEIGHT: f64 = 22.0;
