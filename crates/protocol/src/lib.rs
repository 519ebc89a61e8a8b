pub mod commands;
pub mod theme;
pub mod timetable;
pub mod types;

pub use commands::{RenderCommand, TextAlign};
pub use theme::ThemeToken;
pub use timetable::{Broadcast, DaySchedule, FeedFormat, RowKind, TimetableMeta};
pub use types::{Point, Rect, Viewport};
