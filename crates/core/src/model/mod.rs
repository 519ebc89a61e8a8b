pub mod catalog;
pub mod timetable;

pub use catalog::RowCatalog;
pub use timetable::Timetable;
