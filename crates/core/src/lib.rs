pub mod feed;
pub mod layout;
pub mod model;
pub mod views;
