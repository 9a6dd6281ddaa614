pub mod header;
pub mod popup;
pub mod status_bar;
