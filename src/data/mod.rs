pub mod geometry;
pub mod markers;
pub mod sheet;
