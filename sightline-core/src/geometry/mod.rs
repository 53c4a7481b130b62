pub mod point;
pub mod polygon;
pub mod sector;
pub mod segment;
