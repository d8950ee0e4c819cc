pub mod coords;
pub mod hit;
