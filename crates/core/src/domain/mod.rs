pub mod context;
pub mod item;
pub mod outfit;
