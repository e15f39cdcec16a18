pub mod index;
pub mod predict;
