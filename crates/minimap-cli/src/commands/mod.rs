pub mod config;
pub mod geometry;
pub mod view;
