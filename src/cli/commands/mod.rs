pub mod config;
pub mod health;
pub mod plan;
pub mod trips;
