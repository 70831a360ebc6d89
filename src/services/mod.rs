pub mod availability;
pub mod statistics;
