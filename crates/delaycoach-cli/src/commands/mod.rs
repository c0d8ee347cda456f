pub mod analyze;
pub mod bombs;
pub mod checkin;
pub mod coach;
pub mod config;
pub mod reset;
pub mod risk;
pub mod seed;
pub mod task;
