pub mod accounts;
pub mod choices;
pub mod config;

pub mod database;
pub mod services;
