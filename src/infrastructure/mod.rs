pub mod app_state;
pub mod bot;
pub mod config;
pub mod database;
pub mod services;
