pub mod api;
pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod identity;
pub mod models;
pub mod session;
pub mod state;
pub mod tutorial;
