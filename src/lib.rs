// Library exports for the SocialNet client
// Integration tests drive the view models through these modules

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod render;
pub mod routes;
pub mod session;
pub mod views;
