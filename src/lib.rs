pub mod auth;
pub mod configuration;
pub mod helper;
pub mod middlewares;
pub mod models;
pub mod repositories;
pub mod startup;
pub mod views;
