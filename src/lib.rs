pub mod app;
pub mod cli;
pub mod client;
pub mod config;
pub mod conta;
pub mod error;
pub mod interactive;
