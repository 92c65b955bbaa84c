pub mod account;
pub mod game;
pub mod error;
pub mod cli;
pub mod interactive;
pub mod config;
