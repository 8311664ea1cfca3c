pub mod app;
pub mod bani;
pub mod command;
pub mod config;
pub mod error;
pub mod event;
pub mod input;
pub mod logging;
pub mod nav;
pub mod palette;
pub mod provider;
pub mod ui;
