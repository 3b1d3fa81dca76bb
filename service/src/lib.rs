#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

pub mod app;
pub mod catalog;
pub mod client;
pub mod config;
pub mod http;
pub mod metrics;
pub mod mock;
pub mod pages;
pub mod proxy;
pub mod rest;
pub mod telemetry;
