//! StockVision library
//!
//! Research generation, saved-result history and settings for the
//! `stockvision` CLI, exposed as a library for testing.

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;
