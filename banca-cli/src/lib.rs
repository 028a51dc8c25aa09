//! Console front end for the Banca API.
//!
//! Each feature view pairs a [`banca_table::TableEngine`] with the API
//! calls behind it; [`console::Console`] reads commands, drives the active
//! view and prints it with [`render::render`].

pub mod command;
pub mod config;
pub mod console;
pub mod error;
pub mod paths;
pub mod render;
pub mod views;
