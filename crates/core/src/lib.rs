#![warn(clippy::all, missing_docs)]

//! Core model and view logic for the cat scroller.
//!
//! This crate hosts the record store, the pure render step that turns
//! store state into a [`CatView`], the [`ViewController`] that maps
//! [`Action`]s onto store mutations, and configuration handling used by
//! the terminal frontend.

pub mod config;
pub mod controller;
pub mod models;
pub mod store;
pub mod view;

pub use config::{AppConfig, ConfigError};
pub use controller::{Action, Dispatch, ViewController};
pub use models::{Cat, Variant};
pub use store::{CatStore, StoreError};
pub use view::{render, CatView, Vitality};
