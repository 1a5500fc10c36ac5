pub mod api;
pub mod api_config;
pub mod busy;
pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod form;
pub mod format;
pub mod models;
pub mod notification;
pub mod view;

pub use error::{PanelError, Result};
