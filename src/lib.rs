//! Crop Yield Prediction API
//!
//! Serves a pre-trained yield regression model over HTTP: request
//! validation, feature preparation, single predictions and per-crop
//! recommendations, plus read-only catalog and metadata endpoints.

pub mod app_state;
pub mod config;
pub mod models;
pub mod routes;
pub mod services;
