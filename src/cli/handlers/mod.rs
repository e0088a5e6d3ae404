// src/cli/handlers/mod.rs

// One module per CLI action.

pub mod apply;
pub mod artifact;
pub mod commons;
pub mod list;
pub mod render;
pub mod send;
pub mod settings;
pub mod show;
