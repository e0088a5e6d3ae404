// src/core/mod.rs

pub mod artifact;
pub mod catalog;
pub mod interpolator;
pub mod paths;
pub mod preview;
pub mod resolver;
pub mod search;
pub mod selection;
pub mod template;
