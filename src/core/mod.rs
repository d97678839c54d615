// src/core/mod.rs

pub mod html;
pub mod sanitize;
pub mod scan;

pub use html::{Block, Markup};
