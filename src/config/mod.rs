// src/config/mod.rs
pub mod consts;
pub mod names;
pub mod options;
