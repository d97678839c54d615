// src/specs/mod.rs
//! # Page reading
//!
//! This module knows **where the frame data lives in a character page** and how
//! to get it out. Everything here is pure: text in, rows out.
//!
//! ## What lives here
//! - **Source location** (`locate`): the ordered strategies, from the page's
//!   canonical data element down to plain tables.
//! - **Payload shape resolution** (`payload`): the bounded search for the object
//!   that actually holds the moves.
//! - **Table parsing** (`table`): header-row and class-tagged layouts.
//! - **Field naming** (`fields`): one alias table shared by every row kind, so
//!   callers ask for `Field::Startup` regardless of where the row came from.
//!
//! ## What does **not** live here
//! - Value normalization and classification (`value`, `rules`).
//! - Record assembly and ids (`assemble`, `pipeline`).
//! - Reading or writing files (`file`).
//!
//! ## Typical call chain
//! ```text
//! pipeline::extract → specs::locate::locate
//!                       ├─ payload: specs::payload::{resolve, move_rows} → PayloadRow
//!                       └─ tables:  specs::table::parse_tables          → TableRow
//!                   → both read through specs::fields::FieldSource
//! ```
//!
//! ## Conventions
//! - **Case-insensitive** tag detection via `core::html::Markup`.
//! - Objects are cut from script text by **balanced-brace scanning**
//!   (`core::scan`), never by regex alone.
//! - Strategy misses are logged at debug level and are not errors.
pub mod fields;
pub mod locate;
pub mod payload;
pub mod table;
