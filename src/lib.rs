//! Keeps a selected item visible inside a large scrollable item grid.
//!
//! The [`core`] engine is host-agnostic: the host injects a scheduler, the
//! selection model and the layout, and forwards resize and wheel input.  The
//! `gallery-scroll` binary is a terminal host built on top of it.

pub mod config;
pub mod core;
