//! UI components provided by this crate.

pub mod lightbar;
