//! Reusable Dioxus components for the magic background generator.

pub mod components;

pub use components::*;
