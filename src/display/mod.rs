//! Display module - Terminal-aware rendering of waymark content
//!
//! Provides:
//! - tokenizer: content to atomic render tokens
//! - wrap: width-aware line wrapping
//! - align: column-aligned file group rendering
//! - style: pluggable category to emphasis policies
//! - api: tokens/wrap command entry points

pub mod align;
pub mod api;
pub mod style;
pub mod tokenizer;
pub mod wrap;
