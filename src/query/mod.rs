//! Query module - Turns free-form queries into record filters
//!
//! Provides:
//! - markers: canonical waymark types, aliases and spelling variations
//! - lexer: query string to classified tokens
//! - compiler: tokens to FilterSpec
//! - filter: FilterSpec matching against records
//! - api: find/query command entry points

pub mod api;
pub mod compiler;
pub mod filter;
pub mod lexer;
pub mod markers;
