//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Waymark record model (WaymarkRecord, RecordSet)
//! - Record loading from JSONL/JSON
//! - Rendering functions for different output formats
//! - Common utilities

pub mod model;
pub mod records;
pub mod render;
pub mod util;
