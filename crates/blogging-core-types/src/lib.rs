//! Core types shared across the blogging facilities
//!
//! This crate provides the canonical schema constants used by both error
//! handling and logging: field keys and event names.

pub mod schema;
