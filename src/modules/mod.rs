//! Modules layer - Infrastructure components for external integrations
//!
//! Contains the local upload storage and the catalog persistence adapters.

pub mod catalog;
pub mod storage;
