//! Integration tests for the buildgate verification gate
//!
//! These tests run the full check registry end-to-end against fixture
//! project trees, verifying the aggregate verdict, per-check isolation,
//! and report determinism.

pub mod broken_projects;
pub mod full_gate;
