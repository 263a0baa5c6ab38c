//! Integration tests entry point
//!
//! Includes the test modules under integration/ so they compile as one test
//! binary while staying organized in a subdirectory.

mod integration;
