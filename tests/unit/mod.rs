//! Unit Tests Module
//!
//! Classifier behaviour through the public library API.
