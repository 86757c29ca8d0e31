//! Internal test modules - whitebox tests with crate access
//!
//! Harness-based acceptance tests that drive the whole app through a
//! `TestBackend` and a hand-driven clock.
