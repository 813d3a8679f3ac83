//! Integration tests for the sweep harness.
//!
//! Unit tests live next to their modules; the tests here exercise the full
//! grid -> evaluator -> store pipeline with a scripted simulator.
