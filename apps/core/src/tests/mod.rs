//! Test Module
//!
//! Crate-level test suite for the intake backend.
//!
//! ## Test Categories
//! - `guard_tests`: Sanitizer guarantees over an injection corpus, admission rules
//! - `brain_tests`: Summary, keyword and phrase extraction, analyzer determinism
//! - `pipeline_tests`: Raw JSON to record, rejections, concurrency
//! - `delivery_tests`: Webhook retry and timeout behaviour (wiremock)
//! - `server_tests`: HTTP routes via `oneshot`

pub mod guard_tests;
