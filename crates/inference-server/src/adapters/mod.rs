//! Concrete [`crate::adapter::Adapter`] implementations.
//!
//! This crate ships exactly one: [`dummy::DummyAdapter`], an echo model used
//! by the scenario tests in `spec.md` §8 and as a template for wiring in a
//! real one. A real adapter crate depends on `inference-server` as a
//! library and supplies its own [`crate::adapter::Adapter`] impl to `main`.

pub mod dummy;
