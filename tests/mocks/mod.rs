//! Centralized mocks and fixtures for testing
//!
//! Reusable quote payloads, entities and settings shared by the integration
//! tests.

pub mod configs;
pub mod entities;

#[allow(unused_imports)]
pub use configs::MockConfigs;
#[allow(unused_imports)]
pub use entities::{MockEntities, MockPayloads};
