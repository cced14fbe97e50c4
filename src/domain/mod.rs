//! Domain layer for Selector Guardian
//!
//! CDD Principle: Domain Model - Pure business logic for selector policy enforcement
//! - Contains the core entities and value objects of selector linting
//! - Independent of any host linter, parser, or output infrastructure
//! - Expresses the ubiquitous language of restricted selectors and violations

pub mod violations;

// Re-export main domain types for convenience
pub use violations::*;
