//! Senile Rod Test Utils
//!
//! Provides shared testing utilities for the senile-rod bot. This crate offers
//! a builder pattern for creating isolated test contexts backed by a temporary
//! directory, fake generator executables, and Serenity object factories.
//!
//! # Overview
//!
//! - **TestBuilder**: Fluent builder for configuring fixture files and fakes
//! - **TestContext**: Test environment owning the temporary directory
//! - **FakeGenerator**: Scripted stand-ins for the external text generator
//! - **TestError**: Error types that can occur during test setup
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{builder::TestBuilder, generator::FakeGenerator};
//!
//! #[tokio::test]
//! async fn test_generation() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_generator(FakeGenerator::Succeeds("hello".to_string()))
//!         .build()?;
//!
//!     let command = test.generator_command();
//!     // Hand the command to the gateway under test...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod generator;
pub mod serenity;
