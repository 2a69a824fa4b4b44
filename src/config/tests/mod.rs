//! Unit tests for tibctl configuration.
//!
//! This module contains tests organised into:
//! - [`helpers`] - Shared fixtures and helper functions
//! - [`types_tests`] - Basic type and serialisation tests
//! - [`env_tests`] - Environment name translation and binding
//! - [`resolver_tests`] - Configuration source resolution
//! - [`store_tests`] - Store loading and lookups
//! - [`layer_precedence_tests`] - `MergeComposer` layer precedence tests

mod helpers;
mod resolver_tests;
