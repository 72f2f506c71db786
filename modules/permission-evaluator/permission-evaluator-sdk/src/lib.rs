#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Permission Evaluator SDK
//!
//! This crate provides the public API for the `permission_evaluator` module:
//!
//! - [`PermissionEvaluator`] - Public API trait for consumers
//! - [`ChainedPermissionEvaluator`] - One link of an evaluator chain
//! - [`PermissionTarget`], [`TargetId`], [`Permission`] - Evaluation inputs
//!
//! ## Usage
//!
//! ```ignore
//! use permission_evaluator_sdk::{Permission, PermissionEvaluator, TargetId};
//!
//! let evaluator = registry.get::<dyn PermissionEvaluator>("permissionEvaluator").unwrap();
//!
//! let can_read = evaluator.has_permission(&ctx, &document, &Permission::new("read"));
//! let can_edit = evaluator.has_permission_for_id(
//!     &ctx,
//!     &TargetId::Int(42),
//!     "document",
//!     &Permission::new("edit"),
//! );
//! ```

pub mod api;
pub mod models;

pub use api::{ChainedPermissionEvaluator, PermissionEvaluator};
pub use models::{Permission, PermissionTarget, TargetId};
