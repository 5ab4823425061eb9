// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Hierarchical ACL rule-resolution engine.
//!
//! Heddle decides whether a subject may perform an action on an entity.
//! Entities live in tree-shaped hierarchies; rules attached to an ancestor
//! apply to its descendants unless a nearer level overrides them, and two
//! configured policies (default and preferred) make every decision total.
//!
//! The engine owns no storage and no transport. Rules and hierarchy nodes
//! come from collaborators behind the [`RuleLoader`] and [`EntitySource`]
//! traits; action names are optionally checked by an [`ActionValidator`].
//!
//! # Overview
//!
//! - [`TypeRegistry`]: maps the `type` half of `"type#key"` identifiers to
//!   registered hierarchy types
//! - [`Acl`]: a per-session resolver with its own node cache
//! - [`memory`]: map-backed collaborators for tests and static deployments
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use heddle::memory::{MemoryEntitySource, MemoryRuleLoader};
//! use heddle::{Acl, EntityType, Node, Policy, Rule, Subject, SubjectMatch, TypeRegistry};
//!
//! # async fn demo() -> heddle::Result<()> {
//! let mut registry = TypeRegistry::new();
//! registry.register(EntityType::new("doc", "root").unwrap()).unwrap();
//!
//! let mut source = MemoryEntitySource::new();
//! source.add(Node::with_parent(
//! 	"doc#readme".parse().unwrap(),
//! 	"doc#root".parse().unwrap(),
//! ));
//!
//! let mut rules = MemoryRuleLoader::new();
//! rules.add(Rule::allow(
//! 	"doc#root".parse().unwrap(),
//! 	"read",
//! 	SubjectMatch::Group("staff".into()),
//! ));
//!
//! let mut acl = Acl::new(Arc::new(registry), Arc::new(rules), Arc::new(source));
//! let decision = acl
//! 	.authorize_str("doc#readme", "read", &Subject::new("alice").with_group("staff"))
//! 	.await?;
//! assert_eq!(decision, Policy::Allow);
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod error;
pub mod loader;
pub mod memory;
pub mod node;
pub mod registry;
pub mod resolver;

pub use cache::NodeCache;
pub use error::{ConfigError, ResolveError, Result};
pub use loader::{ActionValidator, EntitySource, RuleLoader};
pub use node::Node;
pub use registry::{EntityType, TypeRegistry};
pub use resolver::{Acl, MAX_DEPTH};

pub use heddle_core::{
	EntityId, ParseEntityIdError, ParsePolicyError, Policy, PolicyConfig, Rule, Subject,
	SubjectMatch,
};
