// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Collaborator traits: the engine's system boundary.
//!
//! The resolver is pure computation; every I/O-capable dependency sits
//! behind one of these traits. Implementations typically query a database
//! or a policy service. In-memory implementations for tests and static
//! deployments live in [`crate::memory`].

use async_trait::async_trait;

use heddle_core::{EntityId, Rule};

use crate::error::Result;
use crate::node::Node;
use crate::registry::EntityType;

/// Supplies the raw rule set applicable to one entity.
#[async_trait]
pub trait RuleLoader: Send + Sync {
	/// Rules attached to the given entity, unordered.
	///
	/// Called once per hierarchy level during a resolution; must be safe to
	/// call repeatedly for the same identifier. The engine does not cache
	/// rule results across sessions.
	async fn load_rules(&self, entity: &EntityId) -> Result<Vec<Rule>>;
}

/// By-primary-key lookup of hierarchy nodes.
#[async_trait]
pub trait EntitySource: Send + Sync {
	/// Materializes the node with the given primary key, or `Ok(None)` if no
	/// such element exists. `key_parts` carries the composite-key
	/// components (the key split on `-`); single-column keys arrive as one
	/// component.
	///
	/// Root nodes are never requested here; the engine synthesizes them.
	async fn fetch(&self, entity_type: &EntityType, key_parts: &[&str]) -> Result<Option<Node>>;
}

/// Confirms that an action name is recognized.
///
/// The validator is optional on the engine; when none is configured, every
/// action name is accepted.
pub trait ActionValidator: Send + Sync {
	fn is_valid_action(&self, action: &str) -> bool;
}
