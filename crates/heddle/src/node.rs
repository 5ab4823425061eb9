// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Hierarchy nodes.
//!
//! A [`Node`] is one entity in a tree of authorizable objects. It carries
//! its own identifier and an optional parent reference; the parent is a
//! lookup key, not an owning link, so nodes stay cheap to clone and cache.
//! Rules attached to an ancestor apply to the node unless a nearer level
//! overrides them.

use serde::{Deserialize, Serialize};

use heddle_core::EntityId;

/// One node in an entity hierarchy.
///
/// Nodes are immutable once constructed. The root node of a hierarchy type
/// has no parent; every other node is expected to reach the root by
/// following parent references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
	id: EntityId,
	parent: Option<EntityId>,
}

impl Node {
	/// Creates a node with no parent. Used for hierarchy roots.
	pub fn new(id: EntityId) -> Self {
		Self { id, parent: None }
	}

	/// Creates a node with a parent reference.
	pub fn with_parent(id: EntityId, parent: EntityId) -> Self {
		Self {
			id,
			parent: Some(parent),
		}
	}

	/// The node's identifier.
	pub fn id(&self) -> &EntityId {
		&self.id
	}

	/// The symbolic name of the hierarchy type the node belongs to.
	pub fn type_name(&self) -> &str {
		self.id.type_name()
	}

	/// The node's primary-key value.
	pub fn key(&self) -> &str {
		self.id.key()
	}

	/// The identifier of the parent node, if any.
	pub fn parent(&self) -> Option<&EntityId> {
		self.parent.as_ref()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn root_node_has_no_parent() {
		let root = Node::new(EntityId::new("doc", "root").unwrap());
		assert_eq!(root.type_name(), "doc");
		assert_eq!(root.key(), "root");
		assert!(root.parent().is_none());
	}

	#[test]
	fn child_node_references_parent() {
		let parent_id = EntityId::new("doc", "root").unwrap();
		let child = Node::with_parent(
			EntityId::new("doc", "readme").unwrap(),
			parent_id.clone(),
		);
		assert_eq!(child.parent(), Some(&parent_id));
	}

	#[test]
	fn serializes_with_encoded_identifiers() {
		let node = Node::with_parent(
			EntityId::new("doc", "readme").unwrap(),
			EntityId::new("doc", "root").unwrap(),
		);
		let json = serde_json::to_value(&node).unwrap();
		assert_eq!(json["id"], "doc#readme");
		assert_eq!(json["parent"], "doc#root");
	}
}
