// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Session-scoped cache of materialized hierarchy nodes.
//!
//! One resolver session owns one cache, so the same identifier resolves to
//! the identical [`Arc<Node>`] for the session's lifetime and no locking is
//! needed. The cache does not load nodes itself; the only node it ever
//! creates is the synthesized root of a hierarchy type, which exists
//! conceptually before any data references it.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{ResolveError, Result};
use crate::node::Node;
use crate::registry::EntityType;

/// Per-type, per-key cache of already-materialized nodes.
#[derive(Debug, Default)]
pub struct NodeCache {
	nodes: HashMap<(String, String), Arc<Node>>,
}

impl NodeCache {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the cached node for `(entity_type, key)`.
	///
	/// On a miss, the type's root is synthesized and cached when `key`
	/// designates it; any other key fails with
	/// [`ResolveError::UnknownElement`], since loading non-root nodes is the
	/// entity source's job.
	pub fn get(&mut self, entity_type: &EntityType, key: &str) -> Result<Arc<Node>> {
		if let Some(node) = self.lookup(entity_type.name(), key) {
			return Ok(node);
		}
		if entity_type.is_root_key(key) {
			return Ok(self.put(Node::new(entity_type.root_id().clone())));
		}
		Err(ResolveError::UnknownElement {
			type_name: entity_type.name().to_string(),
			key: key.to_string(),
		})
	}

	/// The root node of a hierarchy type, synthesizing it on first access.
	pub fn root(&mut self, entity_type: &EntityType) -> Arc<Node> {
		if let Some(node) = self.lookup(entity_type.name(), entity_type.root_key()) {
			return node;
		}
		self.put(Node::new(entity_type.root_id().clone()))
	}

	/// Inserts or overwrites the entry for the node's identifier and returns
	/// the cached handle.
	pub fn put(&mut self, node: Node) -> Arc<Node> {
		let entry = Arc::new(node);
		self.nodes.insert(
			(entry.type_name().to_string(), entry.key().to_string()),
			Arc::clone(&entry),
		);
		entry
	}

	/// Existence check without side effects.
	pub fn has(&self, type_name: &str, key: &str) -> bool {
		self.nodes
			.contains_key(&(type_name.to_string(), key.to_string()))
	}

	fn lookup(&self, type_name: &str, key: &str) -> Option<Arc<Node>> {
		self.nodes
			.get(&(type_name.to_string(), key.to_string()))
			.map(Arc::clone)
	}
}
