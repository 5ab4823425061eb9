// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-memory collaborator implementations.
//!
//! Map-backed implementations of the engine's seams, used by the test suite
//! and suitable for small deployments whose rules and hierarchy are static
//! configuration rather than stored data.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;

use heddle_core::{EntityId, Rule, KEY_SEPARATOR};

use crate::error::Result;
use crate::loader::{ActionValidator, EntitySource, RuleLoader};
use crate::node::Node;
use crate::registry::EntityType;

/// Rule loader backed by a map of entity identifiers to rule sets.
///
/// Entities with no registered rules yield an empty set, not an error.
#[derive(Debug, Default)]
pub struct MemoryRuleLoader {
	rules: HashMap<EntityId, Vec<Rule>>,
}

impl MemoryRuleLoader {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a rule, keyed by the entity it names.
	pub fn add(&mut self, rule: Rule) -> &mut Self {
		self.rules.entry(rule.entity.clone()).or_default().push(rule);
		self
	}
}

#[async_trait]
impl RuleLoader for MemoryRuleLoader {
	async fn load_rules(&self, entity: &EntityId) -> Result<Vec<Rule>> {
		Ok(self.rules.get(entity).cloned().unwrap_or_default())
	}
}

/// Entity source backed by a map of pre-built nodes.
#[derive(Debug, Default)]
pub struct MemoryEntitySource {
	nodes: HashMap<EntityId, Node>,
}

impl MemoryEntitySource {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a node, keyed by its identifier.
	pub fn add(&mut self, node: Node) -> &mut Self {
		self.nodes.insert(node.id().clone(), node);
		self
	}
}

#[async_trait]
impl EntitySource for MemoryEntitySource {
	async fn fetch(&self, entity_type: &EntityType, key_parts: &[&str]) -> Result<Option<Node>> {
		let key = key_parts.join(&KEY_SEPARATOR.to_string());
		let id = match EntityId::new(entity_type.name(), key) {
			Ok(id) => id,
			Err(_) => return Ok(None),
		};
		Ok(self.nodes.get(&id).cloned())
	}
}

/// Action validator backed by an explicit list of recognized action names.
#[derive(Debug, Default, Clone)]
pub struct ActionList {
	actions: HashSet<String>,
}

impl ActionList {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder: add a recognized action name.
	pub fn with_action(mut self, action: impl Into<String>) -> Self {
		self.actions.insert(action.into());
		self
	}
}

impl ActionValidator for ActionList {
	fn is_valid_action(&self, action: &str) -> bool {
		self.actions.contains(action)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use heddle_core::SubjectMatch;

	fn doc_type() -> EntityType {
		EntityType::new("doc", "root").unwrap()
	}

	#[tokio::test]
	async fn loader_yields_empty_set_for_unknown_entity() {
		let loader = MemoryRuleLoader::new();
		let id = EntityId::new("doc", "readme").unwrap();
		assert!(loader.load_rules(&id).await.unwrap().is_empty());
	}

	#[tokio::test]
	async fn loader_groups_rules_by_entity() {
		let readme = EntityId::new("doc", "readme").unwrap();
		let other = EntityId::new("doc", "license").unwrap();

		let mut loader = MemoryRuleLoader::new();
		loader
			.add(Rule::allow(
				readme.clone(),
				"read",
				SubjectMatch::User("alice".to_string()),
			))
			.add(Rule::deny(
				readme.clone(),
				"write",
				SubjectMatch::Group("guests".to_string()),
			))
			.add(Rule::allow(
				other.clone(),
				"read",
				SubjectMatch::User("bob".to_string()),
			));

		assert_eq!(loader.load_rules(&readme).await.unwrap().len(), 2);
		assert_eq!(loader.load_rules(&other).await.unwrap().len(), 1);
	}

	#[tokio::test]
	async fn source_fetches_by_key_parts() {
		let mut source = MemoryEntitySource::new();
		source.add(Node::with_parent(
			EntityId::new("membership", "42-7").unwrap(),
			EntityId::new("membership", "root").unwrap(),
		));

		let membership = EntityType::new("membership", "root").unwrap();
		let found = source
			.fetch(&membership, &["42", "7"])
			.await
			.unwrap()
			.unwrap();
		assert_eq!(found.key(), "42-7");

		assert!(source.fetch(&membership, &["42"]).await.unwrap().is_none());
	}

	#[tokio::test]
	async fn source_misses_for_unknown_keys() {
		let source = MemoryEntitySource::new();
		assert!(source
			.fetch(&doc_type(), &["readme"])
			.await
			.unwrap()
			.is_none());
	}

	#[test]
	fn action_list_accepts_only_registered_actions() {
		let validator = ActionList::new().with_action("read").with_action("write");
		assert!(validator.is_valid_action("read"));
		assert!(validator.is_valid_action("write"));
		assert!(!validator.is_valid_action("delete"));
	}
}
