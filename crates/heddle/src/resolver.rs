// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Policy resolution.
//!
//! [`Acl`] is the engine's entry point. One logical session (one request)
//! owns one `Acl`; the type registry and the collaborators behind it are
//! shared across sessions, the node cache is not.
//!
//! Resolution walks the hierarchy from the requested entity up to its root,
//! loading the rules attached at each level:
//!
//! 1. The nearest level with at least one matching rule decides; farther
//!    levels are never consulted ("more specific overrides more general").
//! 2. Within a level, exact-subject rules outrank group rules.
//! 3. If the deciding level carries both an allow and a deny, the configured
//!    preferred policy breaks the tie.
//! 4. If no level matches, the configured default policy applies.
//!
//! The outcome is always exactly allow or deny. Failures to evaluate
//! (unknown entity, malformed identifier, unrecognized action, cyclic
//! hierarchy data) are reported as errors, never as a deny.

use std::sync::Arc;

use tracing::{debug, instrument};

use heddle_core::{EntityId, Policy, PolicyConfig, Rule, Subject};

use crate::cache::NodeCache;
use crate::error::{ConfigError, ResolveError, Result};
use crate::loader::{ActionValidator, EntitySource, RuleLoader};
use crate::node::Node;
use crate::registry::TypeRegistry;

/// Upper bound on hierarchy traversal depth.
///
/// Correct hierarchy data is a tree and never comes close; exceeding the cap
/// means a collaborator produced a parent cycle.
pub const MAX_DEPTH: usize = 64;

/// Hierarchical ACL resolver.
pub struct Acl {
	registry: Arc<TypeRegistry>,
	rules: Arc<dyn RuleLoader>,
	source: Arc<dyn EntitySource>,
	validator: Option<Arc<dyn ActionValidator>>,
	config: PolicyConfig,
	cache: NodeCache,
}

impl Acl {
	/// Creates a resolver session over a shared registry and collaborators.
	pub fn new(
		registry: Arc<TypeRegistry>,
		rules: Arc<dyn RuleLoader>,
		source: Arc<dyn EntitySource>,
	) -> Self {
		Self {
			registry,
			rules,
			source,
			validator: None,
			config: PolicyConfig::default(),
			cache: NodeCache::new(),
		}
	}

	/// Builder: set the policy configuration.
	pub fn with_config(mut self, config: PolicyConfig) -> Self {
		self.config = config;
		self
	}

	/// Builder: set the action validator. Without one, every action name is
	/// accepted.
	pub fn with_action_validator(mut self, validator: Arc<dyn ActionValidator>) -> Self {
		self.validator = Some(validator);
		self
	}

	/// The policy applied when no rule at any level matches.
	pub fn default_policy(&self) -> Policy {
		self.config.default_policy
	}

	/// The policy applied when the deciding level carries conflicting rules.
	pub fn preferred_policy(&self) -> Policy {
		self.config.preferred_policy
	}

	pub fn set_default_policy(&mut self, policy: Policy) {
		self.config.default_policy = policy;
	}

	pub fn set_preferred_policy(&mut self, policy: Policy) {
		self.config.preferred_policy = policy;
	}

	/// Parses and applies both policy settings from string values, as read
	/// from an environment or a configuration file.
	pub fn configure_policies(
		&mut self,
		default_policy: &str,
		preferred_policy: &str,
	) -> std::result::Result<(), ConfigError> {
		self.config = PolicyConfig::parse(default_policy, preferred_policy)?;
		Ok(())
	}

	/// The rule loader in use.
	pub fn rule_loader(&self) -> &dyn RuleLoader {
		self.rules.as_ref()
	}

	/// Replaces the rule loader.
	pub fn set_rule_loader(&mut self, rules: Arc<dyn RuleLoader>) {
		self.rules = rules;
	}

	/// Pre-seeds the session cache with an already-materialized node,
	/// overwriting any cached entry for the same identifier.
	pub fn insert_node(&mut self, node: Node) -> Arc<Node> {
		self.cache.put(node)
	}

	/// Resolves an entity identifier to its hierarchy node.
	///
	/// Cached nodes are returned as-is, root keys are synthesized without
	/// consulting the entity source, and anything else is fetched from the
	/// source and cached for the rest of the session.
	pub async fn resolve(&mut self, id: &EntityId) -> Result<Arc<Node>> {
		let entity_type = self.registry.get(id.type_name())?.clone();
		if self.cache.has(id.type_name(), id.key()) || entity_type.is_root_key(id.key()) {
			return self.cache.get(&entity_type, id.key());
		}

		let key_parts = id.key_parts();
		match self.source.fetch(&entity_type, &key_parts).await? {
			Some(node) => {
				if node.type_name() != entity_type.name() {
					return Err(ResolveError::Backend(format!(
						"entity source returned node '{}' for requested type '{}'",
						node.id(),
						entity_type.name()
					)));
				}
				Ok(self.cache.put(node))
			}
			None => Err(ResolveError::UnknownElement {
				type_name: id.type_name().to_string(),
				key: id.key().to_string(),
			}),
		}
	}

	/// Resolves an encoded `"type#key"` identifier to its hierarchy node.
	pub async fn resolve_str(&mut self, id: &str) -> Result<Arc<Node>> {
		let id: EntityId = id.parse()?;
		self.resolve(&id).await
	}

	/// Decides whether `subject` may perform `action` on `entity`.
	#[instrument(
		level = "debug",
		skip(self, entity, subject),
		fields(entity = %entity, action = %action, subject = %subject.id)
	)]
	pub async fn authorize(
		&mut self,
		entity: &EntityId,
		action: &str,
		subject: &Subject,
	) -> Result<Policy> {
		if let Some(validator) = &self.validator {
			if !validator.is_valid_action(action) {
				return Err(ResolveError::InvalidAction(action.to_string()));
			}
		}

		let mut node = self.resolve(entity).await?;
		for _ in 0..MAX_DEPTH {
			let rules = self.rules.load_rules(node.id()).await?;
			if let Some(decision) =
				level_decision(node.id(), &rules, action, subject, self.config.preferred_policy)
			{
				debug!(policy = %decision, level = %node.id(), "matched rules at hierarchy level");
				return Ok(decision);
			}

			match node.parent().cloned() {
				Some(parent_id) => node = self.resolve(&parent_id).await?,
				None => {
					let decision = self.config.default_policy;
					debug!(policy = %decision, "no rule matched at any level, applying default policy");
					return Ok(decision);
				}
			}
		}

		Err(ResolveError::HierarchyCycle {
			entity: entity.clone(),
			depth: MAX_DEPTH,
		})
	}

	/// Decides an encoded `"type#key"` identifier.
	pub async fn authorize_str(
		&mut self,
		entity: &str,
		action: &str,
		subject: &Subject,
	) -> Result<Policy> {
		let entity: EntityId = entity.parse()?;
		self.authorize(&entity, action, subject).await
	}
}

/// Combines the rules attached at one hierarchy level into a decision.
///
/// Returns `None` when no rule at this level matches the request, which
/// sends the resolver one level up. Exact-subject matches mask group
/// matches; a level left with both polarities resolves to `preferred`.
fn level_decision(
	entity: &EntityId,
	rules: &[Rule],
	action: &str,
	subject: &Subject,
	preferred: Policy,
) -> Option<Policy> {
	let matching: Vec<&Rule> = rules
		.iter()
		.filter(|rule| rule.entity == *entity && rule.matches(action, subject))
		.collect();
	if matching.is_empty() {
		return None;
	}

	let has_exact = matching.iter().any(|rule| rule.subject.is_exact());
	let mut saw_allow = false;
	let mut saw_deny = false;
	for rule in matching
		.iter()
		.filter(|rule| !has_exact || rule.subject.is_exact())
	{
		match rule.policy {
			Policy::Allow => saw_allow = true,
			Policy::Deny => saw_deny = true,
		}
	}

	Some(match (saw_allow, saw_deny) {
		(true, true) => preferred,
		(true, false) => Policy::Allow,
		_ => Policy::Deny,
	})
}
