// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Entity-type registration.
//!
//! The registry maps short symbolic names (the `type` half of a `"type#key"`
//! identifier) to [`EntityType`] descriptors. It is append-only,
//! process-wide configuration: populate it fully at startup, then share it
//! read-only (behind an `Arc`) with every resolver session.

use std::collections::HashMap;

use heddle_core::EntityId;

use crate::error::{ConfigError, ResolveError, Result};

/// Descriptor of a registered hierarchy type.
///
/// Each hierarchy type has exactly one designated root key; the root node is
/// synthesized on first access rather than loaded from the entity source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityType {
	name: String,
	root: EntityId,
}

impl EntityType {
	/// Creates a descriptor. The name and root key are validated against the
	/// identifier encoding (non-empty, no `#`).
	pub fn new(
		name: impl Into<String>,
		root_key: impl Into<String>,
	) -> std::result::Result<Self, ConfigError> {
		let name = name.into();
		let root = EntityId::new(name.clone(), root_key)?;
		Ok(Self { name, root })
	}

	/// The symbolic type name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// The designated root key of this hierarchy type.
	pub fn root_key(&self) -> &str {
		self.root.key()
	}

	/// The identifier of this hierarchy type's root node.
	pub fn root_id(&self) -> &EntityId {
		&self.root
	}

	/// Returns true if `key` designates this type's root node.
	pub fn is_root_key(&self, key: &str) -> bool {
		self.root.key() == key
	}
}

/// Append-only mapping of symbolic type names to descriptors.
#[derive(Debug, Default, Clone)]
pub struct TypeRegistry {
	types: HashMap<String, EntityType>,
}

impl TypeRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a type. Fails with [`ConfigError::DuplicateRegistration`]
	/// if the name is taken, whether by the same descriptor or a different
	/// one; the first registration stays active.
	pub fn register(&mut self, entity_type: EntityType) -> std::result::Result<(), ConfigError> {
		if self.types.contains_key(entity_type.name()) {
			return Err(ConfigError::DuplicateRegistration(
				entity_type.name().to_string(),
			));
		}
		self.types
			.insert(entity_type.name().to_string(), entity_type);
		Ok(())
	}

	/// Looks up a descriptor by symbolic name.
	pub fn get(&self, name: &str) -> Result<&EntityType> {
		self.types
			.get(name)
			.ok_or_else(|| ResolveError::UnknownType(name.to_string()))
	}

	/// Returns true if the name is registered.
	pub fn contains(&self, name: &str) -> bool {
		self.types.contains_key(name)
	}

	pub fn len(&self) -> usize {
		self.types.len()
	}

	pub fn is_empty(&self) -> bool {
		self.types.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn registers_and_resolves_types() {
		let mut registry = TypeRegistry::new();
		registry
			.register(EntityType::new("doc", "root").unwrap())
			.unwrap();

		let doc = registry.get("doc").unwrap();
		assert_eq!(doc.name(), "doc");
		assert_eq!(doc.root_key(), "root");
		assert_eq!(doc.root_id().to_string(), "doc#root");
		assert!(doc.is_root_key("root"));
		assert!(!doc.is_root_key("leaf"));
	}

	#[test]
	fn duplicate_name_is_rejected_and_first_wins() {
		let mut registry = TypeRegistry::new();
		registry
			.register(EntityType::new("doc", "root").unwrap())
			.unwrap();

		let err = registry
			.register(EntityType::new("doc", "other_root").unwrap())
			.unwrap_err();
		assert!(matches!(err, ConfigError::DuplicateRegistration(name) if name == "doc"));

		// The original registration is still active.
		assert_eq!(registry.get("doc").unwrap().root_key(), "root");
		assert_eq!(registry.len(), 1);
	}

	#[test]
	fn unknown_name_fails_lookup() {
		let registry = TypeRegistry::new();
		assert!(registry.is_empty());
		let err = registry.get("doc").unwrap_err();
		assert!(matches!(err, ResolveError::UnknownType(name) if name == "doc"));
	}

	#[test]
	fn invalid_names_are_rejected_at_construction() {
		assert!(matches!(
			EntityType::new("", "root"),
			Err(ConfigError::InvalidEntityType(_))
		));
		assert!(matches!(
			EntityType::new("do#c", "root"),
			Err(ConfigError::InvalidEntityType(_))
		));
		assert!(matches!(
			EntityType::new("doc", ""),
			Err(ConfigError::InvalidEntityType(_))
		));
	}
}
