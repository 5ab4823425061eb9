// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Portable entity identifiers.
//!
//! Every authorizable entity is addressed by a string of the form
//! `"type#key"`, where `type` is a symbolic name registered with the
//! engine's type registry and `key` is the entity's primary-key value.
//! Multi-column primary keys are carried as a single key component joined
//! with `-`, e.g. `"membership#42-7"`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseEntityIdError;

/// Separator between the type name and the key in an encoded identifier.
pub const TYPE_SEPARATOR: char = '#';

/// Separator between the components of a composite primary key.
pub const KEY_SEPARATOR: char = '-';

/// Portable identifier of a hierarchy entity.
///
/// Serializes as its encoded string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId {
	type_name: String,
	key: String,
}

impl EntityId {
	/// Builds an identifier from its components. Both components must be
	/// non-empty and free of the type separator.
	pub fn new(
		type_name: impl Into<String>,
		key: impl Into<String>,
	) -> Result<Self, ParseEntityIdError> {
		let type_name = type_name.into();
		let key = key.into();
		for component in [&type_name, &key] {
			if component.is_empty() || component.contains(TYPE_SEPARATOR) {
				return Err(ParseEntityIdError::InvalidComponent(component.clone()));
			}
		}
		Ok(Self { type_name, key })
	}

	/// The registered symbolic type name.
	pub fn type_name(&self) -> &str {
		&self.type_name
	}

	/// The primary-key value, composite components still joined.
	pub fn key(&self) -> &str {
		&self.key
	}

	/// The primary-key components of a composite key. A simple key yields a
	/// single component.
	pub fn key_parts(&self) -> Vec<&str> {
		self.key.split(KEY_SEPARATOR).collect()
	}
}

impl fmt::Display for EntityId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}{}{}", self.type_name, TYPE_SEPARATOR, self.key)
	}
}

impl FromStr for EntityId {
	type Err = ParseEntityIdError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		if s.matches(TYPE_SEPARATOR).count() != 1 {
			return Err(ParseEntityIdError::Malformed(s.to_string()));
		}
		let (type_name, key) = s
			.split_once(TYPE_SEPARATOR)
			.ok_or_else(|| ParseEntityIdError::Malformed(s.to_string()))?;
		Self::new(type_name, key)
	}
}

impl TryFrom<String> for EntityId {
	type Error = ParseEntityIdError;

	fn try_from(s: String) -> Result<Self, Self::Error> {
		s.parse()
	}
}

impl From<EntityId> for String {
	fn from(id: EntityId) -> Self {
		id.to_string()
	}
}
