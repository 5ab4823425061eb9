// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Rules and subjects.
//!
//! A [`Rule`] attaches a polarity to an (entity, action, subject) triple.
//! The subject side of a rule is a [`SubjectMatch`]: either one subject
//! named exactly, or a whole subject class. The requester is described by a
//! [`Subject`], carrying its identifier and the classes it belongs to.
//!
//! Rules arrive from a rule loader as an unordered collection per entity;
//! nothing here assumes an ordering.

use serde::{Deserialize, Serialize};

use crate::entity::EntityId;
use crate::policy::Policy;

/// The subject selector of a rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectMatch {
	/// Matches a single subject by its identifier.
	User(String),

	/// Matches every subject belonging to the named class.
	Group(String),
}

impl SubjectMatch {
	/// Returns true if the selector applies to the given subject.
	pub fn matches(&self, subject: &Subject) -> bool {
		match self {
			SubjectMatch::User(id) => subject.id == *id,
			SubjectMatch::Group(name) => subject.in_group(name),
		}
	}

	/// True for an exact-subject selector. Exact selectors outrank group
	/// selectors within one hierarchy level.
	pub fn is_exact(&self) -> bool {
		matches!(self, SubjectMatch::User(_))
	}
}

/// Attributes describing the subject requesting access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
	pub id: String,
	pub groups: Vec<String>,
}

impl Subject {
	/// Creates a subject with no group memberships.
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			groups: Vec::new(),
		}
	}

	/// Builder: add a group membership.
	pub fn with_group(mut self, group: impl Into<String>) -> Self {
		self.groups.push(group.into());
		self
	}

	/// Returns true if the subject belongs to the named group.
	pub fn in_group(&self, group: &str) -> bool {
		self.groups.iter().any(|g| g == group)
	}
}

/// A single authorization rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
	/// The entity the rule is attached to.
	pub entity: EntityId,

	/// The action the rule governs.
	pub action: String,

	/// The subjects the rule applies to.
	pub subject: SubjectMatch,

	/// Polarity of the rule.
	pub policy: Policy,
}

impl Rule {
	pub fn new(
		entity: EntityId,
		action: impl Into<String>,
		subject: SubjectMatch,
		policy: Policy,
	) -> Self {
		Self {
			entity,
			action: action.into(),
			subject,
			policy,
		}
	}

	/// Creates an allow rule.
	pub fn allow(entity: EntityId, action: impl Into<String>, subject: SubjectMatch) -> Self {
		Self::new(entity, action, subject, Policy::Allow)
	}

	/// Creates a deny rule.
	pub fn deny(entity: EntityId, action: impl Into<String>, subject: SubjectMatch) -> Self {
		Self::new(entity, action, subject, Policy::Deny)
	}

	/// Returns true if the rule applies to the given action and subject.
	pub fn matches(&self, action: &str, subject: &Subject) -> bool {
		self.action == action && self.subject.matches(subject)
	}
}
