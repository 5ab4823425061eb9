// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the resolution engine.
//!
//! Two families:
//!
//! - [`ConfigError`]: raised while the engine is being set up (registrations,
//!   policy configuration). Fatal to the call that raised them.
//! - [`ResolveError`]: raised while evaluating an authorization request.
//!   A resolve error is never a decision; callers that want fail-closed
//!   behavior treat it as a deny at the call site, but the engine reports it
//!   distinctly so "could not evaluate" can be logged and alerted on
//!   separately from an ordinary deny.
//!
//! Nothing here is retried internally; retry policy belongs to the rule and
//! entity collaborators.

use heddle_core::{EntityId, ParseEntityIdError, ParsePolicyError};
use thiserror::Error;

/// Setup-time configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("entity type '{0}' is already registered")]
	DuplicateRegistration(String),

	#[error("invalid entity type: {0}")]
	InvalidEntityType(#[from] ParseEntityIdError),

	#[error("invalid policy: {0}")]
	InvalidPolicy(#[from] ParsePolicyError),
}

/// Errors raised while resolving an authorization request.
#[derive(Debug, Error)]
pub enum ResolveError {
	#[error(transparent)]
	MalformedIdentifier(#[from] ParseEntityIdError),

	#[error("unknown entity type '{0}'")]
	UnknownType(String),

	#[error("unknown element '{key}' of entity type '{type_name}'")]
	UnknownElement { type_name: String, key: String },

	#[error("unrecognized action '{0}'")]
	InvalidAction(String),

	#[error("hierarchy depth cap exceeded at depth {depth} while resolving '{entity}': the hierarchy contains a cycle")]
	HierarchyCycle { entity: EntityId, depth: usize },

	/// A rule or entity collaborator reported a failure, or returned data
	/// inconsistent with the request.
	#[error("backend error: {0}")]
	Backend(String),
}

/// Result type alias for resolution operations.
pub type Result<T> = std::result::Result<T, ResolveError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn malformed_identifier_message_is_transparent() {
		let parse_err = "foobar".parse::<EntityId>().unwrap_err();
		let err = ResolveError::from(parse_err.clone());
		assert_eq!(err.to_string(), parse_err.to_string());
	}

	#[test]
	fn cycle_error_names_the_entity() {
		let err = ResolveError::HierarchyCycle {
			entity: EntityId::new("doc", "a").unwrap(),
			depth: 64,
		};
		assert!(err.to_string().contains("doc#a"));
		assert!(err.to_string().contains("64"));
	}

	#[test]
	fn duplicate_registration_names_the_type() {
		let err = ConfigError::DuplicateRegistration("doc".to_string());
		assert_eq!(err.to_string(), "entity type 'doc' is already registered");
	}
}
