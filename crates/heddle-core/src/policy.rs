// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Policy values and resolver configuration.
//!
//! A [`Policy`] is both the polarity carried by a rule and the outcome of an
//! authorization decision. [`PolicyConfig`] holds the two settings that make
//! every decision total:
//!
//! - `default_policy`: applied when no rule at any hierarchy level matches
//! - `preferred_policy`: tie-break when rules at the winning level disagree

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParsePolicyError;

/// Outcome of an authorization decision, and the polarity carried by rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
	Allow,
	Deny,
}

impl Policy {
	/// Returns true for [`Policy::Allow`].
	pub fn is_allow(self) -> bool {
		self == Policy::Allow
	}

	/// Returns true for [`Policy::Deny`].
	pub fn is_deny(self) -> bool {
		self == Policy::Deny
	}
}

impl fmt::Display for Policy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Policy::Allow => write!(f, "allow"),
			Policy::Deny => write!(f, "deny"),
		}
	}
}

impl FromStr for Policy {
	type Err = ParsePolicyError;

	/// Parses a policy name. Surrounding whitespace is trimmed and the match
	/// is case-insensitive, so `" ALLOW "` and `"deny"` both parse.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"allow" => Ok(Policy::Allow),
			"deny" => Ok(Policy::Deny),
			_ => Err(ParsePolicyError::new(s)),
		}
	}
}

/// Conflict-resolution configuration for the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
	/// Applied when no rule at any hierarchy level matches.
	pub default_policy: Policy,

	/// Applied when the winning hierarchy level carries both an allow and a
	/// deny rule for the same request.
	pub preferred_policy: Policy,
}

impl PolicyConfig {
	pub fn new(default_policy: Policy, preferred_policy: Policy) -> Self {
		Self {
			default_policy,
			preferred_policy,
		}
	}

	/// Parses both policy values from their string forms.
	pub fn parse(default_policy: &str, preferred_policy: &str) -> Result<Self, ParsePolicyError> {
		Ok(Self {
			default_policy: default_policy.parse()?,
			preferred_policy: preferred_policy.parse()?,
		})
	}
}

impl Default for PolicyConfig {
	fn default() -> Self {
		Self {
			default_policy: Policy::Deny,
			preferred_policy: Policy::Allow,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn parses_canonical_names() {
		assert_eq!("allow".parse::<Policy>(), Ok(Policy::Allow));
		assert_eq!("deny".parse::<Policy>(), Ok(Policy::Deny));
	}

	#[test]
	fn parsing_trims_and_ignores_case() {
		assert_eq!(" ALLOW ".parse::<Policy>(), Ok(Policy::Allow));
		assert_eq!("Deny".parse::<Policy>(), Ok(Policy::Deny));
	}

	#[test]
	fn rejects_unknown_values() {
		let err = "maybe".parse::<Policy>().unwrap_err();
		assert_eq!(err.value(), "maybe");
	}

	#[test]
	fn default_config_denies_by_default_and_prefers_allow() {
		let config = PolicyConfig::default();
		assert_eq!(config.default_policy, Policy::Deny);
		assert_eq!(config.preferred_policy, Policy::Allow);
	}

	#[test]
	fn config_parses_from_strings() {
		let config = PolicyConfig::parse("ALLOW", "deny").unwrap();
		assert_eq!(config.default_policy, Policy::Allow);
		assert_eq!(config.preferred_policy, Policy::Deny);

		assert!(PolicyConfig::parse("allow", "sometimes").is_err());
	}

	#[test]
	fn serializes_as_snake_case() {
		assert_eq!(serde_json::to_string(&Policy::Allow).unwrap(), "\"allow\"");
		assert_eq!(serde_json::to_string(&Policy::Deny).unwrap(), "\"deny\"");
	}

	#[test]
	fn config_deserializes_with_field_defaults() {
		let config: PolicyConfig = serde_json::from_str("{}").unwrap();
		assert_eq!(config, PolicyConfig::default());

		let config: PolicyConfig =
			serde_json::from_str(r#"{"default_policy":"allow"}"#).unwrap();
		assert_eq!(config.default_policy, Policy::Allow);
		assert_eq!(config.preferred_policy, Policy::Allow);
	}

	proptest! {
		#[test]
		fn display_round_trips_through_parse(policy in prop_oneof![Just(Policy::Allow), Just(Policy::Deny)]) {
			let parsed: Policy = policy.to_string().parse().unwrap();
			prop_assert_eq!(parsed, policy);
		}

		#[test]
		fn arbitrary_words_do_not_parse(s in "[a-z]{1,12}") {
			prop_assume!(s != "allow" && s != "deny");
			prop_assert!(s.parse::<Policy>().is_err());
		}
	}
}
