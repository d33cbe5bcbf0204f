use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Lifecycle trigger points at which configured actions run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActionEvent {
	Apply,
	Submit,
	Accept,
	Deny,
}

impl ActionEvent {
	pub const ALL: [ActionEvent; 4] = [ActionEvent::Apply, ActionEvent::Submit, ActionEvent::Accept, ActionEvent::Deny];

	pub fn as_str(&self) -> &'static str {
		match self {
			ActionEvent::Apply => "APPLY",
			ActionEvent::Submit => "SUBMIT",
			ActionEvent::Accept => "ACCEPT",
			ActionEvent::Deny => "DENY",
		}
	}

	pub fn parse(value: &str) -> Option<ActionEvent> {
		ActionEvent::ALL
			.into_iter()
			.find(|event| event.as_str().eq_ignore_ascii_case(value.trim()))
	}
}

impl Display for ActionEvent {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parse_is_case_insensitive() {
		assert_eq!(ActionEvent::parse("accept"), Some(ActionEvent::Accept));
		assert_eq!(ActionEvent::parse(" DENY "), Some(ActionEvent::Deny));
		assert_eq!(ActionEvent::parse("review"), None);
	}

	#[test]
	fn serializes_upper_case() {
		assert_eq!(serde_json::to_string(&ActionEvent::Submit).unwrap(), "\"SUBMIT\"");
	}
}
