//! JSON encoding for the text columns that hold structured values.
//!
//! Reads never fail: an empty, corrupt or legacy value decodes to the caller's
//! fallback and is logged.

use log::{error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub fn decode_or<T, F>(raw: Option<&str>, column: &str, fallback: F) -> T
where
	T: DeserializeOwned,
	F: FnOnce() -> T,
{
	let raw = match raw.map(str::trim) {
		None | Some("") | Some("null") => return fallback(),
		Some(raw) => raw,
	};

	match serde_json::from_str::<T>(raw) {
		Ok(value) => value,
		Err(error) => {
			warn!("column `{}` holds an unreadable value ({}), using default", column, error);
			fallback()
		},
	}
}

pub fn encode<T: Serialize>(value: &T, column: &str) -> String {
	serde_json::to_string(value).unwrap_or_else(|error| {
		error!("column `{}` could not be encoded: {}", column, error);
		String::from("null")
	})
}

pub fn encode_opt<T: Serialize>(value: &Option<T>, column: &str) -> Option<String> {
	value.as_ref().map(|v| encode(v, column))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn corrupt_values_fall_back() {
		let roles: Vec<String> = decode_or(Some("[\"1\", "), "ticket_roles", Vec::new);
		assert!(roles.is_empty());
	}

	#[test]
	fn empty_and_null_fall_back() {
		let a: Vec<String> = decode_or(Some(""), "ticket_roles", || vec!["x".into()]);
		let b: Vec<String> = decode_or(Some("null"), "ticket_roles", || vec!["y".into()]);
		let c: Vec<String> = decode_or(None, "ticket_roles", || vec!["z".into()]);
		assert_eq!(a, vec!["x"]);
		assert_eq!(b, vec!["y"]);
		assert_eq!(c, vec!["z"]);
	}

	#[test]
	fn values_survive_reencoding() {
		let roles = vec!["300".to_string(), "100".to_string(), "200".to_string()];
		let raw = encode(&roles, "ticket_roles");
		let again: Vec<String> = decode_or(Some(&raw), "ticket_roles", Vec::new);
		assert_eq!(again, roles);
		assert_eq!(encode(&again, "ticket_roles"), raw);
	}
}
