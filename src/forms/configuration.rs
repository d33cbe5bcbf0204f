//! Per-guild policy: display flags, ticket defaults, elevated users and the
//! accept/deny reasons offered to moderators.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::stores::codec;

pub const ACCEPT_PREFIX: &str = "accept_";
pub const DENY_PREFIX: &str = "deny_";
pub const MAX_LABEL_LENGTH: usize = 80;
pub const MAX_DESCRIPTION_LENGTH: usize = 100;
pub const MAX_SUFFIX_LENGTH: usize = 20;
pub const MIN_OPTIONS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionEmoji {
	pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownOption {
	pub label: String,
	pub value: String,
	pub description: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub emoji: Option<OptionEmoji>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropdownKind {
	Accept,
	Deny,
}

impl DropdownKind {
	pub fn prefix(&self) -> &'static str {
		match self {
			DropdownKind::Accept => ACCEPT_PREFIX,
			DropdownKind::Deny => DENY_PREFIX,
		}
	}

	pub fn of_value(value: &str) -> Option<DropdownKind> {
		if value.starts_with(ACCEPT_PREFIX) {
			Some(DropdownKind::Accept)
		} else if value.starts_with(DENY_PREFIX) {
			Some(DropdownKind::Deny)
		} else {
			None
		}
	}
}

/// Raw modal input for adding or editing a dropdown option.
#[derive(Debug, Clone, Default)]
pub struct OptionInput {
	pub label: String,
	pub description: String,
	pub suffix: String,
	pub emoji: Option<String>,
}

impl OptionInput {
	fn build(&self, kind: DropdownKind) -> Result<DropdownOption, String> {
		let label = self.label.trim();
		let description = self.description.trim();
		let suffix = self.suffix.trim().to_lowercase().split_whitespace().collect::<Vec<_>>().join("_");

		if label.is_empty() || label.chars().count() > MAX_LABEL_LENGTH {
			return Err(format!("Labels must be between 1 and {} characters.", MAX_LABEL_LENGTH));
		}
		if description.is_empty() || description.chars().count() > MAX_DESCRIPTION_LENGTH {
			return Err(format!("Descriptions must be between 1 and {} characters.", MAX_DESCRIPTION_LENGTH));
		}
		if suffix.is_empty() || suffix.chars().count() > MAX_SUFFIX_LENGTH {
			return Err(format!("Value suffixes must be between 1 and {} characters.", MAX_SUFFIX_LENGTH));
		}

		Ok(DropdownOption {
			label: label.to_string(),
			value: format!("{}{}", kind.prefix(), suffix),
			description: description.to_string(),
			emoji: self
				.emoji
				.as_deref()
				.map(str::trim)
				.filter(|e| !e.is_empty())
				.map(|e| OptionEmoji { name: e.to_string() }),
		})
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OppedEntry {
	pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opped {
	#[serde(default)]
	pub users: Vec<OppedEntry>,
	#[serde(default)]
	pub roles: Vec<OppedEntry>,
}

pub fn default_dropdown() -> Vec<DropdownOption> {
	vec![
		DropdownOption {
			label: "Accept".to_string(),
			value: "accept_approved".to_string(),
			description: "Accept the response".to_string(),
			emoji: Some(OptionEmoji { name: "✅".to_string() }),
		},
		DropdownOption {
			label: "Deny".to_string(),
			value: "deny_rejected".to_string(),
			description: "Deny the response".to_string(),
			emoji: Some(OptionEmoji { name: "❌".to_string() }),
		},
	]
}

#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
	pub server_id: u64,
	pub response_channel: Option<u64>,
	pub message: Option<String>,
	pub reacts: bool,
	pub embed: bool,
	pub opped: Opped,
	pub ticket_category: Option<u64>,
	pub ticket_message: Option<String>,
	pub ticket_roles: Vec<String>,
	pub autothread: bool,
	pub msg_ephemeral: bool,
	pub dropdown_options: Option<Vec<DropdownOption>>,
	pub(crate) loaded: Option<entity::GuildConfig>,
}

impl Configuration {
	/// Transient defaults for a guild without a stored row.
	pub fn defaults(server_id: u64) -> Self {
		Configuration {
			server_id,
			response_channel: None,
			message: None,
			reacts: true,
			embed: true,
			opped: Opped::default(),
			ticket_category: None,
			ticket_message: None,
			ticket_roles: vec![],
			autothread: false,
			msg_ephemeral: false,
			dropdown_options: None,
			loaded: None,
		}
	}

	pub fn is_persisted(&self) -> bool {
		self.loaded.is_some()
	}

	/// Options offered to moderators. The stored list wins over the defaults when set.
	pub fn dropdown(&self) -> Vec<DropdownOption> {
		self.dropdown_options.clone().unwrap_or_else(default_dropdown)
	}

	pub fn has_custom_dropdown(&self) -> bool {
		self.dropdown_options.is_some()
	}

	pub fn dropdown_option(&self, value: &str) -> Option<DropdownOption> {
		self.dropdown().into_iter().find(|opt| opt.value == value)
	}

	pub fn add_option(&mut self, kind: DropdownKind, input: &OptionInput) -> Result<DropdownOption, String> {
		let option = input.build(kind)?;
		let mut options = self.dropdown();
		if options.iter().any(|o| o.value == option.value) {
			return Err(format!("An option with the value `{}` already exists.", option.value));
		}

		options.push(option.clone());
		self.dropdown_options = Some(options);
		Ok(option)
	}

	/// Replaces the option at `index`, keeping its accept/deny prefix.
	pub fn edit_option(&mut self, index: usize, input: &OptionInput) -> Result<DropdownOption, String> {
		let mut options = self.dropdown();
		let Some(current) = options.get(index) else {
			return Err("Invalid option selected.".to_string());
		};

		let kind = DropdownKind::of_value(&current.value).unwrap_or(DropdownKind::Deny);
		let option = input.build(kind)?;
		if options.iter().enumerate().any(|(i, o)| i != index && o.value == option.value) {
			return Err(format!("An option with the value `{}` already exists.", option.value));
		}

		options[index] = option.clone();
		self.dropdown_options = Some(options);
		Ok(option)
	}

	/// Applies a new order. `order` must name every current index exactly once; nothing changes otherwise.
	pub fn reorder_options(&mut self, order: &[usize]) -> Result<(), String> {
		let options = self.dropdown();
		if options.len() < MIN_OPTIONS {
			return Err("You need at least 2 options to reorder them. Use `/config dropdown add-accept` or `/config dropdown add-deny` to create more options.".to_string());
		}

		let unique: HashSet<usize> = order.iter().copied().collect();
		if order.len() != options.len() || unique.len() != order.len() || order.iter().any(|i| *i >= options.len()) {
			return Err("Error: You must select all options to reorder them.".to_string());
		}

		self.dropdown_options = Some(order.iter().map(|i| options[*i].clone()).collect());
		Ok(())
	}

	/// Removes the options at `indices` and returns their labels.
	pub fn remove_options(&mut self, indices: &[usize]) -> Result<Vec<String>, String> {
		let mut options = match &self.dropdown_options {
			Some(options) if options.len() > MIN_OPTIONS => options.clone(),
			_ => {
				return Err(
					"No custom options to remove. Use `/config dropdown view` to see current options.".to_string(),
				)
			},
		};

		let mut indices: Vec<usize> = indices.iter().copied().filter(|i| *i < options.len()).collect();
		indices.sort_unstable_by(|a, b| b.cmp(a));
		indices.dedup();

		let mut removed = vec![];
		for index in indices {
			removed.push(options.remove(index).label);
		}
		removed.reverse();

		self.dropdown_options = if options.is_empty() { None } else { Some(options) };
		Ok(removed)
	}

	pub fn reset_dropdown(&mut self) {
		self.dropdown_options = None;
	}

	pub fn is_opped(&self, user_id: u64, role_ids: &[u64]) -> bool {
		let user = user_id.to_string();
		self.opped.users.iter().any(|u| u.id == user)
			|| self
				.opped
				.roles
				.iter()
				.any(|r| role_ids.iter().any(|id| id.to_string() == r.id))
	}

	pub fn from_model(model: entity::GuildConfig) -> Self {
		Configuration {
			server_id: model.uid,
			response_channel: model.response_channel,
			message: model.message.clone(),
			reacts: model.reacts,
			embed: model.embed,
			opped: codec::decode_or(model.opped.as_deref(), "guild_config.opped", Opped::default),
			ticket_category: model.ticket_category,
			ticket_message: model.ticket_message.clone(),
			ticket_roles: codec::decode_or(model.ticket_roles.as_deref(), "guild_config.ticket_roles", Vec::new),
			autothread: model.autothread,
			msg_ephemeral: model.msg_ephemeral,
			dropdown_options: codec::decode_or(
				model.dropdown_options.as_deref(),
				"guild_config.dropdown_options",
				|| None,
			),
			loaded: Some(model),
		}
	}

	pub fn to_model(&self) -> entity::GuildConfig {
		entity::GuildConfig {
			uid: self.server_id,
			response_channel: self.response_channel,
			message: self.message.clone(),
			reacts: self.reacts,
			embed: self.embed,
			opped: Some(codec::encode(&self.opped, "guild_config.opped")),
			ticket_category: self.ticket_category,
			ticket_message: self.ticket_message.clone(),
			ticket_roles: Some(codec::encode(&self.ticket_roles, "guild_config.ticket_roles")),
			autothread: self.autothread,
			msg_ephemeral: self.msg_ephemeral,
			dropdown_options: codec::encode_opt(&self.dropdown_options, "guild_config.dropdown_options"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn input(label: &str, suffix: &str) -> OptionInput {
		OptionInput {
			label: label.into(),
			description: format!("{} description", label),
			suffix: suffix.into(),
			emoji: None,
		}
	}

	fn values(config: &Configuration) -> Vec<String> {
		config.dropdown().into_iter().map(|o| o.value).collect()
	}

	#[test]
	fn defaults_have_two_options() {
		let config = Configuration::defaults(7);
		assert_eq!(values(&config), vec!["accept_approved", "deny_rejected"]);
		assert!(!config.msg_ephemeral);
		assert!(!config.is_persisted());
		assert!(config.reacts && config.embed);
	}

	#[test]
	fn add_normalises_suffix_and_rejects_duplicates() {
		let mut config = Configuration::defaults(7);
		let added = config.add_option(DropdownKind::Deny, &input("Not ready", "Not  Ready")).unwrap();
		assert_eq!(added.value, "deny_not_ready");
		assert!(config.add_option(DropdownKind::Deny, &input("Again", "not ready")).is_err());
		assert_eq!(config.dropdown().len(), 3);
	}

	#[test]
	fn add_checks_lengths() {
		let mut config = Configuration::defaults(7);
		assert!(config.add_option(DropdownKind::Accept, &input(&"x".repeat(81), "ok")).is_err());
		assert!(config.add_option(DropdownKind::Accept, &input("ok", &"y".repeat(21))).is_err());
		assert!(config.dropdown_options.is_none());
	}

	#[test]
	fn edit_keeps_prefix() {
		let mut config = Configuration::defaults(7);
		let edited = config.edit_option(0, &input("Welcome", "welcome")).unwrap();
		assert_eq!(edited.value, "accept_welcome");
		assert!(config.edit_option(5, &input("Nope", "nope")).is_err());
	}

	#[test]
	fn reorder_requires_full_permutation() {
		let mut config = Configuration::defaults(7);
		config.add_option(DropdownKind::Accept, &input("Trial", "trial")).unwrap();
		let before = config.dropdown_options.clone();

		assert!(config.reorder_options(&[0, 2]).is_err());
		assert!(config.reorder_options(&[0, 0, 1]).is_err());
		assert!(config.reorder_options(&[0, 1, 3]).is_err());
		assert_eq!(config.dropdown_options, before);

		config.reorder_options(&[2, 0, 1]).unwrap();
		assert_eq!(values(&config), vec!["accept_trial", "accept_approved", "deny_rejected"]);
	}

	#[test]
	fn dropdown_survives_storage() {
		let mut config = Configuration::defaults(7);
		config.add_option(DropdownKind::Deny, &input("Spam", "spam")).unwrap();
		config.edit_option(1, &input("Rejected", "rejected")).unwrap();
		config.reorder_options(&[2, 1, 0]).unwrap();

		let reloaded = Configuration::from_model(config.to_model());
		assert_eq!(reloaded.dropdown_options, config.dropdown_options);
	}

	#[test]
	fn removal_keeps_the_floor() {
		let mut config = Configuration::defaults(7);
		assert_eq!(
			config.remove_options(&[1]).unwrap_err(),
			"No custom options to remove. Use `/config dropdown view` to see current options."
		);

		config.add_option(DropdownKind::Deny, &input("Spam", "spam")).unwrap();
		config.add_option(DropdownKind::Deny, &input("Late", "late")).unwrap();
		let removed = config.remove_options(&[3, 1, 3]).unwrap();
		assert_eq!(removed, vec!["Deny", "Late"]);
		assert_eq!(values(&config), vec!["accept_approved", "deny_spam"]);
	}

	#[test]
	fn opped_matches_users_and_roles() {
		let mut config = Configuration::defaults(7);
		config.opped.users.push(OppedEntry { id: "11".into() });
		config.opped.roles.push(OppedEntry { id: "22".into() });
		assert!(config.is_opped(11, &[]));
		assert!(config.is_opped(12, &[5, 22]));
		assert!(!config.is_opped(12, &[5]));
	}

	#[test]
	fn corrupt_opped_falls_back() {
		let mut model = Configuration::defaults(7).to_model();
		model.opped = Some("[1,2".into());
		model.ticket_roles = Some("not json".into());
		let config = Configuration::from_model(model);
		assert_eq!(config.opped, Opped::default());
		assert!(config.ticket_roles.is_empty());
	}
}
