//! Side effects that run when a response crosses a lifecycle event.
//!
//! Actions are registered explicitly in [`ActionRegistry::with_defaults`]. Each
//! one declares the events it may run on and a priority; lower priorities run
//! first. `setup` runs once when an admin attaches the action to a form and
//! produces the data stored with it, `handler` runs at event time and
//! `transform` renders the stored data for previews and audit logs.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ActionError;
use crate::forms::form::StoredAction;
use crate::forms::{ActionEvent, Configuration, Form, Response};
use crate::gateway::{ChannelInfo, GuildGateway, SetupPrompter};

pub mod pipeline;
pub mod role;
pub mod tag;
pub mod ticket;

pub use pipeline::{ActionFailure, PipelineReport};

pub struct ExecutionContext<'a> {
	pub response: &'a Response,
	pub form: &'a Form,
	pub config: &'a Configuration,
	pub member: u64,
	pub guild: u64,
	pub action: &'a StoredAction,
	pub client: &'a dyn GuildGateway,
}

pub struct SetupContext<'a> {
	pub guild: u64,
	pub form: &'a Form,
	pub event: ActionEvent,
	/// The form's response channel, if it could be resolved.
	pub channel: Option<&'a ChannelInfo>,
	pub config: &'a Configuration,
	pub prompter: &'a dyn SetupPrompter,
}

pub struct TransformContext<'a> {
	pub event: ActionEvent,
	pub channel: Option<&'a ChannelInfo>,
	pub form: Option<&'a Form>,
	pub config: Option<&'a Configuration>,
}

impl<'a> TransformContext<'a> {
	pub fn bare(event: ActionEvent) -> Self {
		TransformContext {
			event,
			channel: None,
			form: None,
			config: None,
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub enum SetupOutcome {
	Success(Value),
	Failure(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayField {
	pub label: String,
	pub value: String,
}

impl DisplayField {
	pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
		DisplayField {
			label: label.into(),
			value: value.into(),
		}
	}
}

#[async_trait]
pub trait Action: Send + Sync {
	fn id(&self) -> &'static str;
	fn description(&self) -> &'static str;
	fn events(&self) -> &'static [ActionEvent];
	fn priority(&self) -> i32;

	async fn setup(&self, ctx: &SetupContext<'_>) -> SetupOutcome;
	async fn handler(&self, ctx: &ExecutionContext<'_>) -> Result<(), ActionError>;
	fn transform(&self, data: &Value, ctx: &TransformContext<'_>) -> Vec<DisplayField>;

	fn supports(&self, event: ActionEvent) -> bool {
		self.events().contains(&event)
	}
}

/// Type and event fields every transform starts with.
pub fn common_fields(action: &dyn Action, event: ActionEvent) -> Vec<DisplayField> {
	vec![DisplayField::new("Type", action.id()), DisplayField::new("Event", event.as_str())]
}

/// Reads a list of snowflakes stored as strings under `key`.
pub fn snowflakes(data: &Value, key: &str) -> Result<Vec<u64>, ActionError> {
	let Some(items) = data.get(key).and_then(Value::as_array) else {
		return Ok(vec![]);
	};

	items
		.iter()
		.map(|item| match item {
			Value::String(s) => s.parse::<u64>().ok(),
			Value::Number(n) => n.as_u64(),
			_ => None,
		})
		.map(|id| id.ok_or_else(|| ActionError::InvalidData(format!("`{}` holds an invalid id", key))))
		.collect()
}

pub struct ActionRegistry {
	actions: Vec<Box<dyn Action>>,
}

impl ActionRegistry {
	pub fn empty() -> Self {
		ActionRegistry { actions: vec![] }
	}

	pub fn with_defaults() -> Self {
		let mut registry = ActionRegistry::empty();
		registry.register(Box::new(tag::TagAdd));
		registry.register(Box::new(role::RoleAction::add()));
		registry.register(Box::new(role::RoleAction::remove()));
		registry.register(Box::new(ticket::TicketCreate));
		registry
	}

	/// Adds an action. A later registration with the same id replaces the earlier one.
	pub fn register(&mut self, action: Box<dyn Action>) {
		self.actions.retain(|existing| existing.id() != action.id());
		self.actions.push(action);
	}

	pub fn get(&self, id: &str) -> Option<&dyn Action> {
		self.actions.iter().find(|action| action.id() == id).map(|action| action.as_ref())
	}

	/// Actions that can be attached to `event`.
	pub fn for_event(&self, event: ActionEvent) -> Vec<&dyn Action> {
		self.actions.iter().filter(|a| a.supports(event)).map(|a| a.as_ref()).collect()
	}

	pub fn all(&self) -> impl Iterator<Item = &dyn Action> {
		self.actions.iter().map(|action| action.as_ref())
	}

	/// Display fields for one stored action. Unknown action ids render as a bare type line.
	pub fn describe(&self, stored: &StoredAction, ctx: &TransformContext<'_>) -> Vec<DisplayField> {
		match self.get(&stored.kind) {
			Some(action) => action.transform(&stored.data, ctx),
			None => vec![
				DisplayField::new("Type", format!("{} (unknown)", stored.kind)),
				DisplayField::new("Event", ctx.event.as_str()),
			],
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn defaults_are_registered() {
		let registry = ActionRegistry::with_defaults();
		for id in ["tag.add", "role.add", "role.remove", "ticket.create"] {
			assert!(registry.get(id).is_some(), "{} missing", id);
		}
		let apply: Vec<&str> = registry.for_event(ActionEvent::Apply).iter().map(|a| a.id()).collect();
		assert_eq!(apply, vec!["role.add", "role.remove"]);
	}

	#[test]
	fn snowflakes_accept_strings_and_numbers() {
		assert_eq!(snowflakes(&json!({ "roles": ["1", 2] }), "roles").unwrap(), vec![1, 2]);
		assert!(snowflakes(&json!({}), "roles").unwrap().is_empty());
		assert!(snowflakes(&json!({ "roles": ["x"] }), "roles").is_err());
	}

	#[test]
	fn unknown_actions_still_describe() {
		let registry = ActionRegistry::with_defaults();
		let fields = registry.describe(&StoredAction::new("hook.send", json!({})), &TransformContext::bare(ActionEvent::Deny));
		assert_eq!(fields[0].value, "hook.send (unknown)");
	}
}
