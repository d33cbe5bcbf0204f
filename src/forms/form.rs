use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::forms::event::ActionEvent;
use crate::forms::question::{Question, QuestionKind};
use crate::stores::codec;

pub const MAX_QUESTIONS: usize = 20;
pub const MAX_QUESTION_LENGTH: usize = 256;
pub const MAX_DESCRIPTION_LENGTH: usize = 2048;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleOp {
	Add,
	Remove,
}

impl RoleOp {
	pub fn action_id(&self) -> &'static str {
		match self {
			RoleOp::Add => "role.add",
			RoleOp::Remove => "role.remove",
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAction {
	pub id: String,
	pub action: RoleOp,
}

/// One configured action: the registered action id and the data its setup produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredAction {
	#[serde(rename = "type")]
	pub kind: String,
	#[serde(default)]
	pub data: Value,
}

impl StoredAction {
	pub fn new(kind: impl Into<String>, data: Value) -> Self {
		StoredAction {
			kind: kind.into(),
			data,
		}
	}
}

pub type RoleMap = BTreeMap<ActionEvent, Vec<RoleAction>>;
pub type ActionMap = BTreeMap<ActionEvent, Vec<StoredAction>>;

#[derive(Deserialize)]
struct LegacyRole {
	id: String,
	#[serde(default)]
	events: Vec<String>,
	#[serde(default)]
	action: Option<RoleOp>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RolesColumn {
	Current(RoleMap),
	Legacy(Vec<LegacyRole>),
}

/// Reads the `roles` column, migrating the old `[{id, events}]` layout to the per-event map.
pub fn decode_roles(raw: &str) -> RoleMap {
	match codec::decode_or(Some(raw), "form.roles", || RolesColumn::Current(RoleMap::new())) {
		RolesColumn::Current(map) => map,
		RolesColumn::Legacy(list) => {
			let mut map = RoleMap::new();
			for role in list {
				for event in role.events.iter().filter_map(|e| ActionEvent::parse(e)) {
					map.entry(event).or_default().push(RoleAction {
						id: role.id.clone(),
						action: role.action.unwrap_or(RoleOp::Add),
					});
				}
			}
			map
		},
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawQuestion {
	#[serde(default)]
	pub value: Option<String>,
	#[serde(rename = "type", default)]
	pub kind: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub required: Option<bool>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub choices: Vec<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub required_domain: Option<String>,
}

impl From<&Question> for RawQuestion {
	fn from(question: &Question) -> Self {
		RawQuestion {
			value: Some(question.value.clone()),
			kind: Some(question.kind.code().to_string()),
			required: Some(question.required),
			choices: question.choices.clone(),
			required_domain: question.required_domain.clone(),
		}
	}
}

/// Portable form shape used by import and export. Guild specific data is never part of it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormDraft {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub hid: Option<String>,
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default)]
	pub description: Option<String>,
	#[serde(default)]
	pub questions: Vec<RawQuestion>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub color: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub emoji: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub open: Option<bool>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub cooldown: Option<i64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub post_icon: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub post_banner: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub button_text: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub button_style: Option<u8>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub ticket_msg: Option<String>,
}

/// Checks a draft for create or import and returns its typed questions.
pub fn verify(draft: &FormDraft) -> Result<Vec<Question>, String> {
	if draft.questions.is_empty() {
		return Err("Questions must be present".to_string());
	}
	if draft.questions.len() > MAX_QUESTIONS {
		return Err(format!("Max of {} questions per form", MAX_QUESTIONS));
	}

	let mut questions = Vec::with_capacity(draft.questions.len());
	for raw in &draft.questions {
		let value = raw.value.as_deref().map(str::trim).unwrap_or_default();
		if value.is_empty() {
			return Err("Questions must have a value".to_string());
		}
		if value.chars().count() > MAX_QUESTION_LENGTH {
			return Err(format!("Questions must be {} characters or less", MAX_QUESTION_LENGTH));
		}
		let Some(kind) = raw.kind.as_deref().and_then(QuestionKind::from_code) else {
			return Err("Questions must have a valid type".to_string());
		};
		if matches!(kind, QuestionKind::MultipleChoice | QuestionKind::Checkbox) && raw.choices.is_empty() {
			return Err("Choice questions must have at least one choice".to_string());
		}

		questions.push(Question {
			value: value.to_string(),
			kind,
			required: raw.required.unwrap_or(true),
			choices: raw.choices.clone(),
			required_domain: raw.required_domain.clone(),
		});
	}

	if draft.name.as_deref().map(str::trim).unwrap_or_default().is_empty() {
		return Err("Form must have a name".to_string());
	}
	if draft.description.as_deref().unwrap_or_default().chars().count() > MAX_DESCRIPTION_LENGTH {
		return Err(format!("Description must be {} chars or less", MAX_DESCRIPTION_LENGTH));
	}

	Ok(questions)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Form {
	pub id: Option<u64>,
	pub server_id: u64,
	pub hid: String,
	pub name: String,
	pub description: String,
	pub questions: Vec<Question>,
	pub channel_id: Option<u64>,
	pub roles: RoleMap,
	pub actions: ActionMap,
	pub message: Option<String>,
	pub color: Option<String>,
	pub emoji: Option<String>,
	pub open: bool,
	pub cooldown: Option<i64>,
	pub post_icon: Option<String>,
	pub post_banner: Option<String>,
	pub button_text: Option<String>,
	pub button_style: Option<u8>,
	pub tickets_id: Option<u64>,
	pub ticket_msg: Option<String>,
	pub ticket_roles: Vec<String>,
	pub(crate) loaded: Option<entity::Form>,
}

impl Form {
	pub fn new(server_id: u64, hid: impl Into<String>, name: impl Into<String>, questions: Vec<Question>) -> Self {
		Form {
			id: None,
			server_id,
			hid: hid.into(),
			name: name.into(),
			description: String::new(),
			questions,
			channel_id: None,
			roles: RoleMap::new(),
			actions: ActionMap::new(),
			message: None,
			color: None,
			emoji: None,
			open: true,
			cooldown: None,
			post_icon: None,
			post_banner: None,
			button_text: None,
			button_style: None,
			tickets_id: None,
			ticket_msg: None,
			ticket_roles: vec![],
			loaded: None,
		}
	}

	pub fn from_draft(server_id: u64, hid: impl Into<String>, draft: &FormDraft, questions: Vec<Question>) -> Self {
		let mut form = Form::new(server_id, hid, String::new(), vec![]);
		form.apply_draft(draft, questions);
		form
	}

	/// Overwrites the fields the draft carries. Fields the draft leaves out keep their value.
	pub fn apply_draft(&mut self, draft: &FormDraft, questions: Vec<Question>) {
		self.questions = questions;
		if let Some(name) = &draft.name {
			self.name = name.trim().to_string();
		}
		if let Some(description) = &draft.description {
			self.description = description.clone();
		}
		if let Some(open) = draft.open {
			self.open = open;
		}
		macro_rules! overwrite {
			($($field:ident),*) => {
				$(if draft.$field.is_some() {
					self.$field = draft.$field.clone();
				})*
			};
		}
		overwrite!(message, color, emoji, cooldown, post_icon, post_banner, button_text, button_style, ticket_msg);
	}

	pub fn to_draft(&self) -> FormDraft {
		FormDraft {
			hid: Some(self.hid.clone()),
			name: Some(self.name.clone()),
			description: Some(self.description.clone()),
			questions: self.questions.iter().map(RawQuestion::from).collect(),
			message: self.message.clone(),
			color: self.color.clone(),
			emoji: self.emoji.clone(),
			open: Some(self.open),
			cooldown: self.cooldown,
			post_icon: self.post_icon.clone(),
			post_banner: self.post_banner.clone(),
			button_text: self.button_text.clone(),
			button_style: self.button_style,
			ticket_msg: self.ticket_msg.clone(),
		}
	}

	pub fn from_model(model: entity::Form) -> Self {
		Form {
			id: Some(model.id),
			server_id: model.server_id,
			hid: model.hid.clone(),
			name: model.name.clone(),
			description: model.description.clone(),
			questions: codec::decode_or(Some(&model.questions), "form.questions", Vec::new),
			channel_id: model.channel_id,
			roles: decode_roles(&model.roles),
			actions: codec::decode_or(Some(&model.actions), "form.actions", ActionMap::new),
			message: model.message.clone(),
			color: model.color.clone(),
			emoji: model.emoji.clone(),
			open: model.open,
			cooldown: model.cooldown,
			post_icon: model.post_icon.clone(),
			post_banner: model.post_banner.clone(),
			button_text: model.button_text.clone(),
			button_style: model.button_style,
			tickets_id: model.tickets_id,
			ticket_msg: model.ticket_msg.clone(),
			ticket_roles: codec::decode_or(Some(&model.ticket_roles), "form.ticket_roles", Vec::new),
			loaded: Some(model),
		}
	}

	pub fn to_model(&self) -> entity::Form {
		entity::Form {
			id: self.id.unwrap_or_default(),
			server_id: self.server_id,
			hid: self.hid.clone(),
			name: self.name.clone(),
			description: self.description.clone(),
			questions: codec::encode(&self.questions, "form.questions"),
			channel_id: self.channel_id,
			roles: codec::encode(&self.roles, "form.roles"),
			actions: codec::encode(&self.actions, "form.actions"),
			message: self.message.clone(),
			color: self.color.clone(),
			emoji: self.emoji.clone(),
			open: self.open,
			cooldown: self.cooldown,
			post_icon: self.post_icon.clone(),
			post_banner: self.post_banner.clone(),
			button_text: self.button_text.clone(),
			button_style: self.button_style,
			tickets_id: self.tickets_id,
			ticket_msg: self.ticket_msg.clone(),
			ticket_roles: codec::encode(&self.ticket_roles, "form.ticket_roles"),
		}
	}

	/// Actions to run for `event`: role lists first as synthetic role actions, then configured actions.
	pub fn configured_actions(&self, event: ActionEvent) -> Vec<StoredAction> {
		let mut list = vec![];

		if let Some(roles) = self.roles.get(&event) {
			for op in [RoleOp::Add, RoleOp::Remove] {
				let ids: Vec<&str> = roles.iter().filter(|r| r.action == op).map(|r| r.id.as_str()).collect();
				if !ids.is_empty() {
					list.push(StoredAction::new(op.action_id(), json!({ "roles": ids })));
				}
			}
		}

		if let Some(actions) = self.actions.get(&event) {
			list.extend(actions.iter().cloned());
		}

		list
	}

	pub fn add_action(&mut self, event: ActionEvent, action: StoredAction) {
		self.actions.entry(event).or_default().push(action);
	}

	/// Drops configured actions for one event, or for all of them. Returns how many were removed.
	pub fn clear_actions(&mut self, event: Option<ActionEvent>) -> usize {
		match event {
			Some(event) => self.actions.remove(&event).map(|list| list.len()).unwrap_or(0),
			None => {
				let count = self.actions.values().map(Vec::len).sum();
				self.actions.clear();
				count
			},
		}
	}

	/// Number of role entries configured on events other than `event`.
	pub fn roles_outside(&self, event: ActionEvent) -> usize {
		self.roles
			.iter()
			.filter(|(e, _)| **e != event)
			.map(|(_, roles)| roles.len())
			.sum()
	}

	/// Replaces the whole role map with the lists for a single event.
	pub fn replace_roles(&mut self, event: ActionEvent, roles: Vec<RoleAction>) {
		self.roles = RoleMap::new();
		if !roles.is_empty() {
			self.roles.insert(event, roles);
		}
	}

	pub fn validate_answers(&self, answers: &[String]) -> Result<(), String> {
		if answers.len() != self.questions.len() {
			return Err(format!(
				"Expected {} answers but {} were collected",
				self.questions.len(),
				answers.len()
			));
		}

		for (index, (question, answer)) in self.questions.iter().zip(answers).enumerate() {
			question
				.validate(answer)
				.map_err(|reason| format!("Question {}: {}", index + 1, reason))?;
		}

		Ok(())
	}

	pub fn matches_query(&self, query: &str) -> bool {
		let query = query.trim().to_lowercase();
		query.is_empty()
			|| self.hid.contains(&query)
			|| self.name.to_lowercase().contains(&query)
			|| self.description.to_lowercase().contains(&query)
	}

	pub fn label(&self) -> String {
		format!("{} ({})", self.name, self.hid)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn draft() -> FormDraft {
		FormDraft {
			name: Some("Staff application".into()),
			description: Some("Join the team".into()),
			questions: vec![RawQuestion {
				value: Some("Why?".into()),
				kind: Some("text".into()),
				required: None,
				choices: vec![],
				required_domain: None,
			}],
			..FormDraft::default()
		}
	}

	#[test]
	fn verify_reports_first_problem() {
		assert!(verify(&draft()).is_ok());

		let mut no_questions = draft();
		no_questions.questions.clear();
		assert_eq!(verify(&no_questions).unwrap_err(), "Questions must be present");

		let mut too_many = draft();
		too_many.questions = vec![too_many.questions[0].clone(); 21];
		assert_eq!(verify(&too_many).unwrap_err(), "Max of 20 questions per form");

		let mut bad_type = draft();
		bad_type.questions[0].kind = Some("essay".into());
		assert_eq!(verify(&bad_type).unwrap_err(), "Questions must have a valid type");

		let mut unnamed = draft();
		unnamed.name = Some("   ".into());
		assert_eq!(verify(&unnamed).unwrap_err(), "Form must have a name");

		let mut long = draft();
		long.description = Some("x".repeat(2049));
		assert_eq!(verify(&long).unwrap_err(), "Description must be 2048 chars or less");
	}

	#[test]
	fn legacy_roles_become_event_map() {
		let roles = decode_roles(r#"[{"id":"10","events":["ACCEPT","submit"]},{"id":"20","events":["DENY"]}]"#);
		assert_eq!(roles[&ActionEvent::Accept], vec![RoleAction { id: "10".into(), action: RoleOp::Add }]);
		assert_eq!(roles[&ActionEvent::Submit].len(), 1);
		assert_eq!(roles[&ActionEvent::Deny][0].id, "20");
	}

	#[test]
	fn corrupt_roles_are_empty() {
		assert!(decode_roles("{not json").is_empty());
		assert!(decode_roles("").is_empty());
	}

	#[test]
	fn role_lists_run_before_configured_actions() {
		let mut form = Form::new(1, "abc12", "Form", vec![]);
		form.add_action(ActionEvent::Accept, StoredAction::new("ticket.create", json!({})));
		form.replace_roles(ActionEvent::Accept, vec![
			RoleAction { id: "5".into(), action: RoleOp::Remove },
			RoleAction { id: "6".into(), action: RoleOp::Add },
			RoleAction { id: "7".into(), action: RoleOp::Add },
		]);

		let kinds: Vec<String> = form.configured_actions(ActionEvent::Accept).into_iter().map(|a| a.kind).collect();
		assert_eq!(kinds, vec!["role.add", "role.remove", "ticket.create"]);
		assert_eq!(form.configured_actions(ActionEvent::Accept)[0].data, json!({ "roles": ["6", "7"] }));
		assert!(form.configured_actions(ActionEvent::Deny).is_empty());
	}

	#[test]
	fn replace_roles_overwrites_other_events() {
		let mut form = Form::new(1, "abc12", "Form", vec![]);
		form.replace_roles(ActionEvent::Submit, vec![RoleAction { id: "1".into(), action: RoleOp::Add }]);
		assert_eq!(form.roles_outside(ActionEvent::Accept), 1);

		form.replace_roles(ActionEvent::Accept, vec![RoleAction { id: "2".into(), action: RoleOp::Add }]);
		assert!(form.roles.get(&ActionEvent::Submit).is_none());
		assert_eq!(form.roles_outside(ActionEvent::Accept), 0);
	}

	#[test]
	fn export_strips_guild_data() {
		let mut form = Form::from_draft(9, "qwert", &draft(), verify(&draft()).unwrap());
		form.channel_id = Some(44);
		form.replace_roles(ActionEvent::Accept, vec![RoleAction { id: "2".into(), action: RoleOp::Add }]);

		let exported = serde_json::to_value(form.to_draft()).unwrap();
		for key in ["id", "server_id", "channel_id", "roles", "actions"] {
			assert!(exported.get(key).is_none(), "{} leaked", key);
		}
		assert_eq!(exported["hid"], "qwert");
		assert_eq!(exported["questions"][0]["type"], "text");
	}

	#[test]
	fn model_conversion_keeps_values() {
		let mut form = Form::from_draft(9, "qwert", &draft(), verify(&draft()).unwrap());
		form.id = Some(3);
		form.ticket_roles = vec!["300".into(), "100".into()];
		let back = Form::from_model(form.to_model());
		assert_eq!(back.questions, form.questions);
		assert_eq!(back.ticket_roles, form.ticket_roles);
		assert!(back.loaded.is_some());
	}

	#[test]
	fn answers_are_revalidated() {
		let form = Form::from_draft(9, "qwert", &draft(), verify(&draft()).unwrap());
		assert!(form.validate_answers(&["Because".into()]).is_ok());
		assert!(form.validate_answers(&["".into()]).is_err());
		assert!(form.validate_answers(&[]).is_err());
	}
}
