use chrono::{DateTime, Utc};
use entity::enums::ResponseState;

use crate::error::{BotError, BotResult};
use crate::stores::codec;

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
	pub id: Option<u64>,
	pub server_id: u64,
	pub user_id: u64,
	/// DM channel the questions are asked in.
	pub channel_id: u64,
	pub form_hid: String,
	/// Latest prompt message in the DM channel.
	pub message_id: Option<u64>,
	pub post_channel_id: Option<u64>,
	pub post_message_id: Option<u64>,
	pub thread_id: Option<u64>,
	pub answers: Vec<String>,
	pub state: ResponseState,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl Response {
	pub fn new(server_id: u64, user_id: u64, channel_id: u64, form_hid: impl Into<String>) -> Self {
		let now = Utc::now();
		Response {
			id: None,
			server_id,
			user_id,
			channel_id,
			form_hid: form_hid.into(),
			message_id: None,
			post_channel_id: None,
			post_message_id: None,
			thread_id: None,
			answers: vec![],
			state: ResponseState::Open,
			created_at: now,
			updated_at: now,
		}
	}

	pub fn is_terminal(&self) -> bool {
		is_terminal(self.state)
	}

	pub fn transition(&mut self, to: ResponseState) -> BotResult<()> {
		if !can_transition(self.state, to) {
			return Err(BotError::validation(format!(
				"This response is {} and cannot become {}.",
				self.state, to
			)));
		}

		self.state = to;
		self.updated_at = Utc::now();
		Ok(())
	}

	/// Zero based index of the next unanswered question.
	pub fn current_question(&self) -> usize {
		self.answers.len()
	}

	pub fn from_model(model: entity::Response) -> Self {
		Response {
			id: Some(model.id),
			server_id: model.server_id,
			user_id: model.user_id,
			channel_id: model.channel_id,
			answers: codec::decode_or(Some(&model.answers), "response.answers", Vec::new),
			form_hid: model.form_hid,
			message_id: model.message_id,
			post_channel_id: model.post_channel_id,
			post_message_id: model.post_message_id,
			thread_id: model.thread_id,
			state: model.state,
			created_at: model.created_at,
			updated_at: model.updated_at,
		}
	}

	pub fn to_model(&self) -> entity::Response {
		entity::Response {
			id: self.id.unwrap_or_default(),
			server_id: self.server_id,
			user_id: self.user_id,
			channel_id: self.channel_id,
			form_hid: self.form_hid.clone(),
			message_id: self.message_id,
			post_channel_id: self.post_channel_id,
			post_message_id: self.post_message_id,
			thread_id: self.thread_id,
			answers: codec::encode(&self.answers, "response.answers"),
			state: self.state,
			created_at: self.created_at,
			updated_at: self.updated_at,
		}
	}
}

pub fn is_terminal(state: ResponseState) -> bool {
	matches!(state, ResponseState::Accepted | ResponseState::Denied | ResponseState::Cancelled)
}

pub fn can_transition(from: ResponseState, to: ResponseState) -> bool {
	use ResponseState::*;

	matches!(
		(from, to),
		(Open, Submitted) | (Submitted, Accepted) | (Submitted, Denied) | (Open, Cancelled) | (Submitted, Cancelled)
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn happy_path_transitions() {
		let mut response = Response::new(1, 2, 3, "abc12");
		assert!(response.transition(ResponseState::Submitted).is_ok());
		assert!(response.transition(ResponseState::Denied).is_ok());
		assert!(response.is_terminal());
	}

	#[test]
	fn open_responses_cannot_be_moderated() {
		let mut response = Response::new(1, 2, 3, "abc12");
		assert!(response.transition(ResponseState::Accepted).is_err());
		assert_eq!(response.state, ResponseState::Open);
	}

	#[test]
	fn terminal_states_are_final() {
		for terminal in [ResponseState::Accepted, ResponseState::Denied, ResponseState::Cancelled] {
			for to in [ResponseState::Open, ResponseState::Submitted, ResponseState::Cancelled] {
				assert!(!can_transition(terminal, to));
			}
		}
	}

	#[test]
	fn answers_survive_the_model() {
		let mut response = Response::new(1, 2, 3, "abc12");
		response.answers = vec!["one".into(), "two, three".into()];
		assert_eq!(Response::from_model(response.to_model()).answers, response.answers);
	}
}
