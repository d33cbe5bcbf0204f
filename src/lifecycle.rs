//! Moves a response from its first prompt to its terminal state and runs the
//! form's actions at every event on the way.
//!
//! A response row exists only while it is `Open` or `Submitted`. Accepting,
//! denying or cancelling it runs the cleanup and deletes the row, so the
//! at-most-one-active-response rule is enforced by checking for a live row
//! before creating another.

use std::sync::Arc;

use entity::enums::ResponseState;
use log::{error, info, warn};

use crate::actions::{ActionRegistry, PipelineReport};
use crate::error::{BotError, BotResult};
use crate::forms::configuration::DropdownKind;
use crate::forms::{ActionEvent, Form, Response};
use crate::gateway::{Banner, GuildGateway, Messenger};
use crate::stores::Stores;

#[derive(Debug)]
pub enum ApplyOutcome {
	Started(Response, PipelineReport),
	/// The user already has a live response on this form.
	Existing(Response),
	/// The user's DMs are still collecting answers for another form.
	Busy(Response),
	Closed,
}

#[derive(Debug)]
pub enum AnswerOutcome {
	/// No open response is collecting answers in this channel.
	NoResponse,
	Rejected(String),
	/// Index of the question that was just asked.
	Next(usize),
	Submitted(PipelineReport),
	/// The form was deleted while the response was open. The response has been removed.
	Orphaned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelSource {
	User,
	Moderator(u64),
	MemberLeft,
}

#[derive(Debug)]
pub struct Moderation {
	pub state: ResponseState,
	pub reason: String,
	pub report: PipelineReport,
}

#[derive(Clone)]
pub struct Lifecycle {
	pub stores: Stores,
	pub registry: Arc<ActionRegistry>,
	pub gateway: Arc<dyn GuildGateway>,
	pub messenger: Arc<dyn Messenger>,
}

impl Lifecycle {
	pub fn new(
		stores: Stores,
		registry: Arc<ActionRegistry>,
		gateway: Arc<dyn GuildGateway>,
		messenger: Arc<dyn Messenger>,
	) -> Self {
		Lifecycle {
			stores,
			registry,
			gateway,
			messenger,
		}
	}

	async fn form_for(&self, server_id: u64, hid: &str) -> BotResult<Form> {
		self.stores.forms.get(server_id, hid).await?.ok_or_else(|| BotError::not_found("Form"))
	}

	async fn run(&self, event: ActionEvent, form: &Form, response: &Response) -> BotResult<PipelineReport> {
		let config = self.stores.configs.get(response.server_id).await?;
		Ok(self.registry.run_event(event, form, response, &config, self.gateway.as_ref()).await)
	}

	pub async fn apply(&self, server_id: u64, user_id: u64, hid: &str) -> BotResult<ApplyOutcome> {
		let form = self.form_for(server_id, hid).await?;
		if !form.open {
			return Ok(ApplyOutcome::Closed);
		}
		if let Some(existing) = self.stores.responses.find_active(server_id, user_id, &form.hid).await? {
			return Ok(ApplyOutcome::Existing(existing));
		}

		let channel_id = self.messenger.open_dm(user_id).await?;
		if let Some(other) = self.stores.responses.get_open_by_channel(channel_id).await? {
			return Ok(ApplyOutcome::Busy(other));
		}
		let prompt = self.messenger.send_question(channel_id, &form, 0).await?;

		let mut response = Response::new(server_id, user_id, channel_id, form.hid.as_str());
		response.message_id = Some(prompt);
		let response = self.stores.responses.create(response).await?;
		info!("guild {}: user {} started form {}", server_id, user_id, form.hid);

		let report = self.run(ActionEvent::Apply, &form, &response).await?;
		Ok(ApplyOutcome::Started(response, report))
	}

	/// Feeds one DM message into the response collecting answers in `channel_id`.
	pub async fn answer(&self, channel_id: u64, text: &str) -> BotResult<AnswerOutcome> {
		let Some(mut response) = self.stores.responses.get_open_by_channel(channel_id).await? else {
			return Ok(AnswerOutcome::NoResponse);
		};
		let Some(form) = self.stores.forms.get(response.server_id, &response.form_hid).await? else {
			warn!("response {:?} points at deleted form {}, removing it", response.id, response.form_hid);
			if let Some(id) = response.id {
				self.stores.responses.delete(id).await?;
			}
			return Ok(AnswerOutcome::Orphaned);
		};

		if let Some(question) = form.questions.get(response.current_question()) {
			match question.validate(text) {
				Ok(answer) => response.answers.push(answer),
				Err(reason) => return Ok(AnswerOutcome::Rejected(reason)),
			}
		}

		let next = response.current_question();
		if next < form.questions.len() {
			let prompt = self.messenger.send_question(channel_id, &form, next).await?;
			response.message_id = Some(prompt);
			self.stores.responses.save(&mut response).await?;
			return Ok(AnswerOutcome::Next(next));
		}

		let report = self.submit(&form, response).await?;
		Ok(AnswerOutcome::Submitted(report))
	}

	async fn submit(&self, form: &Form, mut response: Response) -> BotResult<PipelineReport> {
		form.validate_answers(&response.answers).map_err(BotError::validation)?;
		response.transition(ResponseState::Submitted)?;

		let config = self.stores.configs.get(response.server_id).await?;
		if let Some(posted) = self.messenger.post_response(form, &response, &config).await? {
			response.post_channel_id = Some(posted.channel_id);
			response.post_message_id = Some(posted.message_id);
			response.thread_id = posted.thread_id;
		}
		self.stores.responses.save(&mut response).await?;

		if let Some(prompt) = response.message_id {
			if let Err(e) = self.messenger.mark_prompt(response.channel_id, prompt, &Banner::Submitted).await {
				warn!("could not mark prompt of response {:?}: {}", response.id, e);
			}
		}
		info!("guild {}: user {} submitted form {}", response.server_id, response.user_id, form.hid);

		Ok(self.registry.run_event(ActionEvent::Submit, form, &response, &config, self.gateway.as_ref()).await)
	}

	/// Accepts or denies a submitted response with the dropdown option `value`.
	pub async fn moderate(&self, response_id: u64, value: &str, moderator: u64) -> BotResult<Moderation> {
		let mut response = self
			.stores
			.responses
			.get(response_id)
			.await?
			.ok_or_else(|| BotError::not_found("Response"))?;
		let config = self.stores.configs.get(response.server_id).await?;
		let option = config
			.dropdown_option(value)
			.ok_or_else(|| BotError::validation("That option no longer exists."))?;

		let (state, event) = match DropdownKind::of_value(&option.value) {
			Some(DropdownKind::Accept) => (ResponseState::Accepted, ActionEvent::Accept),
			Some(DropdownKind::Deny) => (ResponseState::Denied, ActionEvent::Deny),
			None => return Err(BotError::validation("That option is neither an accept nor a deny option.")),
		};

		let Some(form) = self.stores.forms.get(response.server_id, &response.form_hid).await? else {
			self.stores.responses.delete(response_id).await?;
			return Err(BotError::not_found("Form"));
		};

		response.transition(state)?;
		let report = self.registry.run_event(event, &form, &response, &config, self.gateway.as_ref()).await;

		let banner = match state {
			ResponseState::Accepted => Banner::Accepted { reason: option.label.clone() },
			_ => Banner::Denied { reason: option.label.clone() },
		};
		self.clean_up(&response, &banner, &outcome_text(&form, &banner)).await;
		self.stores.responses.delete(response_id).await?;

		info!(
			"guild {}: moderator {} marked response {} on {} as {} ({})",
			response.server_id, moderator, response_id, form.hid, state, option.label
		);
		Ok(Moderation {
			state,
			reason: option.label,
			report,
		})
	}

	/// Cancels a live response. No ACCEPT or DENY actions run.
	pub async fn cancel(&self, mut response: Response, source: CancelSource) -> BotResult<()> {
		let Some(id) = response.id else {
			return Err(BotError::not_found("Response"));
		};
		response.transition(ResponseState::Cancelled)?;

		let text = match source {
			CancelSource::User => format!("You cancelled your response to `{}`.", response.form_hid),
			CancelSource::Moderator(_) => format!("Your response to `{}` was cancelled by a moderator.", response.form_hid),
			CancelSource::MemberLeft => format!("Your response to `{}` was cancelled.", response.form_hid),
		};
		self.clean_up(&response, &Banner::Cancelled, &text).await;
		self.stores.responses.delete(id).await?;

		info!("guild {}: response {} cancelled ({:?})", response.server_id, id, source);
		Ok(())
	}

	/// Cancels everything a departed member left behind. Never fails; returns how many rows were removed.
	pub async fn auto_cancel(&self, server_id: u64, user_id: u64) -> usize {
		let responses = match self.stores.responses.find_all_active_by_user(server_id, user_id).await {
			Ok(responses) => responses,
			Err(e) => {
				error!("guild {}: could not look up responses of departed user {}: {}", server_id, user_id, e);
				return 0;
			},
		};

		let mut removed = 0;
		for mut response in responses {
			let Some(id) = response.id else {
				continue;
			};
			if response.transition(ResponseState::Cancelled).is_ok() {
				self.clean_up(&response, &Banner::Cancelled, "").await;
			}

			let mut deleted = self.stores.responses.delete(id).await;
			if let Err(e) = &deleted {
				warn!("retrying delete of response {}: {}", id, e);
				deleted = self.stores.responses.delete(id).await;
			}
			match deleted {
				Ok(_) => removed += 1,
				Err(e) => error!("response {} of departed user {} could not be deleted: {}", id, user_id, e),
			}
		}

		if removed > 0 {
			info!("guild {}: cancelled {} responses of departed user {}", server_id, removed, user_id);
		}
		removed
	}

	/// Edits the prompt and the moderation post, then tells the user. Failures here are logged and ignored.
	async fn clean_up(&self, response: &Response, banner: &Banner, notice: &str) {
		if let Some(prompt) = response.message_id {
			if let Err(e) = self.messenger.mark_prompt(response.channel_id, prompt, banner).await {
				warn!("could not edit prompt of response {:?}: {}", response.id, e);
			}
		}
		if let (Some(channel), Some(message)) = (response.post_channel_id, response.post_message_id) {
			if let Err(e) = self.messenger.mark_post(channel, message, banner).await {
				warn!("could not edit post of response {:?}: {}", response.id, e);
			}
		}
		if !notice.is_empty() {
			if let Err(e) = self.messenger.notify_user(response.channel_id, notice).await {
				warn!("could not notify user {}: {}", response.user_id, e);
			}
		}
	}
}

fn outcome_text(form: &Form, banner: &Banner) -> String {
	match banner {
		Banner::Accepted { reason } => format!("Your response to **{}** was accepted: {}", form.name, reason),
		Banner::Denied { reason } => format!("Your response to **{}** was denied: {}", form.name, reason),
		Banner::Submitted | Banner::Cancelled => String::new(),
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;
	use crate::forms::configuration::OptionInput;
	use crate::forms::form::StoredAction;
	use crate::forms::{Question, QuestionKind};
	use crate::gateway::{PostedResponse, RoleInfo};
	use crate::testing::{GatewayCall, MemoryStores, MessengerCall, ScriptedGateway, ScriptedMessenger};

	struct Harness {
		memory: MemoryStores,
		gateway: Arc<ScriptedGateway>,
		messenger: Arc<ScriptedMessenger>,
		lifecycle: Lifecycle,
	}

	fn harness() -> Harness {
		let memory = MemoryStores::default();
		let gateway = Arc::new(ScriptedGateway::default());
		let messenger = Arc::new(ScriptedMessenger::default());
		let lifecycle = Lifecycle::new(
			memory.stores(),
			Arc::new(ActionRegistry::with_defaults()),
			gateway.clone(),
			messenger.clone(),
		);
		Harness {
			memory,
			gateway,
			messenger,
			lifecycle,
		}
	}

	async fn seed_form(h: &Harness, hid: &str, actions: Vec<(ActionEvent, StoredAction)>) -> Form {
		let mut form = Form::new(1, hid, "Staff application", vec![Question::new(QuestionKind::Text, "Why?")]);
		for (event, action) in actions {
			form.add_action(event, action);
		}
		h.lifecycle.stores.forms.create(form).await.unwrap()
	}

	/// Applies and answers the only question, leaving the response submitted.
	async fn submitted(h: &Harness, hid: &str) -> Response {
		let ApplyOutcome::Started(response, _) = h.lifecycle.apply(1, 50, hid).await.unwrap() else {
			panic!("apply did not start");
		};
		let outcome = h.lifecycle.answer(response.channel_id, "I like helping").await.unwrap();
		assert!(matches!(outcome, AnswerOutcome::Submitted(_)));
		h.lifecycle.stores.responses.get(response.id.unwrap()).await.unwrap().unwrap()
	}

	fn staff_roles(h: &Harness, highest: u16) {
		h.gateway.set_standing(true, highest);
		h.gateway.set_roles(vec![
			RoleInfo { id: 111, name: "Staff".into(), position: 6 },
			RoleInfo { id: 222, name: "Member".into(), position: 2 },
		]);
	}

	#[tokio::test]
	async fn second_apply_returns_the_existing_response() {
		let h = harness();
		seed_form(&h, "abc123", vec![]).await;

		let ApplyOutcome::Started(first, _) = h.lifecycle.apply(1, 50, "abc123").await.unwrap() else {
			panic!("apply did not start");
		};
		let ApplyOutcome::Existing(second) = h.lifecycle.apply(1, 50, "ABC123").await.unwrap() else {
			panic!("second apply created a response");
		};
		assert_eq!(first.id, second.id);
		assert_eq!(h.memory.responses.len(), 1);

		// Still one live response after submission.
		h.lifecycle.answer(first.channel_id, "Because").await.unwrap();
		assert!(matches!(h.lifecycle.apply(1, 50, "abc123").await.unwrap(), ApplyOutcome::Existing(_)));
	}

	#[tokio::test]
	async fn open_dm_blocks_a_second_form() {
		let h = harness();
		let form = Form::new(1, "numfm", "Age check", vec![Question::new(QuestionKind::Number, "How old are you?")]);
		h.lifecycle.stores.forms.create(form).await.unwrap();
		seed_form(&h, "txtfm", vec![]).await;

		let ApplyOutcome::Started(first, _) = h.lifecycle.apply(1, 50, "numfm").await.unwrap() else {
			panic!("apply did not start");
		};
		let ApplyOutcome::Busy(other) = h.lifecycle.apply(1, 50, "txtfm").await.unwrap() else {
			panic!("second form started in the same DM");
		};
		assert_eq!(other.id, first.id);
		assert_eq!(h.memory.responses.len(), 1);
		let questions = h.messenger.calls().iter().filter(|call| matches!(call, MessengerCall::Question { .. })).count();
		assert_eq!(questions, 1);

		// Another guild's form shares the same DM channel.
		let other_guild = Form::new(2, "txtfm", "Staff application", vec![Question::new(QuestionKind::Text, "Why?")]);
		h.lifecycle.stores.forms.create(other_guild).await.unwrap();
		assert!(matches!(h.lifecycle.apply(2, 50, "txtfm").await.unwrap(), ApplyOutcome::Busy(_)));

		// Once the first form is submitted the DM is free again.
		assert!(matches!(h.lifecycle.answer(first.channel_id, "21").await.unwrap(), AnswerOutcome::Submitted(_)));
		let ApplyOutcome::Started(second, _) = h.lifecycle.apply(1, 50, "txtfm").await.unwrap() else {
			panic!("apply did not start after submission");
		};
		let routed = h.lifecycle.stores.responses.get_open_by_channel(first.channel_id).await.unwrap().unwrap();
		assert_eq!(routed.id, second.id);
		assert!(matches!(
			h.lifecycle.answer(first.channel_id, "Because I like helping").await.unwrap(),
			AnswerOutcome::Submitted(_)
		));
	}

	#[tokio::test]
	async fn channel_lookup_prefers_the_newest_open_response() {
		let h = harness();
		let responses = &h.lifecycle.stores.responses;
		let mut older = Response::new(1, 50, 1_000_050, "numfm");
		older.created_at -= chrono::Duration::minutes(5);
		responses.create(older).await.unwrap();
		let newer = responses.create(Response::new(2, 50, 1_000_050, "txtfm")).await.unwrap();

		let routed = responses.get_open_by_channel(1_000_050).await.unwrap().unwrap();
		assert_eq!(routed.id, newer.id);
	}

	#[tokio::test]
	async fn closed_forms_refuse_applications() {
		let h = harness();
		let mut form = seed_form(&h, "abc123", vec![]).await;
		form.open = false;
		h.lifecycle.stores.forms.save(&mut form).await.unwrap();

		assert!(matches!(h.lifecycle.apply(1, 50, "abc123").await.unwrap(), ApplyOutcome::Closed));
		assert_eq!(h.memory.responses.len(), 0);
	}

	#[tokio::test]
	async fn actions_run_in_priority_order() {
		let h = harness();
		staff_roles(&h, 10);
		h.messenger.set_post(PostedResponse { channel_id: 7, message_id: 8, thread_id: Some(77) });
		h.gateway.set_thread(77, vec![]);
		seed_form(&h, "abc123", vec![
			(ActionEvent::Accept, StoredAction::new("role.add", json!({ "roles": ["222"] }))),
			(ActionEvent::Accept, StoredAction::new("tag.add", json!({ "tags": ["3"] }))),
		])
		.await;
		let response = submitted(&h, "abc123").await;

		let moderation = h.lifecycle.moderate(response.id.unwrap(), "accept_approved", 9).await.unwrap();
		assert_eq!(moderation.report.succeeded, vec!["tag.add", "role.add"]);
		assert_eq!(h.gateway.calls(), vec![
			GatewayCall::SetTags { thread: 77, tags: vec![3] },
			GatewayCall::AddRole { user: 50, role: 222 },
		]);
	}

	#[tokio::test]
	async fn hierarchy_failure_does_not_block_tags() {
		let h = harness();
		staff_roles(&h, 5);
		h.messenger.set_post(PostedResponse { channel_id: 7, message_id: 8, thread_id: Some(77) });
		h.gateway.set_thread(77, vec![]);
		seed_form(&h, "abc123", vec![
			(ActionEvent::Accept, StoredAction::new("role.add", json!({ "roles": ["111"] }))),
			(ActionEvent::Accept, StoredAction::new("tag.add", json!({ "tags": ["3"] }))),
		])
		.await;
		let response = submitted(&h, "abc123").await;

		let report = h.lifecycle.moderate(response.id.unwrap(), "accept_approved", 9).await.unwrap().report;
		assert_eq!(report.succeeded, vec!["tag.add"]);
		assert_eq!(report.failures.len(), 1);
		assert_eq!(report.failures[0].action, "role.add");
	}

	#[tokio::test]
	async fn dropdown_survives_a_store_round_trip() {
		let h = harness();
		let configs = &h.lifecycle.stores.configs;
		let mut config = configs.get(1).await.unwrap();
		config
			.add_option(DropdownKind::Accept, &OptionInput {
				label: "Trial".into(),
				description: "Two week trial".into(),
				suffix: "Trial Period".into(),
				emoji: Some("⏳".into()),
			})
			.unwrap();
		config
			.edit_option(1, &OptionInput {
				label: "Not now".into(),
				description: "Try again later".into(),
				suffix: "later".into(),
				emoji: None,
			})
			.unwrap();
		config.reorder_options(&[2, 0, 1]).unwrap();
		configs.save(&mut config).await.unwrap();

		let reloaded = configs.get(1).await.unwrap();
		assert_eq!(reloaded.dropdown_options, config.dropdown_options);
		let values: Vec<String> = reloaded.dropdown().into_iter().map(|o| o.value).collect();
		assert_eq!(values, vec!["accept_trial_period", "accept_approved", "deny_later"]);
	}

	#[tokio::test]
	async fn partial_reorder_changes_nothing() {
		let h = harness();
		let configs = &h.lifecycle.stores.configs;
		let mut config = configs.get(1).await.unwrap();
		config
			.add_option(DropdownKind::Deny, &OptionInput {
				label: "Spam".into(),
				description: "Spam application".into(),
				suffix: "spam".into(),
				emoji: None,
			})
			.unwrap();
		configs.save(&mut config).await.unwrap();
		let before = config.dropdown_options.clone();

		let mut config = configs.get(1).await.unwrap();
		assert!(config.reorder_options(&[2, 0]).is_err());
		configs.save(&mut config).await.unwrap();

		assert_eq!(configs.get(1).await.unwrap().dropdown_options, before);
	}

	#[tokio::test]
	async fn missing_config_resolves_to_unsaved_defaults() {
		let h = harness();
		let config = h.lifecycle.stores.configs.get(42).await.unwrap();

		let values: Vec<String> = config.dropdown().into_iter().map(|o| o.value).collect();
		assert_eq!(values, vec!["accept_approved", "deny_rejected"]);
		assert!(!config.msg_ephemeral);
		assert!(!config.is_persisted());
		assert_eq!(h.memory.configs.stored(), 0);
	}

	#[tokio::test]
	async fn accept_reports_hierarchy_error_and_still_opens_ticket() {
		let h = harness();
		staff_roles(&h, 5);
		let mut config = h.lifecycle.stores.configs.get(1).await.unwrap();
		config.ticket_category = Some(900);
		h.lifecycle.stores.configs.save(&mut config).await.unwrap();
		seed_form(&h, "abc123", vec![
			(ActionEvent::Accept, StoredAction::new("role.add", json!({ "roles": ["111"] }))),
			(ActionEvent::Accept, StoredAction::new("ticket.create", json!({}))),
		])
		.await;
		let response = submitted(&h, "abc123").await;

		let report = h.lifecycle.moderate(response.id.unwrap(), "accept_approved", 9).await.unwrap().report;
		assert_eq!(report.failure_messages(), vec![
			"Role \"Staff\" is higher than or equal to bot's highest role in hierarchy"
		]);
		assert_eq!(report.succeeded, vec!["ticket.create"]);
		assert!(matches!(h.gateway.calls().as_slice(), [GatewayCall::Ticket(_)]));
	}

	#[tokio::test]
	async fn denied_response_is_deleted_and_marked() {
		let h = harness();
		staff_roles(&h, 10);
		h.messenger.set_post(PostedResponse { channel_id: 7, message_id: 8, thread_id: None });
		seed_form(&h, "abc123", vec![
			(ActionEvent::Deny, StoredAction::new("role.remove", json!({ "roles": ["222"] }))),
			(ActionEvent::Accept, StoredAction::new("role.add", json!({ "roles": ["222"] }))),
		])
		.await;
		let response = submitted(&h, "abc123").await;
		assert_eq!(response.state, ResponseState::Submitted);
		assert_eq!(response.post_message_id, Some(8));

		let moderation = h.lifecycle.moderate(response.id.unwrap(), "deny_rejected", 9).await.unwrap();
		assert_eq!(moderation.state, ResponseState::Denied);
		assert_eq!(moderation.report.succeeded, vec!["role.remove"]);
		assert_eq!(h.memory.responses.len(), 0);
		assert!(h.messenger.calls().contains(&MessengerCall::Post {
			message: 8,
			banner: Banner::Denied { reason: "Deny".into() },
		}));
	}

	#[tokio::test]
	async fn moderation_needs_a_submitted_response() {
		let h = harness();
		seed_form(&h, "abc123", vec![]).await;
		let ApplyOutcome::Started(response, _) = h.lifecycle.apply(1, 50, "abc123").await.unwrap() else {
			panic!("apply did not start");
		};

		let result = h.lifecycle.moderate(response.id.unwrap(), "accept_approved", 9).await;
		assert!(matches!(result, Err(BotError::Validation(_))));
		assert_eq!(h.memory.responses.len(), 1);
	}

	#[tokio::test]
	async fn departed_member_is_cleaned_up_without_a_dm() {
		let h = harness();
		seed_form(&h, "f1", vec![]).await;
		h.lifecycle.apply(1, 50, "f1").await.unwrap();
		h.messenger.close_dm();

		assert_eq!(h.lifecycle.auto_cancel(1, 50).await, 1);
		assert_eq!(h.memory.responses.len(), 0);
	}

	#[tokio::test]
	async fn auto_cancel_retries_a_failed_delete() {
		let h = harness();
		seed_form(&h, "f1", vec![]).await;
		h.lifecycle.apply(1, 50, "f1").await.unwrap();
		h.memory.responses.fail_next_deletes(1);

		assert_eq!(h.lifecycle.auto_cancel(1, 50).await, 1);
		assert_eq!(h.memory.responses.len(), 0);
	}

	#[tokio::test]
	async fn auto_cancel_swallows_persistent_failures() {
		let h = harness();
		seed_form(&h, "f1", vec![]).await;
		h.lifecycle.apply(1, 50, "f1").await.unwrap();
		h.memory.responses.fail_next_deletes(2);

		assert_eq!(h.lifecycle.auto_cancel(1, 50).await, 0);
	}

	#[test]
	fn default_options_cannot_be_removed() {
		let mut config = crate::forms::Configuration::defaults(1);
		assert_eq!(
			config.remove_options(&[0]),
			Err("No custom options to remove. Use `/config dropdown view` to see current options.".to_string())
		);
		assert_eq!(config.dropdown().len(), 2);
	}

	#[tokio::test]
	async fn invalid_answers_are_rejected() {
		let h = harness();
		let form = Form::new(1, "num01", "Age check", vec![Question::new(QuestionKind::Number, "How old are you?")]);
		h.lifecycle.stores.forms.create(form).await.unwrap();
		let ApplyOutcome::Started(response, _) = h.lifecycle.apply(1, 50, "num01").await.unwrap() else {
			panic!("apply did not start");
		};

		let outcome = h.lifecycle.answer(response.channel_id, "old enough").await.unwrap();
		assert!(matches!(outcome, AnswerOutcome::Rejected(_)));
		let outcome = h.lifecycle.answer(response.channel_id, "21").await.unwrap();
		assert!(matches!(outcome, AnswerOutcome::Submitted(_)));
	}

	#[tokio::test]
	async fn answers_after_form_deletion_remove_the_response() {
		let h = harness();
		let form = seed_form(&h, "abc123", vec![]).await;
		let ApplyOutcome::Started(response, _) = h.lifecycle.apply(1, 50, "abc123").await.unwrap() else {
			panic!("apply did not start");
		};
		h.lifecycle.stores.forms.delete(&form).await.unwrap();

		let outcome = h.lifecycle.answer(response.channel_id, "hello").await.unwrap();
		assert!(matches!(outcome, AnswerOutcome::Orphaned));
		assert_eq!(h.memory.responses.len(), 0);
	}

	#[tokio::test]
	async fn users_can_cancel_their_own_response() {
		let h = harness();
		seed_form(&h, "abc123", vec![]).await;
		let ApplyOutcome::Started(response, _) = h.lifecycle.apply(1, 50, "abc123").await.unwrap() else {
			panic!("apply did not start");
		};

		h.lifecycle.cancel(response, CancelSource::User).await.unwrap();
		assert!(h.lifecycle.stores.responses.find_active(1, 50, "abc123").await.unwrap().is_none());
		assert_eq!(h.memory.responses.len(), 0);
		assert!(h.messenger.calls().iter().any(|call| matches!(call, MessengerCall::Prompt {
			banner: Banner::Cancelled,
			..
		})));
	}
}
