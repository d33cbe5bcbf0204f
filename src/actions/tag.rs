use async_trait::async_trait;
use log::debug;
use serde_json::{json, Value};

use crate::actions::{
	common_fields, snowflakes, Action, DisplayField, ExecutionContext, SetupContext, SetupOutcome, TransformContext,
};
use crate::error::ActionError;
use crate::forms::ActionEvent;
use crate::gateway::Choice;

/// Discord allows at most this many tags on a forum post.
const MAX_APPLIED_TAGS: usize = 5;
const EVENTS: [ActionEvent; 3] = [ActionEvent::Submit, ActionEvent::Accept, ActionEvent::Deny];

/// Adds forum tags to the thread a response was posted in.
pub struct TagAdd;

#[async_trait]
impl Action for TagAdd {
	fn id(&self) -> &'static str {
		"tag.add"
	}

	fn description(&self) -> &'static str {
		"Add tags to a response in a forum channel"
	}

	fn events(&self) -> &'static [ActionEvent] {
		&EVENTS
	}

	fn priority(&self) -> i32 {
		0
	}

	async fn setup(&self, ctx: &SetupContext<'_>) -> SetupOutcome {
		let Some(channel) = ctx.channel.filter(|channel| channel.is_forum) else {
			return SetupOutcome::Failure(
				"This action only applies to forms with response channels that are forums!".to_string(),
			);
		};
		if channel.available_tags.is_empty() {
			return SetupOutcome::Failure("That channel has no tags to choose from!".to_string());
		}

		let choices = channel
			.available_tags
			.iter()
			.map(|tag| Choice {
				label: tag.name.clone(),
				value: tag.id.to_string(),
				description: None,
			})
			.collect::<Vec<_>>();
		let max = choices.len();

		match ctx.prompter.select("Select the tags you want to add", choices, 0, max).await {
			Ok(tags) => SetupOutcome::Success(json!({ "tags": tags })),
			Err(message) => SetupOutcome::Failure(message),
		}
	}

	async fn handler(&self, ctx: &ExecutionContext<'_>) -> Result<(), ActionError> {
		let Some(thread_id) = ctx.response.thread_id else {
			return Ok(());
		};
		let Some(mut applied) = ctx.client.thread_tags(thread_id).await? else {
			debug!("response thread {} is gone, skipping tags", thread_id);
			return Ok(());
		};

		let before = applied.len();
		for tag in snowflakes(&ctx.action.data, "tags")? {
			if !applied.contains(&tag) {
				applied.push(tag);
			}
		}
		if applied.len() == before {
			return Ok(());
		}
		applied.truncate(MAX_APPLIED_TAGS);

		ctx.client.set_thread_tags(thread_id, applied).await
	}

	fn transform(&self, data: &Value, ctx: &TransformContext<'_>) -> Vec<DisplayField> {
		let wanted = snowflakes(data, "tags").unwrap_or_default();
		let names: Vec<String> = match ctx.channel.filter(|channel| channel.is_forum) {
			Some(channel) => channel
				.available_tags
				.iter()
				.filter(|tag| wanted.contains(&tag.id))
				.map(|tag| tag.label())
				.collect(),
			None => vec![],
		};

		let mut fields = common_fields(self, ctx.event);
		fields.push(DisplayField::new("Tags added", names.join(", ")));
		fields
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::forms::form::StoredAction;
	use crate::forms::{Configuration, Form, Response};
	use crate::gateway::{ChannelInfo, ForumTag};
	use crate::testing::{GatewayCall, ScriptedGateway, ScriptedPrompter};

	async fn run(gateway: &ScriptedGateway, thread: Option<u64>, tags: Value) -> Result<(), ActionError> {
		let form = Form::new(1, "abc12", "Form", vec![]);
		let mut response = Response::new(1, 50, 3, "abc12");
		response.thread_id = thread;
		let config = Configuration::defaults(1);
		let stored = StoredAction::new("tag.add", tags);
		TagAdd
			.handler(&ExecutionContext {
				response: &response,
				form: &form,
				config: &config,
				member: 50,
				guild: 1,
				action: &stored,
				client: gateway,
			})
			.await
	}

	fn setup_ctx<'a>(
		form: &'a Form,
		config: &'a Configuration,
		prompter: &'a ScriptedPrompter,
		channel: Option<&'a ChannelInfo>,
	) -> SetupContext<'a> {
		SetupContext {
			guild: 1,
			form,
			event: ActionEvent::Accept,
			channel,
			config,
			prompter,
		}
	}

	fn forum(tags: Vec<ForumTag>) -> ChannelInfo {
		ChannelInfo { id: 9, is_forum: true, available_tags: tags }
	}

	#[tokio::test]
	async fn deleted_thread_is_a_no_op() {
		let gateway = ScriptedGateway::default();
		run(&gateway, Some(77), json!({ "tags": ["1"] })).await.unwrap();
		assert!(gateway.calls().is_empty());
	}

	#[tokio::test]
	async fn tags_are_appended() {
		let gateway = ScriptedGateway::default();
		gateway.set_thread(77, vec![1]);
		run(&gateway, Some(77), json!({ "tags": ["1", "2"] })).await.unwrap();
		assert_eq!(gateway.calls(), vec![GatewayCall::SetTags { thread: 77, tags: vec![1, 2] }]);
	}

	#[tokio::test]
	async fn setup_needs_a_forum_with_tags() {
		let prompter = ScriptedPrompter::default();
		let form = Form::new(1, "abc12", "Form", vec![]);
		let config = Configuration::defaults(1);
		let text = ChannelInfo { id: 9, is_forum: false, available_tags: vec![] };
		let bare = forum(vec![]);

		assert_eq!(
			TagAdd.setup(&setup_ctx(&form, &config, &prompter, Some(&text))).await,
			SetupOutcome::Failure("This action only applies to forms with response channels that are forums!".into())
		);
		assert_eq!(
			TagAdd.setup(&setup_ctx(&form, &config, &prompter, Some(&bare))).await,
			SetupOutcome::Failure("That channel has no tags to choose from!".into())
		);
	}

	#[tokio::test]
	async fn setup_stores_selected_tags() {
		let prompter = ScriptedPrompter::default();
		prompter.answer(Ok(vec!["2".into()]));
		let form = Form::new(1, "abc12", "Form", vec![]);
		let config = Configuration::defaults(1);
		let channel = forum(vec![ForumTag { id: 2, name: "Accepted".into(), emoji: None }]);

		let outcome = TagAdd.setup(&setup_ctx(&form, &config, &prompter, Some(&channel))).await;
		assert_eq!(outcome, SetupOutcome::Success(json!({ "tags": ["2"] })));

		let fields = TagAdd.transform(&json!({ "tags": ["2"] }), &TransformContext {
			channel: Some(&channel),
			..TransformContext::bare(ActionEvent::Accept)
		});
		assert_eq!(fields[2], DisplayField::new("Tags added", "Accepted"));
	}

	#[test]
	fn tag_summary_shows_emoji_and_name() {
		let channel = forum(vec![
			ForumTag { id: 2, name: "Accepted".into(), emoji: Some("✅".into()) },
			ForumTag { id: 3, name: "Reviewed".into(), emoji: None },
			ForumTag { id: 4, name: "Denied".into(), emoji: Some("❌".into()) },
		]);

		let fields = TagAdd.transform(&json!({ "tags": ["2", "3"] }), &TransformContext {
			channel: Some(&channel),
			..TransformContext::bare(ActionEvent::Submit)
		});
		assert_eq!(fields[2], DisplayField::new("Tags added", "✅ Accepted, Reviewed"));
	}
}
