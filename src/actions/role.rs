use async_trait::async_trait;
use log::warn;
use serde_json::{json, Value};

use crate::actions::{
	common_fields, snowflakes, Action, DisplayField, ExecutionContext, SetupContext, SetupOutcome, TransformContext,
};
use crate::error::ActionError;
use crate::forms::form::RoleOp;
use crate::forms::ActionEvent;

const MAX_ROLES: usize = 5;

/// Grants or revokes roles on the applicant after checking the bot may manage them.
pub struct RoleAction {
	op: RoleOp,
}

impl RoleAction {
	pub fn add() -> Self {
		RoleAction { op: RoleOp::Add }
	}

	pub fn remove() -> Self {
		RoleAction { op: RoleOp::Remove }
	}
}

#[async_trait]
impl Action for RoleAction {
	fn id(&self) -> &'static str {
		self.op.action_id()
	}

	fn description(&self) -> &'static str {
		match self.op {
			RoleOp::Add => "Add roles to a member",
			RoleOp::Remove => "Remove roles from a member",
		}
	}

	fn events(&self) -> &'static [ActionEvent] {
		&ActionEvent::ALL
	}

	fn priority(&self) -> i32 {
		1
	}

	async fn setup(&self, ctx: &SetupContext<'_>) -> SetupOutcome {
		let prompt = match self.op {
			RoleOp::Add => "Select the roles you want to add to the user",
			RoleOp::Remove => "Select the roles you want to remove from the user",
		};

		match ctx.prompter.select_roles(prompt, 1, MAX_ROLES).await {
			Ok(roles) => {
				let roles: Vec<String> = roles.into_iter().map(|id| id.to_string()).collect();
				SetupOutcome::Success(json!({ "roles": roles }))
			},
			Err(message) => SetupOutcome::Failure(message),
		}
	}

	async fn handler(&self, ctx: &ExecutionContext<'_>) -> Result<(), ActionError> {
		let role_ids = snowflakes(&ctx.action.data, "roles")?;
		if role_ids.is_empty() {
			return Ok(());
		}

		let standing = ctx.client.bot_standing(ctx.guild).await?;
		if !standing.manage_roles {
			return Err(ActionError::Permission("Bot missing \"Manage Roles\" permission".to_string()));
		}

		// Every role is checked before any is touched.
		let guild_roles = ctx.client.guild_roles(ctx.guild).await?;
		let mut targets = vec![];
		for id in role_ids {
			let Some(role) = guild_roles.iter().find(|role| role.id == id) else {
				warn!("guild {}: role {} no longer exists, skipping", ctx.guild, id);
				continue;
			};
			if role.position >= standing.highest_position {
				return Err(ActionError::Hierarchy(format!(
					"Role \"{}\" is higher than or equal to bot's highest role in hierarchy",
					role.name
				)));
			}
			targets.push(id);
		}

		for id in targets {
			match self.op {
				RoleOp::Add => ctx.client.add_member_role(ctx.guild, ctx.member, id).await?,
				RoleOp::Remove => ctx.client.remove_member_role(ctx.guild, ctx.member, id).await?,
			}
		}

		Ok(())
	}

	fn transform(&self, data: &Value, ctx: &TransformContext<'_>) -> Vec<DisplayField> {
		let mentions: Vec<String> = snowflakes(data, "roles")
			.unwrap_or_default()
			.into_iter()
			.map(|id| format!("<@&{}>", id))
			.collect();
		let label = match self.op {
			RoleOp::Add => "Roles added",
			RoleOp::Remove => "Roles removed",
		};

		let mut fields = common_fields(self, ctx.event);
		fields.push(DisplayField::new(label, mentions.join(", ")));
		fields
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::forms::form::StoredAction;
	use crate::forms::{Configuration, Form, Response};
	use crate::gateway::RoleInfo;
	use crate::testing::{GatewayCall, ScriptedGateway, ScriptedPrompter};

	fn gateway(manage_roles: bool, highest: u16) -> ScriptedGateway {
		let gateway = ScriptedGateway::default();
		gateway.set_standing(manage_roles, highest);
		gateway.set_roles(vec![
			RoleInfo { id: 111, name: "Staff".into(), position: 6 },
			RoleInfo { id: 222, name: "Member".into(), position: 2 },
		]);
		gateway
	}

	async fn run(action: &RoleAction, gateway: &ScriptedGateway, roles: Value) -> Result<(), ActionError> {
		let form = Form::new(1, "abc12", "Form", vec![]);
		let response = Response::new(1, 50, 3, "abc12");
		let config = Configuration::defaults(1);
		let stored = StoredAction::new(action.id(), roles);
		action
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

	#[tokio::test]
	async fn missing_permission_is_reported() {
		let gateway = gateway(false, 10);
		let error = run(&RoleAction::add(), &gateway, json!({ "roles": ["222"] })).await.unwrap_err();
		assert!(matches!(error, ActionError::Permission(_)));
		assert!(gateway.calls().is_empty());
	}

	#[tokio::test]
	async fn hierarchy_is_checked_before_mutating() {
		let gateway = gateway(true, 5);
		let error = run(&RoleAction::add(), &gateway, json!({ "roles": ["222", "111"] })).await.unwrap_err();
		assert_eq!(error.reason(), "Role \"Staff\" is higher than or equal to bot's highest role in hierarchy");
		assert!(gateway.calls().is_empty());
	}

	#[tokio::test]
	async fn equal_position_is_rejected() {
		let gateway = gateway(true, 6);
		assert!(matches!(
			run(&RoleAction::add(), &gateway, json!({ "roles": ["111"] })).await,
			Err(ActionError::Hierarchy(_))
		));
	}

	#[tokio::test]
	async fn remove_revokes_and_skips_deleted_roles() {
		let gateway = gateway(true, 10);
		run(&RoleAction::remove(), &gateway, json!({ "roles": ["999", "222"] })).await.unwrap();
		assert_eq!(gateway.calls(), vec![GatewayCall::RemoveRole { user: 50, role: 222 }]);
	}

	#[tokio::test]
	async fn setup_asks_for_one_to_five_roles() {
		let prompter = ScriptedPrompter::default();
		prompter.answer(Ok(vec!["222".into(), "111".into()]));
		let form = Form::new(1, "abc12", "Form", vec![]);
		let config = Configuration::defaults(1);

		let outcome = RoleAction::add()
			.setup(&SetupContext {
				guild: 1,
				form: &form,
				event: ActionEvent::Accept,
				channel: None,
				config: &config,
				prompter: &prompter,
			})
			.await;
		assert_eq!(outcome, SetupOutcome::Success(json!({ "roles": ["222", "111"] })));
		assert_eq!(prompter.bounds(), vec![(1, MAX_ROLES)]);
	}

	#[test]
	fn transform_lists_mentions() {
		let fields = RoleAction::add().transform(&json!({ "roles": ["1", "2"] }), &TransformContext::bare(ActionEvent::Accept));
		assert_eq!(fields, vec![
			DisplayField::new("Type", "role.add"),
			DisplayField::new("Event", "ACCEPT"),
			DisplayField::new("Roles added", "<@&1>, <@&2>"),
		]);
	}
}
