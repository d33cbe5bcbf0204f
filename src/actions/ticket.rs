use async_trait::async_trait;
use serde_json::{json, Value};

use crate::actions::{common_fields, Action, DisplayField, ExecutionContext, SetupContext, SetupOutcome, TransformContext};
use crate::error::ActionError;
use crate::forms::ActionEvent;
use crate::gateway::TicketRequest;

const EVENTS: [ActionEvent; 2] = [ActionEvent::Submit, ActionEvent::Accept];
const DEFAULT_MESSAGE: &str = "Thanks for applying! A moderator will be with you shortly.";

/// Opens a private channel between the applicant and the ticket roles.
pub struct TicketCreate;

impl TicketCreate {
	pub fn channel_name(form_hid: &str, user_id: u64) -> String {
		format!("{}-{}", form_hid, user_id)
	}
}

#[async_trait]
impl Action for TicketCreate {
	fn id(&self) -> &'static str {
		"ticket.create"
	}

	fn description(&self) -> &'static str {
		"Create a ticket channel for the applicant"
	}

	fn events(&self) -> &'static [ActionEvent] {
		&EVENTS
	}

	fn priority(&self) -> i32 {
		2
	}

	async fn setup(&self, ctx: &SetupContext<'_>) -> SetupOutcome {
		if ctx.form.tickets_id.or(ctx.config.ticket_category).is_none() {
			return SetupOutcome::Failure(
				"No ticket category is set for this form or server!".to_string(),
			);
		}
		SetupOutcome::Success(json!({}))
	}

	async fn handler(&self, ctx: &ExecutionContext<'_>) -> Result<(), ActionError> {
		let Some(category_id) = ctx.form.tickets_id.or(ctx.config.ticket_category) else {
			return Err(ActionError::InvalidData("No ticket category is configured".to_string()));
		};

		let roles = if ctx.form.ticket_roles.is_empty() {
			&ctx.config.ticket_roles
		} else {
			&ctx.form.ticket_roles
		};
		let role_ids = roles.iter().filter_map(|id| id.parse().ok()).collect();

		let message = ctx
			.form
			.ticket_msg
			.clone()
			.or_else(|| ctx.config.ticket_message.clone())
			.unwrap_or_else(|| DEFAULT_MESSAGE.to_string());

		ctx.client
			.create_ticket(TicketRequest {
				guild_id: ctx.guild,
				category_id,
				name: TicketCreate::channel_name(&ctx.form.hid, ctx.member),
				user_id: ctx.member,
				role_ids,
				message: format!("<@{}> {}", ctx.member, message),
			})
			.await?;
		Ok(())
	}

	fn transform(&self, _: &Value, ctx: &TransformContext<'_>) -> Vec<DisplayField> {
		let category = ctx
			.form
			.and_then(|form| form.tickets_id)
			.or_else(|| ctx.config.and_then(|config| config.ticket_category));
		let roles = match (ctx.form, ctx.config) {
			(Some(form), _) if !form.ticket_roles.is_empty() => form.ticket_roles.clone(),
			(_, Some(config)) => config.ticket_roles.clone(),
			_ => vec![],
		};

		let mut summary = match category {
			Some(id) => format!("Category <#{}>", id),
			None => "No category set".to_string(),
		};
		if !roles.is_empty() {
			let mentions: Vec<String> = roles.iter().map(|id| format!("<@&{}>", id)).collect();
			summary.push_str(&format!(", visible to {}", mentions.join(", ")));
		}

		let mut fields = common_fields(self, ctx.event);
		fields.push(DisplayField::new("Ticket", summary));
		fields
	}
}
