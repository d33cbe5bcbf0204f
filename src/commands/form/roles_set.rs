use log::info;
use serenity::all::{CommandDataOption, CommandInteraction, CommandOptionType, CreateCommandOption, CreateEmbed};
use serenity::async_trait;
use serenity::client::Context;

use crate::command_define::{BaseCommand, Command};
use crate::commands::{event_arg, event_option, form_id_option, guild_of, require_form, PARAM_FORM_ID};
use crate::error::{BotError, BotResult};
use crate::forms::form::{RoleAction, RoleOp};
use crate::utils::confirm::confirm;
use crate::utils::perms::Access;
use crate::utils::{client, convert, reply};

const PARAM_ACTION: &str = "action";
const PARAM_ROLES: &str = "roles";

pub struct RolesSetCommand;

impl BaseCommand for RolesSetCommand {
	fn new() -> Self {
		Self {}
	}

	fn get_name(&self) -> String {
		"roles-set".into()
	}

	fn get_description(&self) -> String {
		"Sets the roles given or taken on one event".into()
	}
}

fn role_op(raw: Option<String>) -> BotResult<RoleOp> {
	match raw.as_deref() {
		Some("add") | None => Ok(RoleOp::Add),
		Some("remove") => Ok(RoleOp::Remove),
		Some(other) => Err(BotError::validation(format!("`{}` is not add or remove.", other))),
	}
}

impl RolesSetCommand {
	async fn run(&self, ctx: &Context, command: &CommandInteraction, args: &[CommandDataOption]) -> BotResult<Option<CreateEmbed>> {
		let server_id = guild_of(command)?;
		let event = event_arg(args)?.ok_or_else(|| BotError::validation("An event is required."))?;
		let op = role_op(convert::string_arg(args, PARAM_ACTION))?;
		let role_ids = convert::parse_role_ids(&convert::string_arg(args, PARAM_ROLES).unwrap_or_default());

		let lifecycle = client::lifecycle().await?;
		let mut form = require_form(&lifecycle, server_id, convert::string_arg(args, PARAM_FORM_ID)).await?;

		let lost = form.roles_outside(event);
		if lost > 0 {
			let question = reply::info_embed(
				"Replace role settings?",
				format!(
					"**{}** has {} role(s) configured on other events. Setting roles for {} replaces them.",
					form.label(),
					lost,
					event
				),
			);
			if !confirm(ctx, command, question).await? {
				return Ok(None);
			}
		}

		let roles: Vec<RoleAction> = role_ids
			.iter()
			.map(|id| RoleAction {
				id: id.to_string(),
				action: op,
			})
			.collect();
		form.replace_roles(event, roles);
		lifecycle.stores.forms.save(&mut form).await?;
		info!("guild {}: roles of form {} set for {} ({} roles)", server_id, form.hid, event, role_ids.len());

		let text = if role_ids.is_empty() {
			format!("Cleared the roles of **{}**.", form.label())
		} else {
			let mentions: Vec<String> = role_ids.iter().map(|id| format!("<@&{}>", id)).collect();
			let verb = match op {
				RoleOp::Add => "given",
				RoleOp::Remove => "removed",
			};
			format!("On {} of **{}** these roles are {}: {}", event, form.label(), verb, mentions.join(", "))
		};
		Ok(Some(reply::success_embed("Roles set", text)))
	}
}

#[async_trait]
impl Command for RolesSetCommand {
	fn build_args(&self, option: CreateCommandOption) -> CreateCommandOption {
		option
			.add_sub_option(form_id_option(true))
			.add_sub_option(event_option(true))
			.add_sub_option(
				CreateCommandOption::new(CommandOptionType::String, PARAM_ACTION, "Give or take the roles")
					.required(true)
					.add_string_choice("add", "add")
					.add_string_choice("remove", "remove"),
			)
			.add_sub_option(CreateCommandOption::new(
				CommandOptionType::String,
				PARAM_ROLES,
				"Role mentions or IDs, empty to clear",
			))
	}

	fn access(&self) -> Access {
		Access::Moderator
	}

	async fn execute(&self, ctx: Context, command: CommandInteraction, args: Vec<CommandDataOption>) -> serenity::Result<()> {
		match self.run(&ctx, &command, &args).await {
			Ok(Some(embed)) => reply::edit(&ctx, &command, embed).await,
			Ok(None) => Ok(()),
			Err(error) => reply::edit_error(&ctx, &command, &error).await,
		}
	}
}
