use log::info;
use serenity::all::{CommandDataOption, CommandInteraction, CreateCommandOption, CreateEmbed};
use serenity::async_trait;
use serenity::client::Context;

use crate::command_define::{BaseCommand, Command};
use crate::commands::{event_arg, event_option, form_id_option, guild_of, require_form, PARAM_FORM_ID};
use crate::error::BotResult;
use crate::utils::confirm::confirm;
use crate::utils::perms::Access;
use crate::utils::{client, convert, reply};

pub struct ActionClearCommand;

impl BaseCommand for ActionClearCommand {
	fn new() -> Self {
		Self {}
	}

	fn get_name(&self) -> String {
		"action-clear".into()
	}

	fn get_description(&self) -> String {
		"Removes the actions attached to a form".into()
	}
}

impl ActionClearCommand {
	async fn run(&self, ctx: &Context, command: &CommandInteraction, args: &[CommandDataOption]) -> BotResult<Option<CreateEmbed>> {
		let server_id = guild_of(command)?;
		let event = event_arg(args)?;
		let lifecycle = client::lifecycle().await?;
		let mut form = require_form(&lifecycle, server_id, convert::string_arg(args, PARAM_FORM_ID)).await?;

		let scope = match event {
			Some(event) => format!("on {}", event),
			None => "on every event".to_string(),
		};
		let question = reply::info_embed(
			"Clear actions?",
			format!("Every action of **{}** {} will be removed. Roles set with `roles-set` are kept.", form.label(), scope),
		);
		if !confirm(ctx, command, question).await? {
			return Ok(None);
		}

		let removed = form.clear_actions(event);
		if removed > 0 {
			lifecycle.stores.forms.save(&mut form).await?;
		}
		info!("guild {}: cleared {} actions of form {} {}", server_id, removed, form.hid, scope);

		Ok(Some(reply::success_embed(
			"Actions cleared",
			format!("Removed {} action(s) {}.", removed, scope),
		)))
	}
}

#[async_trait]
impl Command for ActionClearCommand {
	fn build_args(&self, option: CreateCommandOption) -> CreateCommandOption {
		option.add_sub_option(form_id_option(true)).add_sub_option(event_option(false))
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
