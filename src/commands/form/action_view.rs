use serenity::all::{CommandDataOption, CommandInteraction, CreateCommandOption, CreateEmbed};
use serenity::async_trait;
use serenity::client::Context;

use crate::actions::TransformContext;
use crate::command_define::{BaseCommand, Command};
use crate::commands::{event_arg, event_option, form_id_option, guild_of, require_form, PARAM_FORM_ID};
use crate::error::BotResult;
use crate::forms::ActionEvent;
use crate::utils::perms::Access;
use crate::utils::{client, convert, reply};

pub struct ActionViewCommand;

impl BaseCommand for ActionViewCommand {
	fn new() -> Self {
		Self {}
	}

	fn get_name(&self) -> String {
		"action-view".into()
	}

	fn get_description(&self) -> String {
		"Lists the actions that run on a form's events".into()
	}
}

impl ActionViewCommand {
	async fn run(&self, command: &CommandInteraction, args: &[CommandDataOption]) -> BotResult<CreateEmbed> {
		let server_id = guild_of(command)?;
		let lifecycle = client::lifecycle().await?;
		let form = require_form(&lifecycle, server_id, convert::string_arg(args, PARAM_FORM_ID)).await?;
		let config = lifecycle.stores.configs.get(server_id).await?;
		let events = match event_arg(args)? {
			Some(event) => vec![event],
			None => ActionEvent::ALL.to_vec(),
		};

		let channel = match form.channel_id.or(config.response_channel) {
			Some(id) => lifecycle.gateway.channel_info(id).await,
			None => None,
		};

		let mut listed = vec![];
		for event in events {
			let ctx = TransformContext {
				event,
				channel: channel.as_ref(),
				form: Some(&form),
				config: Some(&config),
			};
			for (index, stored) in form.configured_actions(event).iter().enumerate() {
				listed.push((format!("{} #{}", event, index + 1), lifecycle.registry.describe(stored, &ctx)));
			}
		}

		if listed.is_empty() {
			return Ok(reply::info_embed("Actions", format!("**{}** has no actions.", form.label())));
		}
		Ok(super::action_fields(
			reply::info_embed("Actions", format!("Actions of **{}**, in the order they are configured.", form.label())),
			listed,
		))
	}
}

#[async_trait]
impl Command for ActionViewCommand {
	fn build_args(&self, option: CreateCommandOption) -> CreateCommandOption {
		option.add_sub_option(form_id_option(true)).add_sub_option(event_option(false))
	}

	fn access(&self) -> Access {
		Access::Moderator
	}

	async fn execute(&self, ctx: Context, command: CommandInteraction, args: Vec<CommandDataOption>) -> serenity::Result<()> {
		match self.run(&command, &args).await {
			Ok(embed) => reply::edit(&ctx, &command, embed).await,
			Err(error) => reply::edit_error(&ctx, &command, &error).await,
		}
	}
}
