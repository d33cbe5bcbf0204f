use log::info;
use serenity::all::{CommandDataOption, CommandInteraction, CommandOptionType, CreateCommandOption, CreateEmbed};
use serenity::async_trait;
use serenity::client::Context;

use crate::command_define::{BaseCommand, Command, Param};
use crate::commands::guild_of;
use crate::error::{BotError, BotResult};
use crate::utils::perms::Access;
use crate::utils::{client, convert, reply};

const PARAM_ENABLED: &str = "enabled";

const PARAMS: [Param; 1] = [(PARAM_ENABLED, "Hide command replies from other members", CommandOptionType::Boolean, true)];

pub struct MsgEphemeralCommand;

impl BaseCommand for MsgEphemeralCommand {
	fn new() -> Self {
		Self {}
	}

	fn get_name(&self) -> String {
		"msgephemeral".into()
	}

	fn get_description(&self) -> String {
		"Toggles ephemeral command replies".into()
	}
}

impl MsgEphemeralCommand {
	async fn run(&self, command: &CommandInteraction, args: &[CommandDataOption]) -> BotResult<CreateEmbed> {
		let server_id = guild_of(command)?;
		let enabled = convert::bool_arg(args, PARAM_ENABLED).ok_or_else(|| BotError::validation("Choose on or off."))?;

		let lifecycle = client::lifecycle().await?;
		let mut config = lifecycle.stores.configs.get(server_id).await?;
		config.msg_ephemeral = enabled;
		lifecycle.stores.configs.save(&mut config).await?;
		info!("guild {}: msg_ephemeral set to {}", server_id, enabled);

		Ok(reply::success_embed(
			"Ephemeral replies",
			if enabled {
				"Command replies are now only visible to the member who ran the command."
			} else {
				"Command replies are now visible to everyone."
			},
		))
	}
}

#[async_trait]
impl Command for MsgEphemeralCommand {
	fn args_param(&self) -> &'static [Param] {
		&PARAMS
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
