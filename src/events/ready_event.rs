use log::{error, info};
use serenity::all::{ActivityData, Command, Ready};
use serenity::client::Context;

use crate::commands;
use crate::utils::convert::format_discord_username;

pub async fn execute(ctx: Context, data_about_bot: Ready) {
	ctx.dnd();
	ctx.set_activity(Some(ActivityData::playing("Starting...")));
	info!(
		"logged in as {} in {} guilds",
		format_discord_username(&data_about_bot.user),
		data_about_bot.guilds.len()
	);

	match Command::create_global_command(&ctx.http, commands::app_commands_build()).await {
		Ok(command) => info!("registered /{}", command.name),
		Err(error) => error!("could not register commands: {}", error),
	}

	ctx.online();
	ctx.set_activity(Some(ActivityData::playing(format!("/{}", commands::ROOT_NAME))));
}
