use serenity::all::{CommandDataOption, CommandInteraction, CreateCommandOption, CreateEmbed};
use serenity::async_trait;
use serenity::client::Context;

use crate::command_define::{BaseCommand, Command};
use crate::commands::{form_id_option, guild_of, PARAM_FORM_ID};
use crate::error::{BotError, BotResult};
use crate::lifecycle::CancelSource;
use crate::utils::confirm::confirm;
use crate::utils::{client, convert, reply};

pub struct CancelCommand;

impl BaseCommand for CancelCommand {
	fn new() -> Self {
		Self {}
	}

	fn get_name(&self) -> String {
		"cancel".into()
	}

	fn get_description(&self) -> String {
		"Cancels your response in progress".into()
	}
}

impl CancelCommand {
	async fn run(&self, ctx: &Context, command: &CommandInteraction, args: &[CommandDataOption]) -> BotResult<Option<CreateEmbed>> {
		let server_id = guild_of(command)?;
		let hid = convert::string_arg(args, PARAM_FORM_ID)
			.ok_or_else(|| BotError::validation("A form ID is required."))?
			.to_lowercase();

		let lifecycle = client::lifecycle().await?;
		let response = lifecycle
			.stores
			.responses
			.find_active(server_id, command.user.id.get(), &hid)
			.await?
			.ok_or_else(|| BotError::validation("You don't have a response in progress for that form."))?;

		let question = reply::info_embed(
			"Cancel response?",
			format!("Cancel your {} response to `{}`? Your answers will be lost.", response.state, hid),
		);
		if !confirm(ctx, command, question).await? {
			return Ok(None);
		}

		lifecycle.cancel(response, CancelSource::User).await?;
		Ok(Some(reply::success_embed("Cancelled", format!("Your response to `{}` was cancelled.", hid))))
	}
}

#[async_trait]
impl Command for CancelCommand {
	fn build_args(&self, option: CreateCommandOption) -> CreateCommandOption {
		option.add_sub_option(form_id_option(true))
	}

	fn ephemeral(&self) -> bool {
		true
	}

	async fn execute(&self, ctx: Context, command: CommandInteraction, args: Vec<CommandDataOption>) -> serenity::Result<()> {
		match self.run(&ctx, &command, &args).await {
			Ok(Some(embed)) => reply::edit(&ctx, &command, embed).await,
			Ok(None) => Ok(()),
			Err(error) => reply::edit_error(&ctx, &command, &error).await,
		}
	}
}
