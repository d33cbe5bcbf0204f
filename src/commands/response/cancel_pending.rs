use serenity::all::{CommandDataOption, CommandInteraction, CommandOptionType, CreateCommandOption, CreateEmbed};
use serenity::async_trait;
use serenity::client::Context;

use crate::command_define::{BaseCommand, Command};
use crate::commands::{form_id_option, guild_of, PARAM_FORM_ID};
use crate::error::{BotError, BotResult};
use crate::lifecycle::CancelSource;
use crate::utils::confirm::confirm;
use crate::utils::perms::Access;
use crate::utils::{client, convert, reply};

const PARAM_USER: &str = "user";

pub struct CancelPendingCommand;

impl BaseCommand for CancelPendingCommand {
	fn new() -> Self {
		Self {}
	}

	fn get_name(&self) -> String {
		"cancel-pending".into()
	}

	fn get_description(&self) -> String {
		"Cancels another member's response in progress".into()
	}
}

impl CancelPendingCommand {
	async fn run(&self, ctx: &Context, command: &CommandInteraction, args: &[CommandDataOption]) -> BotResult<Option<CreateEmbed>> {
		let server_id = guild_of(command)?;
		let user_id = convert::user_arg(args, PARAM_USER).ok_or_else(|| BotError::validation("Choose a member."))?;
		let hid = convert::string_arg(args, PARAM_FORM_ID)
			.ok_or_else(|| BotError::validation("A form ID is required."))?
			.to_lowercase();

		let lifecycle = client::lifecycle().await?;
		let response = lifecycle
			.stores
			.responses
			.find_active(server_id, user_id, &hid)
			.await?
			.ok_or_else(|| BotError::validation(format!("<@{}> has no response in progress for `{}`.", user_id, hid)))?;

		let question = reply::info_embed(
			"Cancel response?",
			format!(
				"Cancel the {} response of <@{}> to `{}`, started {}?",
				response.state,
				user_id,
				hid,
				convert::utc_to_local_format(&response.created_at)
			),
		);
		if !confirm(ctx, command, question).await? {
			return Ok(None);
		}

		lifecycle.cancel(response, CancelSource::Moderator(command.user.id.get())).await?;
		Ok(Some(reply::success_embed(
			"Response cancelled",
			format!("The response of <@{}> to `{}` was cancelled.", user_id, hid),
		)))
	}
}

#[async_trait]
impl Command for CancelPendingCommand {
	fn build_args(&self, option: CreateCommandOption) -> CreateCommandOption {
		option
			.add_sub_option(CreateCommandOption::new(CommandOptionType::User, PARAM_USER, "Member").required(true))
			.add_sub_option(form_id_option(true))
	}

	fn access(&self) -> Access {
		Access::Manager
	}

	async fn execute(&self, ctx: Context, command: CommandInteraction, args: Vec<CommandDataOption>) -> serenity::Result<()> {
		match self.run(&ctx, &command, &args).await {
			Ok(Some(embed)) => reply::edit(&ctx, &command, embed).await,
			Ok(None) => Ok(()),
			Err(error) => reply::edit_error(&ctx, &command, &error).await,
		}
	}
}
