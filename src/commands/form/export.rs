use serenity::all::{
	CommandDataOption, CommandInteraction, CommandOptionType, CreateAttachment, CreateCommandOption, EditInteractionResponse,
};
use serenity::async_trait;
use serenity::client::Context;

use crate::command_define::{BaseCommand, Command};
use crate::commands::guild_of;
use crate::error::{BotError, BotResult};
use crate::stores::forms::export;
use crate::utils::perms::Access;
use crate::utils::{client, convert, reply};

const PARAM_FORM_IDS: &str = "form_ids";
const FILE_NAME: &str = "forms.json";

pub struct ExportCommand;

impl BaseCommand for ExportCommand {
	fn new() -> Self {
		Self {}
	}

	fn get_name(&self) -> String {
		"export".into()
	}

	fn get_description(&self) -> String {
		"Exports forms as a JSON file".into()
	}
}

fn split_hids(text: &str) -> Vec<String> {
	text.split(|c: char| c == ',' || c.is_whitespace())
		.map(str::trim)
		.filter(|hid| !hid.is_empty())
		.map(str::to_lowercase)
		.collect()
}

impl ExportCommand {
	async fn run(&self, command: &CommandInteraction, args: &[CommandDataOption]) -> BotResult<(usize, CreateAttachment)> {
		let server_id = guild_of(command)?;
		let hids = convert::string_arg(args, PARAM_FORM_IDS).map(|text| split_hids(&text)).unwrap_or_default();

		let lifecycle = client::lifecycle().await?;
		let drafts = export(lifecycle.stores.forms.as_ref(), server_id, &hids).await?;
		if drafts.is_empty() {
			return Err(BotError::validation("There are no forms to export."));
		}

		let json = serde_json::to_vec_pretty(&drafts)
			.map_err(|e| BotError::validation(format!("Could not encode the forms: {}", e)))?;
		Ok((drafts.len(), CreateAttachment::bytes(json, FILE_NAME)))
	}
}

#[async_trait]
impl Command for ExportCommand {
	fn build_args(&self, option: CreateCommandOption) -> CreateCommandOption {
		option.add_sub_option(CreateCommandOption::new(
			CommandOptionType::String,
			PARAM_FORM_IDS,
			"Comma separated form IDs, all forms when empty",
		))
	}

	fn access(&self) -> Access {
		Access::Moderator
	}

	async fn execute(&self, ctx: Context, command: CommandInteraction, args: Vec<CommandDataOption>) -> serenity::Result<()> {
		match self.run(&command, &args).await {
			Ok((count, file)) => {
				command
					.edit_response(
						&ctx.http,
						EditInteractionResponse::new()
							.embed(reply::success_embed("Export", format!("Exported {} form(s).", count)))
							.new_attachment(file),
					)
					.await?;
				Ok(())
			},
			Err(error) => reply::edit_error(&ctx, &command, &error).await,
		}
	}
}
