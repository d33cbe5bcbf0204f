use log::{info, warn};
use serde::Deserialize;
use serenity::all::{CommandDataOption, CommandInteraction, CommandOptionType, CreateCommandOption, CreateEmbed};
use serenity::async_trait;
use serenity::client::Context;

use crate::command_define::{BaseCommand, Command};
use crate::commands::guild_of;
use crate::error::{BotError, BotResult};
use crate::forms::form::FormDraft;
use crate::gateway::render;
use crate::stores::forms::{import, ImportReport};
use crate::utils::perms::Access;
use crate::utils::{client, convert, reply};

const PARAM_FILE: &str = "file";
const MAX_FILE_SIZE: u32 = 1024 * 1024;

pub struct ImportCommand;

impl BaseCommand for ImportCommand {
	fn new() -> Self {
		Self {}
	}

	fn get_name(&self) -> String {
		"import".into()
	}

	fn get_description(&self) -> String {
		"Imports forms from an exported JSON file".into()
	}
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ImportFile {
	Many(Vec<FormDraft>),
	One(Box<FormDraft>),
}

fn parse_drafts(raw: &str) -> BotResult<Vec<FormDraft>> {
	match serde_json::from_str::<ImportFile>(raw) {
		Ok(ImportFile::Many(drafts)) => Ok(drafts),
		Ok(ImportFile::One(draft)) => Ok(vec![*draft]),
		Err(e) => Err(BotError::validation(format!("That file is not a valid form export: {}", e))),
	}
}

fn report_embed(report: &ImportReport) -> CreateEmbed {
	let mut embed = reply::success_embed(
		"Import finished",
		format!("Updated: {}\nCreated: {}", report.updated, report.created),
	);
	if !report.skipped.is_empty() {
		embed = embed.field(
			"Skipped (form limit reached)",
			render::truncate(&report.skipped.join("\n"), 1024),
			false,
		);
	}
	if !report.failed.is_empty() {
		embed = embed.field("Failed", render::truncate(&report.failed.join("\n"), 1024), false);
	}
	embed
}

async fn download(url: &str) -> BotResult<String> {
	let fetched = match reqwest::get(url).await {
		Ok(res) => res.error_for_status(),
		Err(e) => Err(e),
	};
	let text = match fetched {
		Ok(res) => res.text().await,
		Err(e) => Err(e),
	};
	text.map_err(|e| {
		warn!("import download failed: {}", e);
		BotError::validation("Could not download that file. Please try again.")
	})
}

impl ImportCommand {
	async fn run(&self, command: &CommandInteraction, args: &[CommandDataOption]) -> BotResult<CreateEmbed> {
		let server_id = guild_of(command)?;
		let attachment = convert::attachment_arg(args, PARAM_FILE)
			.and_then(|id| command.data.resolved.attachments.get(&id))
			.ok_or_else(|| BotError::validation("Attach the exported JSON file."))?;
		if attachment.size > MAX_FILE_SIZE {
			return Err(BotError::validation("That file is too large to import."));
		}

		let drafts = parse_drafts(&download(&attachment.url).await?)?;
		let lifecycle = client::lifecycle().await?;
		let report = import(lifecycle.stores.forms.as_ref(), server_id, drafts).await?;
		info!(
			"guild {}: import by {} updated {} created {} skipped {} failed {}",
			server_id,
			command.user.id,
			report.updated,
			report.created,
			report.skipped.len(),
			report.failed.len()
		);

		Ok(report_embed(&report))
	}
}

#[async_trait]
impl Command for ImportCommand {
	fn build_args(&self, option: CreateCommandOption) -> CreateCommandOption {
		option.add_sub_option(
			CreateCommandOption::new(CommandOptionType::Attachment, PARAM_FILE, "Exported forms JSON").required(true),
		)
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
