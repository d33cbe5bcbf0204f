use serenity::all::{CommandDataOption, CommandInteraction, CreateEmbed};
use serenity::async_trait;
use serenity::client::Context;

use crate::command_define::{BaseCommand, Command};
use crate::commands::guild_of;
use crate::error::BotResult;
use crate::forms::Configuration;
use crate::utils::perms::Access;
use crate::utils::{client, color, reply};

pub struct ViewCommand;

impl BaseCommand for ViewCommand {
	fn new() -> Self {
		Self {}
	}

	fn get_name(&self) -> String {
		"view".into()
	}

	fn get_description(&self) -> String {
		"Shows the server settings".into()
	}
}

fn channel(id: Option<u64>) -> String {
	id.map(|id| format!("<#{}>", id)).unwrap_or_else(|| "Not set".to_string())
}

fn mentions(ids: &[String], prefix: &str) -> String {
	if ids.is_empty() {
		return "None".to_string();
	}
	ids.iter().map(|id| format!("<{}{}>", prefix, id)).collect::<Vec<_>>().join(", ")
}

fn settings_embed(config: &Configuration) -> CreateEmbed {
	let opped_users: Vec<String> = config.opped.users.iter().map(|u| u.id.clone()).collect();
	let opped_roles: Vec<String> = config.opped.roles.iter().map(|r| r.id.clone()).collect();

	let mut embed = CreateEmbed::new()
		.title("Server settings")
		.color(color::normal_color())
		.field("Response channel", channel(config.response_channel), true)
		.field("Ephemeral replies", if config.msg_ephemeral { "On" } else { "Off" }, true)
		.field("Auto thread", if config.autothread { "On" } else { "Off" }, true)
		.field("Ticket category", channel(config.ticket_category), true)
		.field("Ticket roles", mentions(&config.ticket_roles, "@&"), true)
		.field(
			"Ticket message",
			config.ticket_message.clone().unwrap_or_else(|| "Default".to_string()),
			false,
		)
		.field("Opped users", mentions(&opped_users, "@"), true)
		.field("Opped roles", mentions(&opped_roles, "@&"), true);
	if !config.is_persisted() {
		embed = embed.description("No settings saved yet, showing defaults.");
	}

	super::with_dropdown(embed, &config.dropdown(), config.has_custom_dropdown())
}

impl ViewCommand {
	async fn run(&self, command: &CommandInteraction) -> BotResult<CreateEmbed> {
		let server_id = guild_of(command)?;
		let config = client::lifecycle().await?.stores.configs.get(server_id).await?;
		Ok(settings_embed(&config))
	}
}

#[async_trait]
impl Command for ViewCommand {
	fn access(&self) -> Access {
		Access::Moderator
	}

	async fn execute(&self, ctx: Context, command: CommandInteraction, _: Vec<CommandDataOption>) -> serenity::Result<()> {
		match self.run(&command).await {
			Ok(embed) => reply::edit(&ctx, &command, embed).await,
			Err(error) => reply::edit_error(&ctx, &command, &error).await,
		}
	}
}
