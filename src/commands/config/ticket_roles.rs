use log::info;
use serenity::all::{ChannelType, CommandDataOption, CommandInteraction, CommandOptionType, CreateCommandOption, CreateEmbed};
use serenity::async_trait;
use serenity::client::Context;

use crate::command_define::{BaseCommand, Command};
use crate::commands::guild_of;
use crate::error::BotResult;
use crate::utils::perms::Access;
use crate::utils::{client, convert, reply};

const PARAM_ROLES: &str = "roles";
const PARAM_CATEGORY: &str = "category";
const PARAM_MESSAGE: &str = "message";

pub struct TicketRolesCommand;

impl BaseCommand for TicketRolesCommand {
	fn new() -> Self {
		Self {}
	}

	fn get_name(&self) -> String {
		"ticketroles".into()
	}

	fn get_description(&self) -> String {
		"Sets the server's default ticket roles, category and message".into()
	}
}

impl TicketRolesCommand {
	async fn run(&self, command: &CommandInteraction, args: &[CommandDataOption]) -> BotResult<CreateEmbed> {
		let server_id = guild_of(command)?;
		let lifecycle = client::lifecycle().await?;
		let mut config = lifecycle.stores.configs.get(server_id).await?;

		let roles = convert::parse_role_ids(&convert::string_arg(args, PARAM_ROLES).unwrap_or_default());
		config.ticket_roles = roles.iter().map(u64::to_string).collect();
		if let Some(category) = convert::channel_arg(args, PARAM_CATEGORY) {
			config.ticket_category = Some(category);
		}
		if let Some(message) = convert::string_arg(args, PARAM_MESSAGE) {
			config.ticket_message = Some(message);
		}
		lifecycle.stores.configs.save(&mut config).await?;
		info!("guild {}: ticket roles set to {:?}", server_id, config.ticket_roles);

		let roles = if roles.is_empty() {
			"No roles".to_string()
		} else {
			roles.iter().map(|id| format!("<@&{}>", id)).collect::<Vec<_>>().join(", ")
		};
		let category = config
			.ticket_category
			.map(|id| format!("<#{}>", id))
			.unwrap_or_else(|| "Not set".to_string());
		Ok(reply::success_embed(
			"Ticket settings saved",
			format!("Roles: {}\nCategory: {}", roles, category),
		))
	}
}

#[async_trait]
impl Command for TicketRolesCommand {
	fn build_args(&self, option: CreateCommandOption) -> CreateCommandOption {
		option
			.add_sub_option(CreateCommandOption::new(
				CommandOptionType::String,
				PARAM_ROLES,
				"Role mentions or IDs that can see tickets, empty to clear",
			))
			.add_sub_option(
				CreateCommandOption::new(CommandOptionType::Channel, PARAM_CATEGORY, "Category tickets are created in")
					.channel_types(vec![ChannelType::Category]),
			)
			.add_sub_option(CreateCommandOption::new(
				CommandOptionType::String,
				PARAM_MESSAGE,
				"First message in new tickets",
			))
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
