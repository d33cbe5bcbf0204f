use log::info;
use serenity::all::{
	ChannelId, CommandDataOption, CommandInteraction, CommandOptionType, CreateCommandOption, CreateEmbed, CreateMessage,
};
use serenity::async_trait;
use serenity::client::Context;

use crate::command_define::{BaseCommand, Command};
use crate::commands::{form_id_option, guild_of, require_form, PARAM_FORM_ID};
use crate::error::BotResult;
use crate::gateway::render;
use crate::utils::perms::Access;
use crate::utils::{client, convert, reply};

const PARAM_CHANNEL: &str = "channel";

pub struct PostCommand;

impl BaseCommand for PostCommand {
	fn new() -> Self {
		Self {}
	}

	fn get_name(&self) -> String {
		"post".into()
	}

	fn get_description(&self) -> String {
		"Posts a form card with an apply button".into()
	}
}

impl PostCommand {
	async fn run(&self, ctx: &Context, command: &CommandInteraction, args: &[CommandDataOption]) -> BotResult<CreateEmbed> {
		let server_id = guild_of(command)?;
		let lifecycle = client::lifecycle().await?;
		let form = require_form(&lifecycle, server_id, convert::string_arg(args, PARAM_FORM_ID)).await?;
		let channel_id = convert::channel_arg(args, PARAM_CHANNEL).unwrap_or(command.channel_id.get());

		let (embed, button) = render::form_card(&form);
		let message = ChannelId::new(channel_id)
			.send_message(&ctx.http, CreateMessage::new().embed(embed).components(vec![button]))
			.await?;

		lifecycle
			.stores
			.form_posts
			.create(entity::FormPost {
				id: 0,
				server_id,
				channel_id,
				message_id: message.id.get(),
				form_hid: form.hid.clone(),
				bound: true,
			})
			.await?;
		info!("guild {}: form {} posted in {}", server_id, form.hid, channel_id);

		Ok(reply::success_embed("Form posted", format!("**{}** was posted in <#{}>.", form.label(), channel_id)))
	}
}

#[async_trait]
impl Command for PostCommand {
	fn build_args(&self, option: CreateCommandOption) -> CreateCommandOption {
		option.add_sub_option(form_id_option(true)).add_sub_option(CreateCommandOption::new(
			CommandOptionType::Channel,
			PARAM_CHANNEL,
			"Channel to post in, this channel when empty",
		))
	}

	fn access(&self) -> Access {
		Access::Moderator
	}

	fn ephemeral(&self) -> bool {
		true
	}

	async fn execute(&self, ctx: Context, command: CommandInteraction, args: Vec<CommandDataOption>) -> serenity::Result<()> {
		match self.run(&ctx, &command, &args).await {
			Ok(embed) => reply::edit(&ctx, &command, embed).await,
			Err(error) => reply::edit_error(&ctx, &command, &error).await,
		}
	}
}
