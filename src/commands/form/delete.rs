use futures::future::join_all;
use log::{info, warn};
use serenity::all::{ChannelId, CommandDataOption, CommandInteraction, CreateCommandOption, CreateEmbed, EditMessage, MessageId};
use serenity::async_trait;
use serenity::client::Context;

use crate::command_define::{BaseCommand, Command};
use crate::commands::{form_id_option, guild_of, require_form, PARAM_FORM_ID};
use crate::error::BotResult;
use crate::forms::Form;
use crate::gateway::render;
use crate::utils::confirm::confirm;
use crate::utils::perms::Access;
use crate::utils::{client, convert, reply};

pub struct DeleteCommand;

impl BaseCommand for DeleteCommand {
	fn new() -> Self {
		Self {}
	}

	fn get_name(&self) -> String {
		"delete".into()
	}

	fn get_description(&self) -> String {
		"Deletes a form with its responses".into()
	}
}

/// Strips the apply button from every posted card of a deleted form. Returns how many could not be edited.
async fn detach_posts(ctx: &Context, form: &Form, posts: &[entity::FormPost]) -> usize {
	let edits = posts.iter().map(|post| async move {
		ChannelId::new(post.channel_id)
			.edit_message(
				&ctx.http,
				MessageId::new(post.message_id),
				EditMessage::new().embed(render::detached_card(form)).components(vec![]),
			)
			.await
			.map_err(|e| warn!("could not detach post {} of form {}: {}", post.message_id, form.hid, e))
	});

	join_all(edits).await.iter().filter(|res| res.is_err()).count()
}

impl DeleteCommand {
	async fn run(&self, ctx: &Context, command: &CommandInteraction, args: &[CommandDataOption]) -> BotResult<Option<CreateEmbed>> {
		let server_id = guild_of(command)?;
		let lifecycle = client::lifecycle().await?;
		let form = require_form(&lifecycle, server_id, convert::string_arg(args, PARAM_FORM_ID)).await?;

		let question = reply::info_embed(
			"Delete form?",
			format!(
				"**{}** and every response to it will be deleted. This cannot be undone.",
				form.label()
			),
		);
		if !confirm(ctx, command, question).await? {
			return Ok(None);
		}

		let posts = lifecycle.stores.forms.delete(&form).await?;
		let failed = detach_posts(ctx, &form, &posts).await;
		info!("guild {}: form {} deleted by {}", server_id, form.hid, command.user.id);

		let mut text = format!("**{}** was deleted.", form.label());
		if failed > 0 {
			text = format!("{}\n{} posted card(s) could not be updated.", text, failed);
		}
		Ok(Some(reply::success_embed("Form deleted", text)))
	}
}

#[async_trait]
impl Command for DeleteCommand {
	fn build_args(&self, option: CreateCommandOption) -> CreateCommandOption {
		option.add_sub_option(form_id_option(true))
	}

	fn access(&self) -> Access {
		Access::Moderator
	}

	async fn execute(&self, ctx: Context, command: CommandInteraction, args: Vec<CommandDataOption>) -> serenity::Result<()> {
		match self.run(&ctx, &command, &args).await {
			Ok(Some(embed)) => reply::edit(&ctx, &command, embed).await,
			Ok(None) => Ok(()),
			Err(error) => reply::edit_error(&ctx, &command, &error).await,
		}
	}
}
