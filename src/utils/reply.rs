use log::error;
use serenity::all::{
	CommandInteraction, ComponentInteraction, CreateEmbed, CreateInteractionResponse, CreateInteractionResponseMessage,
	EditInteractionResponse,
};
use serenity::client::Context;

use crate::error::BotError;
use crate::utils::color;

pub fn success_embed(title: &str, description: impl Into<String>) -> CreateEmbed {
	CreateEmbed::new().title(title).description(description).color(color::accepted_color())
}

pub fn info_embed(title: &str, description: impl Into<String>) -> CreateEmbed {
	CreateEmbed::new().title(title).description(description).color(color::normal_color())
}

pub fn error_embed(description: impl Into<String>) -> CreateEmbed {
	CreateEmbed::new().title("Error").description(description).color(color::denied_color())
}

pub async fn defer(ctx: &Context, command: &CommandInteraction, ephemeral: bool) -> serenity::Result<()> {
	command
		.create_response(
			&ctx.http,
			CreateInteractionResponse::Defer(CreateInteractionResponseMessage::new().ephemeral(ephemeral)),
		)
		.await
}

pub async fn send(ctx: &Context, command: &CommandInteraction, embed: CreateEmbed, ephemeral: bool) -> serenity::Result<()> {
	command
		.create_response(
			&ctx.http,
			CreateInteractionResponse::Message(CreateInteractionResponseMessage::new().embed(embed).ephemeral(ephemeral)),
		)
		.await
}

/// Replaces the deferred or earlier response with a single embed.
pub async fn edit(ctx: &Context, command: &CommandInteraction, embed: CreateEmbed) -> serenity::Result<()> {
	command
		.edit_response(&ctx.http, EditInteractionResponse::new().embeds(vec![embed]).components(vec![]))
		.await?;
	Ok(())
}

/// Reports a failed command on its deferred response. Internal errors are logged and shown generically.
pub async fn edit_error(ctx: &Context, command: &CommandInteraction, error: &BotError) -> serenity::Result<()> {
	if matches!(error, BotError::Persistence(_) | BotError::Discord(_)) {
		error!("/{} failed: {}", command.data.name, error);
	}
	edit(ctx, command, error_embed(error.user_message())).await
}

pub async fn component(
	ctx: &Context,
	interaction: &ComponentInteraction,
	embed: CreateEmbed,
	ephemeral: bool,
) -> serenity::Result<()> {
	interaction
		.create_response(
			&ctx.http,
			CreateInteractionResponse::Message(CreateInteractionResponseMessage::new().embed(embed).ephemeral(ephemeral)),
		)
		.await
}
