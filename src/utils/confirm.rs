use std::time::Duration;

use log::{debug, error};
use serenity::all::{
	ButtonStyle, CommandInteraction, CreateActionRow, CreateButton, CreateEmbed, EditInteractionResponse,
};
use serenity::client::Context;

use crate::utils::reply;

pub const CONFIRM_TIMEOUT: Duration = Duration::from_secs(30);

/// Asks the invoker to press OK within 30 seconds. On cancel or timeout the reply says nothing changed.
pub async fn confirm(ctx: &Context, command: &CommandInteraction, embed: CreateEmbed) -> serenity::Result<bool> {
	let ok_id = format!("ok_{}", command.id);
	let cancel_id = format!("cancel_{}", command.id);

	let message = command
		.edit_response(
			&ctx.http,
			EditInteractionResponse::new().embeds(vec![embed]).components(vec![CreateActionRow::Buttons(vec![
				CreateButton::new(&ok_id).style(ButtonStyle::Success).label("OK"),
				CreateButton::new(&cancel_id).style(ButtonStyle::Danger).label("Cancel"),
			])]),
		)
		.await?;

	let pressed = match message
		.await_component_interaction(&ctx.shard)
		.author_id(command.user.id)
		.timeout(CONFIRM_TIMEOUT)
		.await
	{
		Some(interaction) => {
			if let Err(error) = interaction.defer(&ctx.http).await {
				error!("{}", error);
			}
			interaction.data.custom_id == ok_id
		},
		None => {
			debug!("confirmation for /{} timed out", command.data.name);
			false
		},
	};

	if !pressed {
		reply::edit(ctx, command, reply::info_embed("Cancelled", "Nothing was changed.")).await?;
	}
	Ok(pressed)
}
