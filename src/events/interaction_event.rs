use log::{debug, error, warn};
use serenity::all::{ComponentInteraction, ComponentInteractionDataKind, CreateEmbed, EditInteractionResponse, Interaction};
use serenity::client::Context;

use crate::commands;
use crate::commands::apply::outcome_embed;
use crate::error::{BotError, BotResult};
use crate::gateway::render;
use crate::lifecycle::{Lifecycle, Moderation};
use crate::utils::perms::{self, Access};
use crate::utils::{client, reply};

pub async fn execute(ctx: Context, interaction: Interaction) {
	match interaction {
		Interaction::Command(command) => commands::interaction_route(ctx, command).await,
		Interaction::Autocomplete(command) => commands::autocomplete_route(ctx, command).await,
		Interaction::Component(component) => {
			debug!(
				"\nmcID: {}\nmcType: {:?}\nmcCustomID: {}",
				component.id, component.data.kind, component.data.custom_id
			);
			component_route(ctx, component).await;
		},
		_ => {},
	}
}

async fn component_route(ctx: Context, mc: ComponentInteraction) {
	let res = if let Some(hid) = render::parse_apply_id(&mc.data.custom_id) {
		let hid = hid.to_string();
		apply_pressed(&ctx, &mc, &hid).await
	} else if let Some(response_id) = render::parse_moderation_id(&mc.data.custom_id) {
		moderation_selected(&ctx, &mc, response_id).await
	} else {
		// Confirmation and setup prompts are awaited by the command that sent them.
		Ok(())
	};

	if let Err(error) = res {
		error!("{}", error);
	}
}

async fn finish(ctx: &Context, mc: &ComponentInteraction, embed: CreateEmbed) -> serenity::Result<()> {
	mc.edit_response(&ctx.http, EditInteractionResponse::new().embeds(vec![embed])).await?;
	Ok(())
}

async fn apply_pressed(ctx: &Context, mc: &ComponentInteraction, hid: &str) -> serenity::Result<()> {
	let Some(guild_id) = mc.guild_id else {
		return reply::component(ctx, mc, reply::error_embed("Forms can only be used in a server."), true).await;
	};
	mc.defer_ephemeral(&ctx.http).await?;

	let outcome = match client::lifecycle().await {
		Ok(lifecycle) => lifecycle.apply(guild_id.get(), mc.user.id.get(), hid).await,
		Err(error) => Err(error),
	};
	finish(ctx, mc, outcome_embed(&outcome)).await
}

fn moderation_embed(moderation: &Moderation) -> CreateEmbed {
	let text = format!("Response marked as **{}**: {}", moderation.state, moderation.reason);
	match moderation.report.summary() {
		Some(summary) => reply::info_embed("Response reviewed", format!("{}\n\n{}", text, summary)),
		None => reply::success_embed("Response reviewed", text),
	}
}

async fn moderate(lifecycle: &Lifecycle, mc: &ComponentInteraction, response_id: u64, value: &str) -> BotResult<Moderation> {
	let guild_id = mc
		.guild_id
		.ok_or_else(|| BotError::validation("Responses can only be reviewed in a server."))?;
	let config = lifecycle.stores.configs.get(guild_id.get()).await?;
	if !perms::member_allowed(mc.member.as_ref(), Access::Moderator, &config) {
		return Err(BotError::validation("You do not have permission to review responses."));
	}

	lifecycle.moderate(response_id, value, mc.user.id.get()).await
}

async fn moderation_selected(ctx: &Context, mc: &ComponentInteraction, response_id: u64) -> serenity::Result<()> {
	let ComponentInteractionDataKind::StringSelect { values } = &mc.data.kind else {
		warn!("moderation component {} is not a select menu", mc.data.custom_id);
		return Ok(());
	};
	let Some(value) = values.first() else {
		return Ok(());
	};
	mc.defer_ephemeral(&ctx.http).await?;

	let outcome = match client::lifecycle().await {
		Ok(lifecycle) => moderate(&lifecycle, mc, response_id, value).await,
		Err(error) => Err(error),
	};
	let embed = match outcome {
		Ok(moderation) => moderation_embed(&moderation),
		Err(error) => {
			if matches!(error, BotError::Persistence(_) | BotError::Discord(_)) {
				error!("moderation of response {} failed: {}", response_id, error);
			}
			reply::error_embed(error.user_message())
		},
	};
	finish(ctx, mc, embed).await
}
