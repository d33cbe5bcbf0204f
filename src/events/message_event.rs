use log::{debug, error, warn};
use serenity::all::{CreateEmbed, CreateMessage, Message};
use serenity::client::Context;

use crate::error::BotResult;
use crate::lifecycle::AnswerOutcome;
use crate::utils::{client, reply};

/// Text recorded for a DM. An attachment wins over the message content.
fn answer_text(message: &Message) -> String {
	match message.attachments.first() {
		Some(attachment) => attachment.url.clone(),
		None => message.content.clone(),
	}
}

fn outcome_reply(outcome: &BotResult<AnswerOutcome>) -> Option<CreateEmbed> {
	match outcome {
		Ok(AnswerOutcome::NoResponse) | Ok(AnswerOutcome::Next(_)) | Ok(AnswerOutcome::Submitted(_)) => None,
		Ok(AnswerOutcome::Rejected(reason)) => Some(reply::error_embed(reason.clone())),
		Ok(AnswerOutcome::Orphaned) => Some(reply::info_embed(
			"Form removed",
			"The form you were answering was deleted, so your response was discarded.",
		)),
		Err(error) => Some(reply::error_embed(error.user_message())),
	}
}

/// Feeds DM messages into the response collecting answers in that channel.
pub async fn execute(ctx: Context, message: Message) {
	if message.author.bot || message.guild_id.is_some() {
		return;
	}

	let lifecycle = match client::lifecycle().await {
		Ok(lifecycle) => lifecycle,
		Err(error) => {
			warn!("{}", error);
			return;
		},
	};

	let outcome = lifecycle.answer(message.channel_id.get(), &answer_text(&message)).await;
	match &outcome {
		Ok(AnswerOutcome::Submitted(report)) => {
			if let Some(summary) = report.summary() {
				warn!("submit actions of user {} failed: {}", message.author.id, summary);
			}
		},
		Ok(AnswerOutcome::Next(index)) => debug!("user {} moved to question {}", message.author.id, index + 1),
		Err(error) => error!("answer from user {} failed: {}", message.author.id, error),
		_ => {},
	}

	if let Some(embed) = outcome_reply(&outcome) {
		if let Err(error) = message.channel_id.send_message(&ctx.http, CreateMessage::new().embed(embed)).await {
			error!("{}", error);
		}
	}
}
