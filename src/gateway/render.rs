//! Embeds and components shown for forms and responses.

use serenity::all::{
	ButtonStyle, CreateActionRow, CreateButton, CreateEmbed, CreateEmbedFooter, CreateSelectMenu,
	CreateSelectMenuKind, CreateSelectMenuOption, ReactionType,
};

use crate::forms::configuration::DropdownOption;
use crate::forms::{Form, Response};
use crate::gateway::Banner;
use crate::utils::color;

pub const APPLY_SUFFIX: &str = "-apply";
pub const MODERATION_PREFIX: &str = "resp-mod_";

const FIELD_LIMIT: usize = 1024;
const TITLE_LIMIT: usize = 256;

pub fn apply_id(hid: &str) -> String {
	format!("{}{}", hid, APPLY_SUFFIX)
}

pub fn parse_apply_id(custom_id: &str) -> Option<&str> {
	custom_id.strip_suffix(APPLY_SUFFIX).filter(|hid| !hid.is_empty())
}

pub fn moderation_id(response_id: u64) -> String {
	format!("{}{}", MODERATION_PREFIX, response_id)
}

pub fn parse_moderation_id(custom_id: &str) -> Option<u64> {
	custom_id.strip_prefix(MODERATION_PREFIX)?.parse().ok()
}

pub fn truncate(text: &str, limit: usize) -> String {
	if text.chars().count() <= limit {
		return text.to_string();
	}
	let mut cut: String = text.chars().take(limit.saturating_sub(3)).collect();
	cut.push_str("...");
	cut
}

fn button_style(style: Option<u8>) -> ButtonStyle {
	match style {
		Some(2) => ButtonStyle::Secondary,
		Some(3) => ButtonStyle::Success,
		Some(4) => ButtonStyle::Danger,
		_ => ButtonStyle::Primary,
	}
}

fn form_color(form: &Form) -> serenity::model::colour::Color {
	form.color
		.as_deref()
		.and_then(color::from_hex)
		.unwrap_or_else(color::normal_color)
}

/// The public card for a form with its apply button.
pub fn form_card(form: &Form) -> (CreateEmbed, CreateActionRow) {
	let mut embed = CreateEmbed::new()
		.title(truncate(&form.name, TITLE_LIMIT))
		.description(&form.description)
		.color(form_color(form))
		.footer(CreateEmbedFooter::new(format!("Form ID: {}", form.hid)));
	if let Some(icon) = &form.post_icon {
		embed = embed.thumbnail(icon);
	}
	if let Some(banner) = &form.post_banner {
		embed = embed.image(banner);
	}

	let mut button = CreateButton::new(apply_id(&form.hid))
		.label(form.button_text.clone().unwrap_or_else(|| "Apply".to_string()))
		.style(button_style(form.button_style))
		.disabled(!form.open);
	if let Some(emoji) = form.emoji.as_deref().and_then(|e| e.parse::<ReactionType>().ok()) {
		button = button.emoji(emoji);
	}

	(embed, CreateActionRow::Buttons(vec![button]))
}

/// Card of a deleted form, left on old posts.
pub fn detached_card(form: &Form) -> CreateEmbed {
	CreateEmbed::new()
		.title(truncate(&form.name, TITLE_LIMIT))
		.description("This form has been deleted.")
		.color(color::cancelled_color())
}

pub fn question_embed(form: &Form, index: usize) -> CreateEmbed {
	let Some(question) = form.questions.get(index) else {
		return CreateEmbed::new().title(&form.name).description("No more questions.");
	};

	let mut description = truncate(&question.value, FIELD_LIMIT);
	if !question.choices.is_empty() {
		let choices: Vec<String> =
			question.choices.iter().enumerate().map(|(i, c)| format!("{}. {}", i + 1, c)).collect();
		description = format!("{}\n\n{}", description, choices.join("\n"));
	}
	if let Some(domain) = &question.required_domain {
		description = format!("{}\n\nLinks must be from **{}**", description, domain);
	}

	CreateEmbed::new()
		.title(truncate(&form.name, TITLE_LIMIT))
		.description(description)
		.color(form_color(form))
		.footer(CreateEmbedFooter::new(format!(
			"Question {}/{} | {}{}",
			index + 1,
			form.questions.len(),
			question.kind.hint(),
			if question.required { "" } else { " | optional" }
		)))
}

pub fn response_embed(form: &Form, response: &Response) -> CreateEmbed {
	let mut embed = CreateEmbed::new()
		.title(truncate(&format!("Response: {}", form.name), TITLE_LIMIT))
		.description(format!("From <@{}> ({})", response.user_id, response.user_id))
		.color(color::pending_color())
		.footer(CreateEmbedFooter::new(format!("Form ID: {} | Response ID: {}", form.hid, response.id.unwrap_or_default())))
		.timestamp(serenity::model::Timestamp::from(response.updated_at));

	for (question, answer) in form.questions.iter().zip(&response.answers) {
		let answer = if answer.is_empty() { "*(skipped)*" } else { answer.as_str() };
		embed = embed.field(truncate(&question.value, TITLE_LIMIT), truncate(answer, FIELD_LIMIT), false);
	}

	embed
}

pub fn moderation_menu(response_id: u64, options: &[DropdownOption]) -> CreateActionRow {
	let options = options
		.iter()
		.map(|option| {
			let mut entry = CreateSelectMenuOption::new(&option.label, &option.value).description(&option.description);
			if let Some(emoji) = option.emoji.as_ref().and_then(|e| e.name.parse::<ReactionType>().ok()) {
				entry = entry.emoji(emoji);
			}
			entry
		})
		.collect();

	CreateActionRow::SelectMenu(
		CreateSelectMenu::new(moderation_id(response_id), CreateSelectMenuKind::String { options })
			.placeholder("Accept or deny this response..."),
	)
}

pub fn banner_embed(banner: &Banner) -> CreateEmbed {
	let now = serenity::model::Timestamp::now();
	match banner {
		Banner::Submitted => CreateEmbed::new()
			.title("Response submitted")
			.description("Your response has been submitted and is awaiting review.")
			.color(color::pending_color())
			.timestamp(now),
		Banner::Accepted { reason } => CreateEmbed::new()
			.title("Response accepted")
			.description(format!("Reason: {}", reason))
			.color(color::accepted_color())
			.timestamp(now),
		Banner::Denied { reason } => CreateEmbed::new()
			.title("Response denied")
			.description(format!("Reason: {}", reason))
			.color(color::denied_color())
			.timestamp(now),
		Banner::Cancelled => CreateEmbed::new()
			.title("Response cancelled")
			.description("This response has been cancelled!")
			.color(color::cancelled_color())
			.timestamp(now),
	}
}
