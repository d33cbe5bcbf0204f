use std::time::Duration;

use async_trait::async_trait;
use log::error;
use serenity::all::{
	CommandInteraction, ComponentInteractionDataKind, CreateActionRow, CreateSelectMenu, CreateSelectMenuKind,
	CreateSelectMenuOption, EditInteractionResponse,
};
use serenity::client::Context;

use crate::gateway::{render, Choice, SetupPrompter};
use crate::utils::reply;

const SELECT_TIMEOUT: Duration = Duration::from_secs(120);
const MAX_MENU_OPTIONS: usize = 25;
const TIMED_OUT: &str = "Timed out waiting for a selection. Nothing was changed.";

/// Runs action setup selections on the invoking command's deferred reply.
pub struct InteractionPrompter {
	ctx: Context,
	command: CommandInteraction,
}

impl InteractionPrompter {
	pub fn new(ctx: &Context, command: &CommandInteraction) -> Self {
		InteractionPrompter {
			ctx: ctx.clone(),
			command: command.clone(),
		}
	}

	async fn ask(&self, prompt: &str, kind: CreateSelectMenuKind, min: usize, max: usize) -> Result<ComponentInteractionDataKind, String> {
		let custom_id = format!("setup_{}", self.command.id);
		let menu = CreateSelectMenu::new(&custom_id, kind)
			.min_values(min.min(MAX_MENU_OPTIONS) as u8)
			.max_values(max.clamp(1, MAX_MENU_OPTIONS) as u8);

		let message = self
			.command
			.edit_response(
				&self.ctx.http,
				EditInteractionResponse::new()
					.embeds(vec![reply::info_embed("Action setup", prompt)])
					.components(vec![CreateActionRow::SelectMenu(menu)]),
			)
			.await
			.map_err(|e| {
				error!("{}", e);
				"Could not show the selection menu.".to_string()
			})?;

		let Some(interaction) = message
			.await_component_interaction(&self.ctx.shard)
			.author_id(self.command.user.id)
			.custom_ids(vec![custom_id])
			.timeout(SELECT_TIMEOUT)
			.await
		else {
			return Err(TIMED_OUT.to_string());
		};

		if let Err(e) = interaction.defer(&self.ctx.http).await {
			error!("{}", e);
		}
		Ok(interaction.data.kind)
	}
}

#[async_trait]
impl SetupPrompter for InteractionPrompter {
	async fn select(&self, prompt: &str, choices: Vec<Choice>, min: usize, max: usize) -> Result<Vec<String>, String> {
		let options = choices
			.into_iter()
			.take(MAX_MENU_OPTIONS)
			.map(|choice| {
				let option = CreateSelectMenuOption::new(render::truncate(&choice.label, 100), choice.value);
				match choice.description {
					Some(description) => option.description(render::truncate(&description, 100)),
					None => option,
				}
			})
			.collect();

		match self.ask(prompt, CreateSelectMenuKind::String { options }, min, max).await? {
			ComponentInteractionDataKind::StringSelect { values } => Ok(values),
			_ => Err(TIMED_OUT.to_string()),
		}
	}

	async fn select_roles(&self, prompt: &str, min: usize, max: usize) -> Result<Vec<u64>, String> {
		match self.ask(prompt, CreateSelectMenuKind::Role { default_roles: None }, min, max).await? {
			ComponentInteractionDataKind::RoleSelect { values } => Ok(values.iter().map(|id| id.get()).collect()),
			_ => Err(TIMED_OUT.to_string()),
		}
	}
}
