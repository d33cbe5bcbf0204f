use serenity::all::{CreateEmbed, CreateEmbedFooter};
use serenity::async_trait;

use crate::actions::DisplayField;
use crate::command_define::{BaseCommand, CommonCommandType, SubCommand};
use crate::gateway::render;

mod action_add;
mod action_clear;
mod action_view;
mod create;
mod delete;
mod export;
mod import;
mod post;
mod roles_set;

pub struct FormCommands {
	sub_commands: Vec<CommonCommandType>,
}

impl BaseCommand for FormCommands {
	fn new() -> Self {
		FormCommands {
			sub_commands: vec![
				CommonCommandType::Command(Box::new(create::CreateCommand::new())),
				CommonCommandType::Command(Box::new(delete::DeleteCommand::new())),
				CommonCommandType::Command(Box::new(import::ImportCommand::new())),
				CommonCommandType::Command(Box::new(export::ExportCommand::new())),
				CommonCommandType::Command(Box::new(post::PostCommand::new())),
				CommonCommandType::Command(Box::new(roles_set::RolesSetCommand::new())),
				CommonCommandType::Command(Box::new(action_add::ActionAddCommand::new())),
				CommonCommandType::Command(Box::new(action_view::ActionViewCommand::new())),
				CommonCommandType::Command(Box::new(action_clear::ActionClearCommand::new())),
			],
		}
	}

	fn get_name(&self) -> String {
		"form".into()
	}

	fn get_description(&self) -> String {
		"Manage the server's forms".into()
	}
}

#[async_trait]
impl SubCommand for FormCommands {
	fn get_sub_commands(&self) -> &Vec<CommonCommandType> {
		&self.sub_commands
	}
}

const MAX_FIELDS: usize = 25;

/// Adds one embed field per action, each listing its display fields.
fn action_fields(mut embed: CreateEmbed, actions: Vec<(String, Vec<DisplayField>)>) -> CreateEmbed {
	let total = actions.len();
	for (title, fields) in actions.into_iter().take(MAX_FIELDS) {
		let lines: Vec<String> = fields.iter().map(|f| format!("**{}**: {}", f.label, f.value)).collect();
		embed = embed.field(render::truncate(&title, 256), render::truncate(&lines.join("\n"), 1024), false);
	}
	if total > MAX_FIELDS {
		embed = embed.footer(CreateEmbedFooter::new(format!("{} more not shown", total - MAX_FIELDS)));
	}
	embed
}
