use serenity::all::CreateEmbed;
use serenity::async_trait;

use crate::command_define::{BaseCommand, CommonCommandType, SubCommand};
use crate::forms::configuration::DropdownOption;

mod dropdown;
mod msg_ephemeral;
mod ticket_roles;
mod view;

pub struct ConfigCommands {
	sub_commands: Vec<CommonCommandType>,
}

impl BaseCommand for ConfigCommands {
	fn new() -> Self {
		ConfigCommands {
			sub_commands: vec![
				CommonCommandType::Command(Box::new(view::ViewCommand::new())),
				CommonCommandType::Command(Box::new(dropdown::DropdownCommand::new())),
				CommonCommandType::Command(Box::new(ticket_roles::TicketRolesCommand::new())),
				CommonCommandType::Command(Box::new(msg_ephemeral::MsgEphemeralCommand::new())),
			],
		}
	}

	fn get_name(&self) -> String {
		"config".into()
	}

	fn get_description(&self) -> String {
		"Server settings".into()
	}
}

#[async_trait]
impl SubCommand for ConfigCommands {
	fn get_sub_commands(&self) -> &Vec<CommonCommandType> {
		&self.sub_commands
	}
}

/// Numbered list of dropdown options as shown to moderators.
fn dropdown_lines(options: &[DropdownOption]) -> String {
	options
		.iter()
		.enumerate()
		.map(|(i, option)| {
			let emoji = option.emoji.as_ref().map(|e| format!("{} ", e.name)).unwrap_or_default();
			format!("{}. {}**{}** `{}`\n{}", i + 1, emoji, option.label, option.value, option.description)
		})
		.collect::<Vec<_>>()
		.join("\n")
}

fn with_dropdown(embed: CreateEmbed, options: &[DropdownOption], custom: bool) -> CreateEmbed {
	let title = if custom { "Dropdown options" } else { "Dropdown options (defaults)" };
	embed.field(title, crate::gateway::render::truncate(&dropdown_lines(options), 1024), false)
}
