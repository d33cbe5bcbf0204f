use serenity::all::{CommandDataOption, CommandInteraction};
use serenity::async_trait;
use serenity::client::Context;

use crate::command_define::{BaseCommand, Command};
use crate::utils::reply;

const PROJECT_NAME: &str = env!("CARGO_PKG_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct VersionCommand;

impl BaseCommand for VersionCommand {
	fn new() -> Self {
		Self {}
	}

	fn get_name(&self) -> String {
		"version".into()
	}

	fn get_description(&self) -> String {
		"Shows the bot version".into()
	}
}

fn project_name() -> String {
	let mut chars = PROJECT_NAME.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

#[async_trait]
impl Command for VersionCommand {
	async fn execute(&self, ctx: Context, command: CommandInteraction, _: Vec<CommandDataOption>) -> serenity::Result<()> {
		reply::edit(
			&ctx,
			&command,
			reply::info_embed("Version", format!("{} {}", project_name(), VERSION)),
		)
		.await
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn project_name_is_capitalised() {
		assert_eq!(project_name(), "Formbot");
	}
}
