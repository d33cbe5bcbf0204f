use log::info;
use serenity::all::{CommandDataOption, CommandInteraction, CommandOptionType, CreateCommandOption, CreateEmbed};
use serenity::async_trait;
use serenity::client::Context;

use crate::command_define::{BaseCommand, Command};
use crate::commands::guild_of;
use crate::error::{BotError, BotResult};
use crate::forms::configuration::{DropdownKind, OptionInput};
use crate::forms::Configuration;
use crate::utils::confirm::confirm;
use crate::utils::perms::Access;
use crate::utils::{client, convert, reply};

const PARAM_OPERATION: &str = "operation";
const PARAM_LABEL: &str = "label";
const PARAM_DESCRIPTION: &str = "description";
const PARAM_SUFFIX: &str = "suffix";
const PARAM_EMOJI: &str = "emoji";
const PARAM_INDEX: &str = "index";
const PARAM_POSITIONS: &str = "positions";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
	View,
	Add(DropdownKind),
	Edit,
	Reorder,
	Remove,
	Reset,
}

impl Operation {
	const CHOICES: [(&'static str, Operation); 7] = [
		("view", Operation::View),
		("add-accept", Operation::Add(DropdownKind::Accept)),
		("add-deny", Operation::Add(DropdownKind::Deny)),
		("edit", Operation::Edit),
		("reorder", Operation::Reorder),
		("remove", Operation::Remove),
		("reset", Operation::Reset),
	];

	fn parse(value: &str) -> Option<Operation> {
		Operation::CHOICES.iter().find(|(name, _)| *name == value).map(|(_, op)| *op)
	}
}

pub struct DropdownCommand;

impl BaseCommand for DropdownCommand {
	fn new() -> Self {
		Self {}
	}

	fn get_name(&self) -> String {
		"dropdown".into()
	}

	fn get_description(&self) -> String {
		"Manages the accept and deny options moderators pick from".into()
	}
}

fn option_input(args: &[CommandDataOption]) -> OptionInput {
	OptionInput {
		label: convert::string_arg(args, PARAM_LABEL).unwrap_or_default(),
		description: convert::string_arg(args, PARAM_DESCRIPTION).unwrap_or_default(),
		suffix: convert::string_arg(args, PARAM_SUFFIX).unwrap_or_default(),
		emoji: convert::string_arg(args, PARAM_EMOJI),
	}
}

fn positions(args: &[CommandDataOption]) -> BotResult<Vec<usize>> {
	let text = convert::string_arg(args, PARAM_POSITIONS)
		.ok_or_else(|| BotError::validation("List the option numbers, for example `2, 1, 3`."))?;
	convert::parse_positions(&text).map_err(BotError::Validation)
}

/// Applies a non-destructive change to `config`. Returns the message to show.
fn apply_change(config: &mut Configuration, operation: Operation, args: &[CommandDataOption]) -> BotResult<String> {
	match operation {
		Operation::Add(kind) => {
			let option = config.add_option(kind, &option_input(args)).map_err(BotError::Validation)?;
			Ok(format!("Added **{}** (`{}`).", option.label, option.value))
		},
		Operation::Edit => {
			let index = convert::integer_arg(args, PARAM_INDEX)
				.filter(|i| *i > 0)
				.ok_or_else(|| BotError::validation("Choose the option number to edit."))?;
			let option = config
				.edit_option(index as usize - 1, &option_input(args))
				.map_err(BotError::Validation)?;
			Ok(format!("Option {} is now **{}** (`{}`).", index, option.label, option.value))
		},
		Operation::Reorder => {
			config.reorder_options(&positions(args)?).map_err(BotError::Validation)?;
			Ok("Options reordered.".to_string())
		},
		Operation::View | Operation::Remove | Operation::Reset => Ok(String::new()),
	}
}

impl DropdownCommand {
	async fn run(&self, ctx: &Context, command: &CommandInteraction, args: &[CommandDataOption]) -> BotResult<Option<CreateEmbed>> {
		let server_id = guild_of(command)?;
		let operation = convert::string_arg(args, PARAM_OPERATION)
			.and_then(|raw| Operation::parse(&raw))
			.ok_or_else(|| BotError::validation("Choose an operation."))?;

		let lifecycle = client::lifecycle().await?;
		let mut config = lifecycle.stores.configs.get(server_id).await?;

		let text = match operation {
			Operation::View => {
				let embed = reply::info_embed("Dropdown", "Options offered when reviewing a response.");
				return Ok(Some(super::with_dropdown(embed, &config.dropdown(), config.has_custom_dropdown())));
			},
			Operation::Remove => {
				let indices = positions(args)?;
				let mut preview = config.clone();
				let labels = preview.remove_options(&indices).map_err(BotError::Validation)?;
				if labels.is_empty() {
					return Err(BotError::validation("None of those numbers match an option."));
				}

				let question = reply::info_embed("Remove options?", format!("Remove {}?", labels.join(", ")));
				if !confirm(ctx, command, question).await? {
					return Ok(None);
				}
				config = preview;
				format!("Removed {}.", labels.join(", "))
			},
			Operation::Reset => {
				if !config.has_custom_dropdown() {
					return Err(BotError::validation("The dropdown already uses the default options."));
				}
				let question = reply::info_embed("Reset options?", "Every custom option will be replaced by the defaults.");
				if !confirm(ctx, command, question).await? {
					return Ok(None);
				}
				config.reset_dropdown();
				"Options reset to the defaults.".to_string()
			},
			_ => apply_change(&mut config, operation, args)?,
		};

		lifecycle.stores.configs.save(&mut config).await?;
		info!("guild {}: dropdown {:?} by {}", server_id, operation, command.user.id);

		Ok(Some(super::with_dropdown(
			reply::success_embed("Dropdown updated", text),
			&config.dropdown(),
			config.has_custom_dropdown(),
		)))
	}
}

#[async_trait]
impl Command for DropdownCommand {
	fn build_args(&self, option: CreateCommandOption) -> CreateCommandOption {
		let mut operation =
			CreateCommandOption::new(CommandOptionType::String, PARAM_OPERATION, "What to do").required(true);
		for (name, _) in Operation::CHOICES {
			operation = operation.add_string_choice(name, name);
		}

		option
			.add_sub_option(operation)
			.add_sub_option(CreateCommandOption::new(CommandOptionType::String, PARAM_LABEL, "Option label"))
			.add_sub_option(CreateCommandOption::new(
				CommandOptionType::String,
				PARAM_DESCRIPTION,
				"Option description",
			))
			.add_sub_option(CreateCommandOption::new(
				CommandOptionType::String,
				PARAM_SUFFIX,
				"Value suffix after accept_ or deny_",
			))
			.add_sub_option(CreateCommandOption::new(CommandOptionType::String, PARAM_EMOJI, "Option emoji"))
			.add_sub_option(
				CreateCommandOption::new(CommandOptionType::Integer, PARAM_INDEX, "Option number to edit").min_int_value(1),
			)
			.add_sub_option(CreateCommandOption::new(
				CommandOptionType::String,
				PARAM_POSITIONS,
				"Option numbers for reorder or remove, like `2, 1, 3`",
			))
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

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn every_choice_parses() {
		for (name, op) in Operation::CHOICES {
			assert_eq!(Operation::parse(name), Some(op));
		}
		assert_eq!(Operation::parse("delete"), None);
	}

	#[test]
	fn missing_positions_are_reported() {
		let mut config = Configuration::defaults(1);
		let error = apply_change(&mut config, Operation::Reorder, &[]).unwrap_err();
		assert!(matches!(error, BotError::Validation(_)));
		assert!(!config.has_custom_dropdown());
	}

	#[test]
	fn edit_needs_an_index() {
		let mut config = Configuration::defaults(1);
		assert!(apply_change(&mut config, Operation::Edit, &[]).is_err());
	}
}
