use log::{debug, error, warn};
use once_cell::sync::Lazy;
use serenity::all::{
	CommandDataOption, CommandDataOptionValue, CommandInteraction, CommandOptionType, CreateAutocompleteResponse,
	CreateCommandOption, CreateInteractionResponse,
};
use serenity::builder::CreateCommand;
use serenity::client::Context;

use crate::command_define::{BaseCommand, BuildCommandOption, Command, CommonCommandType, SubCommand};
use crate::error::{BotError, BotResult};
use crate::forms::{ActionEvent, Configuration, Form};
use crate::lifecycle::Lifecycle;
use crate::utils::{client, perms, reply};

pub mod apply;
mod cancel;
mod config;
mod form;
mod ping;
mod response;
mod version;

pub const ROOT_NAME: &str = "formbot";
pub const PARAM_FORM_ID: &str = "form_id";
pub const PARAM_EVENT: &str = "event";

const MAX_AUTOCOMPLETE: usize = 25;

static COMMANDS: Lazy<Vec<CommonCommandType>> = Lazy::new(|| {
	vec![
		CommonCommandType::Command(Box::new(ping::PingCommand::new())),
		CommonCommandType::Command(Box::new(version::VersionCommand::new())),
		CommonCommandType::Command(Box::new(apply::ApplyCommand::new())),
		CommonCommandType::Command(Box::new(cancel::CancelCommand::new())),
		CommonCommandType::SubCommand(Box::new(form::FormCommands::new())),
		CommonCommandType::SubCommand(Box::new(config::ConfigCommands::new())),
		CommonCommandType::SubCommand(Box::new(response::ResponseCommands::new())),
	]
});

/// Form id option with autocomplete over the guild's forms.
pub fn form_id_option(required: bool) -> CreateCommandOption {
	CreateCommandOption::new(CommandOptionType::String, PARAM_FORM_ID, "Form ID")
		.required(required)
		.set_autocomplete(true)
}

pub fn event_option(required: bool) -> CreateCommandOption {
	let mut option = CreateCommandOption::new(CommandOptionType::String, PARAM_EVENT, "Response event").required(required);
	for event in ActionEvent::ALL {
		option = option.add_string_choice(event.as_str(), event.as_str());
	}
	option
}

pub fn guild_of(command: &CommandInteraction) -> BotResult<u64> {
	command
		.guild_id
		.map(|id| id.get())
		.ok_or_else(|| BotError::validation("This command can only be used in a server."))
}

pub async fn require_form(lifecycle: &Lifecycle, server_id: u64, hid: Option<String>) -> BotResult<Form> {
	let hid = hid.ok_or_else(|| BotError::validation("A form ID is required."))?;
	lifecycle
		.stores
		.forms
		.get(server_id, &hid)
		.await?
		.ok_or_else(|| BotError::not_found("Form"))
}

pub fn event_arg(args: &[CommandDataOption]) -> BotResult<Option<ActionEvent>> {
	match crate::utils::convert::string_arg(args, PARAM_EVENT) {
		Some(raw) => ActionEvent::parse(&raw)
			.map(Some)
			.ok_or_else(|| BotError::validation(format!("`{}` is not a valid event.", raw))),
		None => Ok(None),
	}
}

async fn guild_config(command: &CommandInteraction) -> Configuration {
	let Some(guild_id) = command.guild_id.map(|id| id.get()) else {
		return Configuration::defaults(0);
	};

	let loaded = match client::lifecycle().await {
		Ok(lifecycle) => lifecycle.stores.configs.get(guild_id).await,
		Err(e) => Err(e),
	};
	loaded.unwrap_or_else(|e| {
		warn!("guild {}: config unavailable, using defaults: {}", guild_id, e);
		Configuration::defaults(guild_id)
	})
}

/// Checks access, acknowledges the interaction and runs the command.
pub async fn dispatch(
	cmd: &(dyn Command + Sync + Send),
	ctx: Context,
	command: CommandInteraction,
	args: Vec<CommandDataOption>,
) -> serenity::Result<()> {
	let config = guild_config(&command).await;
	if !perms::command_allowed(&command, cmd.access(), &config) {
		return reply::send(
			&ctx,
			&command,
			reply::error_embed("You do not have permission to use this command."),
			true,
		)
		.await;
	}

	reply::defer(&ctx, &command, cmd.ephemeral() || config.msg_ephemeral).await?;
	cmd.execute(ctx, command, args).await
}

async fn root_commands_route(ctx: Context, command: CommandInteraction) -> serenity::Result<()> {
	let Some(sub_command) = command.data.options.first().cloned() else {
		error!("Command option length is 0.");
		return Ok(());
	};

	for entry in COMMANDS.iter() {
		match (entry, &sub_command.value) {
			(CommonCommandType::Command(cmd), CommandDataOptionValue::SubCommand(args))
				if cmd.get_name() == sub_command.name =>
			{
				let args = args.clone();
				return dispatch(cmd.as_ref(), ctx, command, args).await;
			},
			(CommonCommandType::SubCommand(cmd), CommandDataOptionValue::SubCommandGroup(options))
				if cmd.get_name() == sub_command.name =>
			{
				let Some(leaf) = options.first().cloned() else {
					error!("Empty sub command group {}", sub_command.name);
					return Ok(());
				};
				return cmd.commands_route(ctx, command, leaf).await;
			},
			_ => {},
		}
	}

	error!("No Exist Command! {}", sub_command.name);
	Ok(())
}

pub async fn interaction_route(ctx: Context, command: CommandInteraction) {
	debug!("\ncommandID: {}\nname: {}", command.id, command.data.name);
	for option in &command.data.options {
		debug!("option name: {}", option.name);
	}

	if command.user.bot {
		return;
	}

	let res = match command.data.name.as_str() {
		ROOT_NAME => root_commands_route(ctx, command).await,
		_ => {
			error!("No Exist Command!");
			Ok(())
		},
	};
	if let Err(error) = res {
		error!("{}", error);
	}
}

/// Suggests forms of the guild for any focused `form_id` option.
pub async fn autocomplete_route(ctx: Context, interaction: CommandInteraction) {
	let Some(focused) = interaction.data.autocomplete() else {
		return;
	};
	if focused.name != PARAM_FORM_ID {
		return;
	}
	let Some(guild_id) = interaction.guild_id.map(|id| id.get()) else {
		return;
	};

	let forms = match client::lifecycle().await {
		Ok(lifecycle) => lifecycle.stores.forms.get_all(guild_id).await,
		Err(e) => Err(e),
	};
	let forms = match forms {
		Ok(forms) => forms,
		Err(e) => {
			warn!("guild {}: autocomplete failed: {}", guild_id, e);
			vec![]
		},
	};

	let mut choices = CreateAutocompleteResponse::new();
	for form in forms.iter().filter(|form| form.matches_query(focused.value)).take(MAX_AUTOCOMPLETE) {
		choices = choices.add_string_choice(reply_label(form), form.hid.clone());
	}

	if let Err(error) = interaction
		.create_response(&ctx.http, CreateInteractionResponse::Autocomplete(choices))
		.await
	{
		error!("{}", error);
	}
}

fn reply_label(form: &Form) -> String {
	crate::gateway::render::truncate(&form.label(), 100)
}

fn root_command_build(command: CreateCommand) -> CreateCommand {
	let mut command = command.description("Form applications").dm_permission(false);
	for entry in COMMANDS.iter() {
		command = command.add_option(entry.build_command_option());
	}
	command
}

pub fn app_commands_build() -> CreateCommand {
	root_command_build(CreateCommand::new(ROOT_NAME))
}
