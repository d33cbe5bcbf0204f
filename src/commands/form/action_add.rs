use log::info;
use once_cell::sync::Lazy;
use serenity::all::{CommandDataOption, CommandInteraction, CommandOptionType, CreateCommandOption, CreateEmbed};
use serenity::async_trait;
use serenity::client::Context;

use crate::actions::{ActionRegistry, SetupContext, SetupOutcome, TransformContext};
use crate::command_define::{BaseCommand, Command};
use crate::commands::{event_arg, event_option, form_id_option, guild_of, require_form, PARAM_FORM_ID};
use crate::error::{BotError, BotResult};
use crate::forms::form::StoredAction;
use crate::utils::perms::Access;
use crate::utils::prompt::InteractionPrompter;
use crate::utils::{client, convert, reply};

const PARAM_ACTION: &str = "action";

static ACTION_CHOICES: Lazy<Vec<(&'static str, &'static str)>> = Lazy::new(|| {
	ActionRegistry::with_defaults()
		.all()
		.map(|action| (action.id(), action.description()))
		.collect()
});

pub struct ActionAddCommand;

impl BaseCommand for ActionAddCommand {
	fn new() -> Self {
		Self {}
	}

	fn get_name(&self) -> String {
		"action-add".into()
	}

	fn get_description(&self) -> String {
		"Attaches an action to a form event".into()
	}
}

impl ActionAddCommand {
	async fn run(&self, ctx: &Context, command: &CommandInteraction, args: &[CommandDataOption]) -> BotResult<CreateEmbed> {
		let server_id = guild_of(command)?;
		let event = event_arg(args)?.ok_or_else(|| BotError::validation("An event is required."))?;
		let kind = convert::string_arg(args, PARAM_ACTION).ok_or_else(|| BotError::validation("An action is required."))?;

		let lifecycle = client::lifecycle().await?;
		let mut form = require_form(&lifecycle, server_id, convert::string_arg(args, PARAM_FORM_ID)).await?;
		let config = lifecycle.stores.configs.get(server_id).await?;

		let action = lifecycle
			.registry
			.get(&kind)
			.ok_or_else(|| BotError::validation(format!("`{}` is not a known action.", kind)))?;
		if !action.supports(event) {
			return Err(BotError::validation(format!("`{}` cannot run on {}.", action.id(), event)));
		}

		let channel = match form.channel_id.or(config.response_channel) {
			Some(id) => lifecycle.gateway.channel_info(id).await,
			None => None,
		};
		let prompter = InteractionPrompter::new(ctx, command);
		let setup = SetupContext {
			guild: server_id,
			form: &form,
			event,
			channel: channel.as_ref(),
			config: &config,
			prompter: &prompter,
		};

		let data = match action.setup(&setup).await {
			SetupOutcome::Success(data) => data,
			SetupOutcome::Failure(reason) => return Err(BotError::Cancelled(reason)),
		};
		let stored = StoredAction::new(action.id(), data);
		let fields = lifecycle.registry.describe(
			&stored,
			&TransformContext {
				event,
				channel: channel.as_ref(),
				form: Some(&form),
				config: Some(&config),
			},
		);

		form.add_action(event, stored);
		lifecycle.stores.forms.save(&mut form).await?;
		info!("guild {}: {} added to form {} on {}", server_id, action.id(), form.hid, event);

		Ok(super::action_fields(
			reply::success_embed("Action added", format!("Added to **{}**.", form.label())),
			vec![(action.description().to_string(), fields)],
		))
	}
}

#[async_trait]
impl Command for ActionAddCommand {
	fn build_args(&self, option: CreateCommandOption) -> CreateCommandOption {
		let mut action = CreateCommandOption::new(CommandOptionType::String, PARAM_ACTION, "Action to attach").required(true);
		for (id, description) in ACTION_CHOICES.iter() {
			action = action.add_string_choice(*description, *id);
		}

		option
			.add_sub_option(form_id_option(true))
			.add_sub_option(event_option(true))
			.add_sub_option(action)
	}

	fn access(&self) -> Access {
		Access::Moderator
	}

	fn ephemeral(&self) -> bool {
		true
	}

	async fn execute(&self, ctx: Context, command: CommandInteraction, args: Vec<CommandDataOption>) -> serenity::Result<()> {
		match self.run(&ctx, &command, &args).await {
			Ok(embed) => reply::edit(&ctx, &command, embed).await,
			Err(error) => reply::edit_error(&ctx, &command, &error).await,
		}
	}
}
