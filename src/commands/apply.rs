use log::error;
use serenity::all::{CommandDataOption, CommandInteraction, CreateCommandOption, CreateEmbed};
use serenity::async_trait;
use serenity::client::Context;

use crate::command_define::{BaseCommand, Command};
use crate::commands::{form_id_option, guild_of, PARAM_FORM_ID};
use crate::error::{BotError, BotResult};
use crate::lifecycle::ApplyOutcome;
use crate::utils::{client, convert, reply};

pub struct ApplyCommand;

impl BaseCommand for ApplyCommand {
	fn new() -> Self {
		Self {}
	}

	fn get_name(&self) -> String {
		"apply".into()
	}

	fn get_description(&self) -> String {
		"Starts an application in your DMs".into()
	}
}

/// Reply shown for an apply attempt, from a command or a form card button.
pub fn outcome_embed(outcome: &BotResult<ApplyOutcome>) -> CreateEmbed {
	match outcome {
		Ok(ApplyOutcome::Started(_, report)) => {
			let mut text = "Check your DMs! The first question is waiting for you.".to_string();
			if let Some(summary) = report.summary() {
				text = format!("{}\n\n{}", text, summary);
			}
			reply::success_embed("Application started", text)
		},
		Ok(ApplyOutcome::Existing(_)) => reply::info_embed(
			"Already applying",
			"You already have a response in progress for this form. Finish or cancel it first.",
		),
		Ok(ApplyOutcome::Busy(other)) => reply::info_embed(
			"Already applying",
			format!(
				"You are still answering form `{}` in your DMs. Finish or cancel it before starting another.",
				other.form_hid
			),
		),
		Ok(ApplyOutcome::Closed) => reply::error_embed("This form is not accepting responses right now."),
		Err(BotError::NotFound(what)) if what == "Channel" => {
			reply::error_embed("I couldn't message you. Please enable DMs from server members and try again.")
		},
		Err(error) => {
			if matches!(error, BotError::Persistence(_) | BotError::Discord(_)) {
				error!("apply failed: {}", error);
			}
			reply::error_embed(error.user_message())
		},
	}
}

#[async_trait]
impl Command for ApplyCommand {
	fn build_args(&self, option: CreateCommandOption) -> CreateCommandOption {
		option.add_sub_option(form_id_option(true))
	}

	fn ephemeral(&self) -> bool {
		true
	}

	async fn execute(&self, ctx: Context, command: CommandInteraction, args: Vec<CommandDataOption>) -> serenity::Result<()> {
		let outcome = async {
			let server_id = guild_of(&command)?;
			let hid = convert::string_arg(&args, PARAM_FORM_ID)
				.ok_or_else(|| BotError::validation("A form ID is required."))?;
			client::lifecycle().await?.apply(server_id, command.user.id.get(), &hid.to_lowercase()).await
		}
		.await;

		reply::edit(&ctx, &command, outcome_embed(&outcome)).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::actions::{ActionFailure, PipelineReport};
	use crate::forms::Response;

	#[test]
	fn closed_dms_get_a_hint() {
		let embed = serde_json::to_value(outcome_embed(&Err(BotError::not_found("Channel")))).unwrap();
		assert!(embed["description"].as_str().unwrap().contains("enable DMs"));
	}

	#[test]
	fn busy_dm_names_the_other_form() {
		let outcome = Ok(ApplyOutcome::Busy(Response::new(1, 2, 3, "numfm")));
		let embed = serde_json::to_value(outcome_embed(&outcome)).unwrap();
		assert!(embed["description"].as_str().unwrap().contains("`numfm`"));
	}

	#[test]
	fn failed_apply_actions_are_listed() {
		let report = PipelineReport {
			succeeded: vec![],
			failures: vec![ActionFailure {
				action: "role.add".into(),
				message: "Missing Manage Roles".into(),
			}],
		};
		let outcome = Ok(ApplyOutcome::Started(Response::new(1, 2, 3, "abcde"), report));
		let embed = serde_json::to_value(outcome_embed(&outcome)).unwrap();
		assert!(embed["description"].as_str().unwrap().contains("Missing Manage Roles"));
	}
}
