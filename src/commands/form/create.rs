use serenity::all::{CommandDataOption, CommandInteraction, CommandOptionType, CreateCommandOption, CreateEmbed};
use serenity::async_trait;
use serenity::client::Context;

use crate::command_define::{BaseCommand, Command};
use crate::commands::guild_of;
use crate::error::{BotError, BotResult};
use crate::forms::form::{verify, FormDraft, RawQuestion};
use crate::forms::question::QuestionKind;
use crate::forms::Form;
use crate::stores::forms::FREE_FORM_LIMIT;
use crate::utils::perms::Access;
use crate::utils::{client, convert, reply};

const PARAM_NAME: &str = "name";
const PARAM_QUESTIONS: &str = "questions";
const PARAM_DESCRIPTION: &str = "description";
const PARAM_CHANNEL: &str = "channel";

pub struct CreateCommand;

impl BaseCommand for CreateCommand {
	fn new() -> Self {
		Self {}
	}

	fn get_name(&self) -> String {
		"create".into()
	}

	fn get_description(&self) -> String {
		"Creates a form".into()
	}
}

/// Reads `type: question [choice, choice] | type: question`. A part without a known type is a text question.
fn parse_questions(text: &str) -> Vec<RawQuestion> {
	text.split('|')
		.map(str::trim)
		.filter(|part| !part.is_empty())
		.map(|part| {
			let (kind, rest) = match part.split_once(':') {
				Some((kind, rest)) if QuestionKind::from_code(kind.trim()).is_some() => {
					(kind.trim().to_string(), rest.trim())
				},
				_ => ("text".to_string(), part),
			};

			let (value, choices) = match (rest.rfind('['), rest.ends_with(']')) {
				(Some(start), true) => (
					rest[..start].trim(),
					rest[start + 1..rest.len() - 1]
						.split(',')
						.map(str::trim)
						.filter(|c| !c.is_empty())
						.map(str::to_string)
						.collect(),
				),
				_ => (rest, vec![]),
			};

			RawQuestion {
				value: Some(value.to_string()),
				kind: Some(kind),
				required: None,
				choices,
				required_domain: None,
			}
		})
		.collect()
}

impl CreateCommand {
	async fn run(&self, command: &CommandInteraction, args: &[CommandDataOption]) -> BotResult<CreateEmbed> {
		let server_id = guild_of(command)?;
		let draft = FormDraft {
			name: convert::string_arg(args, PARAM_NAME),
			description: convert::string_arg(args, PARAM_DESCRIPTION),
			questions: parse_questions(&convert::string_arg(args, PARAM_QUESTIONS).unwrap_or_default()),
			..FormDraft::default()
		};
		let questions = verify(&draft).map_err(BotError::Validation)?;

		let lifecycle = client::lifecycle().await?;
		if lifecycle.stores.forms.get_all(server_id).await?.len() >= FREE_FORM_LIMIT {
			return Err(BotError::validation(format!("Servers can have at most {} forms.", FREE_FORM_LIMIT)));
		}

		let mut form = Form::from_draft(server_id, "", &draft, questions);
		form.channel_id = convert::channel_arg(args, PARAM_CHANNEL);
		let form = lifecycle.stores.forms.create(form).await?;

		Ok(reply::success_embed(
			"Form created",
			format!(
				"**{}** was created with ID `{}` and {} questions.\nUse `/formbot form post` to publish it.",
				form.name,
				form.hid,
				form.questions.len()
			),
		))
	}
}

#[async_trait]
impl Command for CreateCommand {
	fn build_args(&self, option: CreateCommandOption) -> CreateCommandOption {
		option
			.add_sub_option(CreateCommandOption::new(CommandOptionType::String, PARAM_NAME, "Form name").required(true))
			.add_sub_option(
				CreateCommandOption::new(
					CommandOptionType::String,
					PARAM_QUESTIONS,
					"Questions as `type: question | type: question`, choices as `[a, b]`",
				)
				.required(true),
			)
			.add_sub_option(CreateCommandOption::new(CommandOptionType::String, PARAM_DESCRIPTION, "Form description"))
			.add_sub_option(CreateCommandOption::new(
				CommandOptionType::Channel,
				PARAM_CHANNEL,
				"Channel submitted responses are posted to",
			))
	}

	fn access(&self) -> Access {
		Access::Moderator
	}

	async fn execute(&self, ctx: Context, command: CommandInteraction, args: Vec<CommandDataOption>) -> serenity::Result<()> {
		match self.run(&command, &args).await {
			Ok(embed) => reply::edit(&ctx, &command, embed).await,
			Err(error) => reply::edit_error(&ctx, &command, &error).await,
		}
	}
}
