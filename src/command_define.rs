use log::error;
use serenity::{
	all::{
		CommandDataOption, CommandDataOptionValue, CommandInteraction, CommandOptionType, Context, CreateCommandOption,
	},
	async_trait,
};

use crate::utils::perms::Access;

pub trait BuildCommandOption {
	fn build_command_option(&self) -> CreateCommandOption;
}

impl BuildCommandOption for CommonCommandType {
	fn build_command_option(&self) -> CreateCommandOption {
		match self {
			CommonCommandType::Command(command) => command.command_build(),
			CommonCommandType::SubCommand(sub_command) => sub_command.command_build(),
		}
	}
}

pub trait BaseCommand {
	fn new() -> Self
	where
		Self: Sized;

	fn get_name(&self) -> String;
	fn get_description(&self) -> String;
}

/// Parameters are (name, description, type, required).
pub type Param = (&'static str, &'static str, CommandOptionType, bool);

const PARAMS: [Param; 0] = [];

#[async_trait]
pub trait Command: BaseCommand {
	fn args_param(&self) -> &'static [Param] {
		&PARAMS
	}

	fn build_args(&self, option: CreateCommandOption) -> CreateCommandOption {
		let mut option = option;

		for (name, desc, option_type, req) in self.args_param() {
			option = option.add_sub_option(CreateCommandOption::new(*option_type, *name, *desc).required(*req));
		}

		option
	}

	/// Who may run the command.
	fn access(&self) -> Access {
		Access::Everyone
	}

	/// Whether replies are hidden from the channel regardless of the guild setting.
	fn ephemeral(&self) -> bool {
		false
	}

	/// Runs after the interaction was acknowledged with a deferred reply.
	async fn execute(
		&self,
		ctx: Context,
		command: CommandInteraction,
		args: Vec<CommandDataOption>,
	) -> serenity::Result<()>;

	fn command_build(&self) -> CreateCommandOption {
		let res = CreateCommandOption::new(CommandOptionType::SubCommand, self.get_name(), self.get_description());

		self.build_args(res)
	}
}

#[async_trait]
pub trait SubCommand: BaseCommand {
	fn get_sub_commands(&self) -> &Vec<CommonCommandType>;
	fn make_sub_commands_option(&self) -> Vec<CreateCommandOption> {
		let mut res = vec![];

		for cmd in self.get_sub_commands() {
			res.push(cmd.build_command_option());
		}

		res
	}

	async fn commands_route(
		&self,
		ctx: Context,
		command: CommandInteraction,
		sub_command: CommandDataOption,
	) -> serenity::Result<()> {
		let CommandDataOptionValue::SubCommand(args) = sub_command.value else {
			error!("Unknown Sub command.");
			return Ok(());
		};
		let command_name = sub_command.name.to_string();

		for cmd in self.get_sub_commands() {
			if let CommonCommandType::Command(cmd) = cmd {
				if command_name == cmd.get_name() {
					return crate::commands::dispatch(cmd.as_ref(), ctx, command, args).await;
				}
			}
		}

		error!("No Exist Command! {} {}", self.get_name(), command_name);
		Ok(())
	}

	fn command_build(&self) -> CreateCommandOption {
		let mut co = CreateCommandOption::new(
			CommandOptionType::SubCommandGroup,
			self.get_name(),
			self.get_description(),
		);

		for sub_command in self.make_sub_commands_option() {
			co = co.add_sub_option(sub_command);
		}

		co
	}
}

pub enum CommonCommandType {
	Command(Box<dyn Command + Sync + Send>),
	SubCommand(Box<dyn SubCommand + Sync + Send>),
}
