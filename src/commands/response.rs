use serenity::async_trait;

use crate::command_define::{BaseCommand, CommonCommandType, SubCommand};

mod cancel_pending;

pub struct ResponseCommands {
	sub_commands: Vec<CommonCommandType>,
}

impl BaseCommand for ResponseCommands {
	fn new() -> Self {
		ResponseCommands {
			sub_commands: vec![CommonCommandType::Command(Box::new(cancel_pending::CancelPendingCommand::new()))],
		}
	}

	fn get_name(&self) -> String {
		"response".into()
	}

	fn get_description(&self) -> String {
		"Manage members' responses".into()
	}
}

#[async_trait]
impl SubCommand for ResponseCommands {
	fn get_sub_commands(&self) -> &Vec<CommonCommandType> {
		&self.sub_commands
	}
}
