use std::time::Instant;

use log::error;
use sea_orm::{ConnectionTrait, Statement};
use serenity::all::{CommandDataOption, CommandInteraction};
use serenity::async_trait;
use serenity::client::Context;

use crate::command_define::{BaseCommand, Command};
use crate::utils::{client, reply};

pub struct PingCommand;

impl BaseCommand for PingCommand {
	fn new() -> Self {
		Self {}
	}

	fn get_name(&self) -> String {
		"ping".into()
	}

	fn get_description(&self) -> String {
		"Measures the bot's latency".into()
	}
}

impl PingCommand {
	async fn get_ping(&self, ctx: &Context, command: &CommandInteraction) -> i64 {
		match command.get_response(&ctx.http).await {
			Ok(command_res) => {
				let ping_duration = *command_res.timestamp - *command.id.created_at();
				ping_duration.num_milliseconds()
			},
			Err(error) => {
				error!("{}", error);
				-1
			},
		}
	}

	async fn get_db_ping(&self) -> Option<u128> {
		let db = client::db().await.ok()?;
		let started = Instant::now();
		match db.execute(Statement::from_string(db.get_database_backend(), "SELECT 1")).await {
			Ok(_) => Some(started.elapsed().as_millis()),
			Err(error) => {
				error!("{}", error);
				None
			},
		}
	}
}

#[async_trait]
impl Command for PingCommand {
	async fn execute(&self, ctx: Context, command: CommandInteraction, _: Vec<CommandDataOption>) -> serenity::Result<()> {
		let ping = self.get_ping(&ctx, &command).await;
		let db_ping = match self.get_db_ping().await {
			Some(ms) => format!("{}ms", ms),
			None => "unreachable".to_string(),
		};

		reply::edit(
			&ctx,
			&command,
			reply::info_embed("Pong", format!("Gateway: {}ms\nDatabase: {}", ping, db_ping)),
		)
		.await
	}
}
