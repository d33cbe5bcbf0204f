mod actions;
mod command_define;
mod commands;
mod configs;
mod error;
mod events;
mod forms;
mod gateway;
mod lifecycle;
mod stores;
#[cfg(test)]
pub mod testing;
mod utils;

use std::error::Error;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use log::{error, info};
use migration::{Migrator, MigratorTrait};
use once_cell::sync::Lazy;
use sea_orm::Database;
use serenity::all::GatewayIntents;
use serenity::Client;
use tokio::sync::Mutex;

use crate::actions::ActionRegistry;
use crate::configs::ConfigData;
use crate::events::route::Router;
use crate::gateway::DiscordGateway;
use crate::lifecycle::Lifecycle;
use crate::stores::Stores;
use crate::utils::client::Components;
use crate::utils::logger;

pub static STATIC_COMPONENTS: Lazy<Mutex<Components>> = Lazy::new(|| Mutex::new(Components::new()));

fn load_config(path: &str) -> Result<ConfigData, Box<dyn Error>> {
	let config_string = fs::read_to_string(Path::new(path))?;
	Ok(serde_yaml::from_str::<ConfigData>(&config_string)?)
}

#[tokio::main]
async fn main() {
	let is_debug = std::env::args().any(|arg| arg == "--debug");
	let config_path = if is_debug { "../../configs/config.yaml" } else { "./config.yaml" };

	let config = match load_config(config_path) {
		Ok(config) => config,
		Err(error) => {
			eprintln!("Could not load {}: {}", config_path, error);
			return;
		},
	};
	if let Err(error) = logger::init(&config, is_debug) {
		eprintln!("Could not start logging: {}", error);
		return;
	}

	info!("Starting...");

	let db = match Database::connect(config.get_db_url()).await {
		Ok(db) => db,
		Err(error) => {
			error!("DB Error: {}", error);
			return;
		},
	};
	if let Err(error) = Migrator::up(&db, None).await {
		error!("Migration Error: {}", error);
		return;
	}

	let intents = GatewayIntents::GUILDS
		| GatewayIntents::GUILD_MEMBERS
		| GatewayIntents::GUILD_MESSAGES
		| GatewayIntents::DIRECT_MESSAGES
		| GatewayIntents::MESSAGE_CONTENT;
	let mut client = match Client::builder(config.get_token(), intents).event_handler(Router).await {
		Ok(client) => client,
		Err(error) => {
			error!("Erred at client: {}", error);
			return;
		},
	};

	let discord = Arc::new(DiscordGateway::new(client.http.clone(), client.cache.clone()));
	let lifecycle = Lifecycle::new(
		Stores::database(db.clone()),
		Arc::new(ActionRegistry::with_defaults()),
		discord.clone(),
		discord,
	);
	STATIC_COMPONENTS.lock().await.sets(db, lifecycle);

	let shard_manager = client.shard_manager.clone();
	tokio::spawn(async move {
		if tokio::signal::ctrl_c().await.is_ok() {
			info!("Exiting...");
			shard_manager.shutdown_all().await;
		}
	});

	if let Err(error) = client.start().await {
		error!("Stop Error: {}", error);
	}
}
