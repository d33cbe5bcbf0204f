use async_trait::async_trait;
use entity::guild_config::ActiveModel;
use entity::GuildConfigBehavior;
use log::debug;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait};

use crate::error::BotResult;
use crate::forms::Configuration;
use crate::stores::{changed_model, insert_model, ConfigStore};

pub struct DbConfigStore {
	db: DatabaseConnection,
}

impl DbConfigStore {
	pub fn new(db: DatabaseConnection) -> Self {
		DbConfigStore { db }
	}
}

#[async_trait]
impl ConfigStore for DbConfigStore {
	async fn get(&self, server_id: u64) -> BotResult<Configuration> {
		let row = GuildConfigBehavior::find_by_id(server_id).one(&self.db).await?;

		Ok(match row {
			Some(model) => Configuration::from_model(model),
			None => Configuration::defaults(server_id),
		})
	}

	async fn save(&self, config: &mut Configuration) -> BotResult<()> {
		let after = config.to_model();

		let saved = match &config.loaded {
			Some(before) => {
				let active: ActiveModel = changed_model::<GuildConfigBehavior, _>(before, &after);
				if !active.is_changed() {
					debug!("guild {}: config unchanged, skipping save", config.server_id);
					return Ok(());
				}
				active.update(&self.db).await?
			},
			None => insert_model::<GuildConfigBehavior, ActiveModel>(&after).insert(&self.db).await?,
		};

		config.loaded = Some(saved);
		Ok(())
	}
}
