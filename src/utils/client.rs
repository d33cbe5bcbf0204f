use sea_orm::DatabaseConnection;

use crate::error::{BotError, BotResult};
use crate::lifecycle::Lifecycle;
use crate::STATIC_COMPONENTS;

pub struct Components {
	db: Option<DatabaseConnection>,
	lifecycle: Option<Lifecycle>,
}

impl Components {
	pub fn new() -> Components {
		Components { db: None, lifecycle: None }
	}

	pub fn sets(&mut self, db: DatabaseConnection, lifecycle: Lifecycle) {
		self.db = Some(db);
		self.lifecycle = Some(lifecycle);
	}

	pub fn get_db(&self) -> Option<&DatabaseConnection> {
		self.db.as_ref()
	}

	pub fn get_lifecycle(&self) -> Option<&Lifecycle> {
		self.lifecycle.as_ref()
	}
}

fn starting() -> BotError {
	BotError::validation("The bot is still starting up. Try again in a moment.")
}

/// Clone of the running lifecycle. The lock is released before returning.
pub async fn lifecycle() -> BotResult<Lifecycle> {
	let lsc = STATIC_COMPONENTS.lock().await;
	lsc.get_lifecycle().cloned().ok_or_else(starting)
}

pub async fn db() -> BotResult<DatabaseConnection> {
	let lsc = STATIC_COMPONENTS.lock().await;
	lsc.get_db().cloned().ok_or_else(starting)
}
