use async_trait::async_trait;
use entity::form_post::{ActiveModel, Column};
use entity::FormPostBehavior;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::error::BotResult;
use crate::stores::{insert_model, FormPostStore};

pub struct DbFormPostStore {
	db: DatabaseConnection,
}

impl DbFormPostStore {
	pub fn new(db: DatabaseConnection) -> Self {
		DbFormPostStore { db }
	}
}

#[async_trait]
impl FormPostStore for DbFormPostStore {
	async fn get_by_form(&self, server_id: u64, form_hid: &str) -> BotResult<Vec<entity::FormPost>> {
		Ok(FormPostBehavior::find()
			.filter(Column::ServerId.eq(server_id))
			.filter(Column::FormHid.eq(form_hid))
			.all(&self.db)
			.await?)
	}

	async fn create(&self, post: entity::FormPost) -> BotResult<entity::FormPost> {
		Ok(insert_model::<FormPostBehavior, ActiveModel>(&post).insert(&self.db).await?)
	}

	async fn delete_by_message(&self, message_id: u64) -> BotResult<()> {
		FormPostBehavior::delete_many()
			.filter(Column::MessageId.eq(message_id))
			.exec(&self.db)
			.await?;
		Ok(())
	}
}
