use async_trait::async_trait;
use entity::enums::ResponseState;
use entity::response::{ActiveModel, Column};
use entity::ResponseBehavior;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use crate::error::BotResult;
use crate::forms::Response;
use crate::stores::{insert_model, ResponseStore};

const ACTIVE_STATES: [ResponseState; 2] = [ResponseState::Open, ResponseState::Submitted];

pub struct DbResponseStore {
	db: DatabaseConnection,
}

impl DbResponseStore {
	pub fn new(db: DatabaseConnection) -> Self {
		DbResponseStore { db }
	}
}

#[async_trait]
impl ResponseStore for DbResponseStore {
	async fn get(&self, id: u64) -> BotResult<Option<Response>> {
		Ok(ResponseBehavior::find_by_id(id).one(&self.db).await?.map(Response::from_model))
	}

	async fn get_open_by_channel(&self, channel_id: u64) -> BotResult<Option<Response>> {
		let row = ResponseBehavior::find()
			.filter(Column::ChannelId.eq(channel_id))
			.filter(Column::State.eq(ResponseState::Open))
			.order_by_desc(Column::CreatedAt)
			.one(&self.db)
			.await?;

		Ok(row.map(Response::from_model))
	}

	async fn find_active(&self, server_id: u64, user_id: u64, form_hid: &str) -> BotResult<Option<Response>> {
		let row = ResponseBehavior::find()
			.filter(Column::ServerId.eq(server_id))
			.filter(Column::UserId.eq(user_id))
			.filter(Column::FormHid.eq(form_hid))
			.filter(Column::State.is_in(ACTIVE_STATES))
			.one(&self.db)
			.await?;

		Ok(row.map(Response::from_model))
	}

	async fn find_all_active_by_user(&self, server_id: u64, user_id: u64) -> BotResult<Vec<Response>> {
		let rows = ResponseBehavior::find()
			.filter(Column::ServerId.eq(server_id))
			.filter(Column::UserId.eq(user_id))
			.filter(Column::State.is_in(ACTIVE_STATES))
			.all(&self.db)
			.await?;

		Ok(rows.into_iter().map(Response::from_model).collect())
	}

	async fn create(&self, response: Response) -> BotResult<Response> {
		let saved = insert_model::<ResponseBehavior, ActiveModel>(&response.to_model()).insert(&self.db).await?;
		Ok(Response::from_model(saved))
	}

	async fn save(&self, response: &mut Response) -> BotResult<()> {
		let mut active = insert_model::<ResponseBehavior, ActiveModel>(&response.to_model());
		active.id = sea_orm::ActiveValue::Unchanged(response.id.unwrap_or_default());
		let saved = active.update(&self.db).await?;
		*response = Response::from_model(saved);
		Ok(())
	}

	async fn delete(&self, id: u64) -> BotResult<bool> {
		let result = ResponseBehavior::delete_by_id(id).exec(&self.db).await?;
		Ok(result.rows_affected > 0)
	}
}
