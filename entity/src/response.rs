use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

use crate::enums::ResponseState;

/// A live (non-terminal) response row. Terminal responses are deleted.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "response")]
pub struct Model {
	#[sea_orm(primary_key)]
	pub id: u64,
	pub server_id: u64,
	pub user_id: u64,
	pub channel_id: u64,
	pub form_hid: String,
	pub message_id: Option<u64>,
	pub post_channel_id: Option<u64>,
	pub post_message_id: Option<u64>,
	pub thread_id: Option<u64>,
	#[sea_orm(column_type = "Text")]
	pub answers: String,
	pub state: ResponseState,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
