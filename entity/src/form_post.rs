use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "form_post")]
pub struct Model {
	#[sea_orm(primary_key)]
	pub id: u64,
	pub server_id: u64,
	pub channel_id: u64,
	pub message_id: u64,
	pub form_hid: String,
	pub bound: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
