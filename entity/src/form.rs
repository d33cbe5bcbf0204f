use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "form")]
pub struct Model {
	#[sea_orm(primary_key)]
	pub id: u64,
	pub server_id: u64,
	pub hid: String,
	pub name: String,
	#[sea_orm(column_type = "Text")]
	pub description: String,
	#[sea_orm(column_type = "Text")]
	pub questions: String,
	pub channel_id: Option<u64>,
	#[sea_orm(column_type = "Text")]
	pub roles: String,
	#[sea_orm(column_type = "Text")]
	pub actions: String,
	#[sea_orm(column_type = "Text", nullable)]
	pub message: Option<String>,
	pub color: Option<String>,
	pub emoji: Option<String>,
	pub open: bool,
	pub cooldown: Option<i64>,
	pub post_icon: Option<String>,
	pub post_banner: Option<String>,
	pub button_text: Option<String>,
	pub button_style: Option<u8>,
	pub tickets_id: Option<u64>,
	#[sea_orm(column_type = "Text", nullable)]
	pub ticket_msg: Option<String>,
	#[sea_orm(column_type = "Text")]
	pub ticket_roles: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
