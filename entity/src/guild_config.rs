use sea_orm::entity::prelude::*;

/// Per-guild policy row. JSON-valued fields are kept as text and decoded by the bot.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "guild_config")]
pub struct Model {
	#[sea_orm(primary_key, auto_increment = false)]
	pub uid: u64,
	pub response_channel: Option<u64>,
	#[sea_orm(column_type = "Text", nullable)]
	pub message: Option<String>,
	pub reacts: bool,
	pub embed: bool,
	#[sea_orm(column_type = "Text", nullable)]
	pub opped: Option<String>,
	pub ticket_category: Option<u64>,
	#[sea_orm(column_type = "Text", nullable)]
	pub ticket_message: Option<String>,
	#[sea_orm(column_type = "Text", nullable)]
	pub ticket_roles: Option<String>,
	pub autothread: bool,
	pub msg_ephemeral: bool,
	#[sea_orm(column_type = "Text", nullable)]
	pub dropdown_options: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
