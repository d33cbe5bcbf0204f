use sea_orm_migration::prelude::*;
use crate::tables::GuildConfig;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
	async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
		let table =
			Table::create()
				.table(GuildConfig::Table)
				.if_not_exists()
				.col(
					ColumnDef::new(GuildConfig::Uid)
						.big_unsigned()
						.primary_key()
						.not_null()
				)
				.col(
					ColumnDef::new(GuildConfig::ResponseChannel)
						.big_unsigned()
						.null()
				)
				.col(
					ColumnDef::new(GuildConfig::Message)
						.text()
						.null()
				)
				.col(
					ColumnDef::new(GuildConfig::Reacts)
						.boolean()
						.default(true)
						.not_null()
				)
				.col(
					ColumnDef::new(GuildConfig::Embed)
						.boolean()
						.default(true)
						.not_null()
				)
				.col(
					ColumnDef::new(GuildConfig::Opped)
						.text()
						.null()
				)
				.col(
					ColumnDef::new(GuildConfig::TicketCategory)
						.big_unsigned()
						.null()
				)
				.col(
					ColumnDef::new(GuildConfig::TicketMessage)
						.text()
						.null()
				)
				.col(
					ColumnDef::new(GuildConfig::Autothread)
						.boolean()
						.default(false)
						.not_null()
				)
				.to_owned();

		manager
			.create_table(table)
			.await
	}

	async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
		let table =
			Table::drop()
				.table(GuildConfig::Table)
				.to_owned();

		manager
			.drop_table(table)
			.await
	}
}
