use sea_orm_migration::prelude::*;
use crate::tables::FormPost;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
	async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
		let table =
			Table::create()
				.table(FormPost::Table)
				.if_not_exists()
				.col(
					ColumnDef::new(FormPost::Id)
						.big_unsigned()
						.auto_increment()
						.primary_key()
						.not_null()
				)
				.col(ColumnDef::new(FormPost::ServerId).big_unsigned().not_null())
				.col(ColumnDef::new(FormPost::ChannelId).big_unsigned().not_null())
				.col(ColumnDef::new(FormPost::MessageId).big_unsigned().not_null())
				.col(ColumnDef::new(FormPost::FormHid).string_len(16).not_null())
				.col(
					ColumnDef::new(FormPost::Bound)
						.boolean()
						.default(false)
						.not_null()
				)
				.index(
					Index::create()
						.name("idx_form_post_form")
						.col(FormPost::ServerId)
						.col(FormPost::FormHid)
				)
				.to_owned();

		manager
			.create_table(table)
			.await
	}

	async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
		let table =
			Table::drop()
				.table(FormPost::Table)
				.to_owned();

		manager
			.drop_table(table)
			.await
	}
}
