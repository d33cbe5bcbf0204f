use sea_orm_migration::prelude::*;
use crate::tables::Response;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
	async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
		let table =
			Table::create()
				.table(Response::Table)
				.if_not_exists()
				.col(
					ColumnDef::new(Response::Id)
						.big_unsigned()
						.auto_increment()
						.primary_key()
						.not_null()
				)
				.col(ColumnDef::new(Response::ServerId).big_unsigned().not_null())
				.col(ColumnDef::new(Response::UserId).big_unsigned().not_null())
				.col(ColumnDef::new(Response::ChannelId).big_unsigned().not_null())
				.col(ColumnDef::new(Response::FormHid).string_len(16).not_null())
				.col(ColumnDef::new(Response::MessageId).big_unsigned().null())
				.col(ColumnDef::new(Response::PostChannelId).big_unsigned().null())
				.col(ColumnDef::new(Response::PostMessageId).big_unsigned().null())
				.col(ColumnDef::new(Response::ThreadId).big_unsigned().null())
				.col(ColumnDef::new(Response::Answers).text().not_null())
				.col(ColumnDef::new(Response::State).string_len(16).not_null())
				.col(ColumnDef::new(Response::CreatedAt).timestamp().not_null())
				.col(ColumnDef::new(Response::UpdatedAt).timestamp().not_null())
				.index(
					Index::create()
						.name("idx_response_user_form")
						.col(Response::ServerId)
						.col(Response::UserId)
						.col(Response::FormHid)
				)
				.index(
					Index::create()
						.name("idx_response_channel")
						.col(Response::ChannelId)
				)
				.to_owned();

		manager
			.create_table(table)
			.await
	}

	async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
		let table =
			Table::drop()
				.table(Response::Table)
				.to_owned();

		manager
			.drop_table(table)
			.await
	}
}
