use sea_orm_migration::prelude::*;
use crate::tables::Form;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
	async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
		let table =
			Table::create()
				.table(Form::Table)
				.if_not_exists()
				.col(
					ColumnDef::new(Form::Id)
						.big_unsigned()
						.auto_increment()
						.primary_key()
						.not_null()
				)
				.col(ColumnDef::new(Form::ServerId).big_unsigned().not_null())
				.col(ColumnDef::new(Form::Hid).string_len(16).not_null())
				.col(ColumnDef::new(Form::Name).string_len(100).not_null())
				.col(ColumnDef::new(Form::Description).text().not_null())
				.col(ColumnDef::new(Form::Questions).text().not_null())
				.col(ColumnDef::new(Form::ChannelId).big_unsigned().null())
				.col(ColumnDef::new(Form::Roles).text().not_null())
				.col(ColumnDef::new(Form::Actions).text().not_null())
				.col(ColumnDef::new(Form::Message).text().null())
				.col(ColumnDef::new(Form::Color).string_len(16).null())
				.col(ColumnDef::new(Form::Emoji).string_len(64).null())
				.col(
					ColumnDef::new(Form::Open)
						.boolean()
						.default(true)
						.not_null()
				)
				.col(ColumnDef::new(Form::Cooldown).big_integer().null())
				.col(ColumnDef::new(Form::PostIcon).string_len(512).null())
				.col(ColumnDef::new(Form::PostBanner).string_len(512).null())
				.col(ColumnDef::new(Form::ButtonText).string_len(80).null())
				.col(ColumnDef::new(Form::ButtonStyle).tiny_unsigned().null())
				.col(ColumnDef::new(Form::TicketsId).big_unsigned().null())
				.col(ColumnDef::new(Form::TicketMsg).text().null())
				.index(
					Index::create()
						.name("idx_form_server_hid")
						.col(Form::ServerId)
						.col(Form::Hid)
						.unique()
				)
				.to_owned();

		manager
			.create_table(table)
			.await
	}

	async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
		let table =
			Table::drop()
				.table(Form::Table)
				.to_owned();

		manager
			.drop_table(table)
			.await
	}
}
