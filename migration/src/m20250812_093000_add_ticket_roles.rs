use sea_orm_migration::prelude::*;

use crate::tables::{Form, GuildConfig};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
	async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
		if !manager.has_column("form", "ticket_roles").await? {
			let table =
				Table::alter()
					.table(Form::Table)
					.add_column(
						ColumnDef::new(Form::TicketRoles)
							.text()
							.not_null()
					)
					.to_owned();

			manager
				.alter_table(table)
				.await?;
		}

		if !manager.has_column("guild_config", "ticket_roles").await? {
			let table =
				Table::alter()
					.table(GuildConfig::Table)
					.add_column(
						ColumnDef::new(GuildConfig::TicketRoles)
							.text()
							.null()
					)
					.to_owned();

			manager
				.alter_table(table)
				.await?;
		}

		Ok(())
	}

	async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
		manager
			.alter_table(
				Table::alter()
					.table(Form::Table)
					.drop_column(Form::TicketRoles)
					.to_owned()
			)
			.await?;

		manager
			.alter_table(
				Table::alter()
					.table(GuildConfig::Table)
					.drop_column(GuildConfig::TicketRoles)
					.to_owned()
			)
			.await
	}
}
