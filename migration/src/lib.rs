pub use sea_orm_migration::prelude::*;

mod m20250701_120000_create_table_guild_config;
mod m20250701_120010_create_table_form;
mod m20250701_120020_create_table_form_post;
mod m20250701_120030_create_table_response;
mod m20250812_093000_add_ticket_roles;
mod m20250820_101500_modify_guild_config;
mod tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
	fn migrations() -> Vec<Box<dyn MigrationTrait>> {
		vec![
			Box::new(m20250701_120000_create_table_guild_config::Migration),
			Box::new(m20250701_120010_create_table_form::Migration),
			Box::new(m20250701_120020_create_table_form_post::Migration),
			Box::new(m20250701_120030_create_table_response::Migration),
			Box::new(m20250812_093000_add_ticket_roles::Migration),
			Box::new(m20250820_101500_modify_guild_config::Migration),
		]
	}
}
