//! Persistence seams. Each store is a trait so the lifecycle can run against
//! the database in production and against in-memory fakes in tests.

use std::sync::Arc;

use async_trait::async_trait;
use rand::distr::Alphanumeric;
use rand::Rng;
use sea_orm::{
	ActiveModelTrait, DatabaseConnection, EntityTrait, IdenStatic, IntoActiveModel, Iterable, ModelTrait, PrimaryKeyToColumn,
	PrimaryKeyTrait,
};

use crate::error::BotResult;
use crate::forms::{Configuration, Form, Response};

pub mod codec;
pub mod configs;
pub mod form_posts;
pub mod forms;
pub mod responses;

pub const HID_LENGTH: usize = 5;

#[async_trait]
pub trait ConfigStore: Send + Sync {
	/// Stored row for the guild, or transient defaults. Never persists on read.
	async fn get(&self, server_id: u64) -> BotResult<Configuration>;
	/// Writes the fields changed since the configuration was read.
	async fn save(&self, config: &mut Configuration) -> BotResult<()>;
}

#[async_trait]
pub trait FormStore: Send + Sync {
	async fn get(&self, server_id: u64, hid: &str) -> BotResult<Option<Form>>;
	async fn get_all(&self, server_id: u64) -> BotResult<Vec<Form>>;
	/// Inserts the form. An empty `hid` is replaced with a fresh one.
	async fn create(&self, form: Form) -> BotResult<Form>;
	async fn save(&self, form: &mut Form) -> BotResult<()>;
	/// Removes the form with its responses and posts. Returns the removed posts.
	async fn delete(&self, form: &Form) -> BotResult<Vec<entity::FormPost>>;
}

#[async_trait]
pub trait ResponseStore: Send + Sync {
	async fn get(&self, id: u64) -> BotResult<Option<Response>>;
	/// The response currently collecting answers in a DM channel.
	async fn get_open_by_channel(&self, channel_id: u64) -> BotResult<Option<Response>>;
	/// Non-terminal response of a user on one form.
	async fn find_active(&self, server_id: u64, user_id: u64, form_hid: &str) -> BotResult<Option<Response>>;
	async fn find_all_active_by_user(&self, server_id: u64, user_id: u64) -> BotResult<Vec<Response>>;
	async fn create(&self, response: Response) -> BotResult<Response>;
	async fn save(&self, response: &mut Response) -> BotResult<()>;
	/// Returns false when the row was already gone.
	async fn delete(&self, id: u64) -> BotResult<bool>;
}

#[async_trait]
pub trait FormPostStore: Send + Sync {
	async fn get_by_form(&self, server_id: u64, form_hid: &str) -> BotResult<Vec<entity::FormPost>>;
	async fn create(&self, post: entity::FormPost) -> BotResult<entity::FormPost>;
	async fn delete_by_message(&self, message_id: u64) -> BotResult<()>;
}

#[derive(Clone)]
pub struct Stores {
	pub configs: Arc<dyn ConfigStore>,
	pub forms: Arc<dyn FormStore>,
	pub responses: Arc<dyn ResponseStore>,
	pub form_posts: Arc<dyn FormPostStore>,
}

impl Stores {
	pub fn database(db: DatabaseConnection) -> Self {
		Stores {
			configs: Arc::new(configs::DbConfigStore::new(db.clone())),
			forms: Arc::new(forms::DbFormStore::new(db.clone())),
			responses: Arc::new(responses::DbResponseStore::new(db.clone())),
			form_posts: Arc::new(form_posts::DbFormPostStore::new(db)),
		}
	}
}

/// Random lower-case hid that `taken` does not contain.
pub fn generate_hid<F>(taken: F) -> String
where
	F: Fn(&str) -> bool,
{
	let mut rng = rand::rng();
	loop {
		let hid: String = (&mut rng)
			.sample_iter(&Alphanumeric)
			.take(HID_LENGTH)
			.map(|c| char::from(c).to_ascii_lowercase())
			.collect();
		if !taken(&hid) {
			return hid;
		}
	}
}

fn auto_key_columns<E: EntityTrait>() -> Vec<String> {
	if <E::PrimaryKey as PrimaryKeyTrait>::auto_increment() {
		E::PrimaryKey::iter().map(|key| key.into_column().as_str().to_string()).collect()
	} else {
		vec![]
	}
}

/// Active model with every column set, leaving out auto increment keys.
pub(crate) fn insert_model<E, A>(model: &E::Model) -> A
where
	E: EntityTrait,
	A: ActiveModelTrait<Entity = E>,
{
	let skip = auto_key_columns::<E>();
	let mut active = A::default();
	for column in E::Column::iter() {
		if !skip.iter().any(|name| name == column.as_str()) {
			active.set(column, model.get(column));
		}
	}
	active
}

/// Active model that only marks the columns whose value differs from `before`.
pub(crate) fn changed_model<E, A>(before: &E::Model, after: &E::Model) -> A
where
	E: EntityTrait,
	A: ActiveModelTrait<Entity = E>,
	E::Model: IntoActiveModel<A>,
{
	let mut active = before.clone().into_active_model();
	for column in E::Column::iter() {
		let value = after.get(column);
		if before.get(column) != value {
			active.set(column, value);
		}
	}
	active
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn hid_is_short_lowercase_and_free() {
		let hid = generate_hid(|candidate| candidate.starts_with('a'));
		assert_eq!(hid.len(), HID_LENGTH);
		assert!(hid.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
		assert!(!hid.starts_with('a'));
	}

	#[test]
	fn changed_model_marks_only_differences() {
		let mut before = Configuration::defaults(5).to_model();
		before.ticket_category = Some(1);
		let mut after = before.clone();
		after.msg_ephemeral = true;

		let active: entity::guild_config::ActiveModel = changed_model::<entity::GuildConfigBehavior, _>(&before, &after);
		assert!(active.msg_ephemeral.is_set());
		assert!(!active.ticket_category.is_set());
		assert!(active.is_changed());
	}

	#[test]
	fn unchanged_model_is_not_dirty() {
		let model = Configuration::defaults(5).to_model();
		let active: entity::guild_config::ActiveModel = changed_model::<entity::GuildConfigBehavior, _>(&model, &model);
		assert!(!active.is_changed());
	}
}
