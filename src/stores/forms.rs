use async_trait::async_trait;
use entity::form::{ActiveModel, Column};
use entity::{form_post, response, FormBehavior, FormPostBehavior, ResponseBehavior};
use log::{info, warn};
use sea_orm::{
	ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};

use crate::error::{BotError, BotResult};
use crate::forms::form::{verify, FormDraft};
use crate::forms::Form;
use crate::stores::{changed_model, generate_hid, insert_model, FormStore};

pub const MAX_IMPORT: usize = 100;
/// Guilds holding this many forms cannot gain new ones through import.
pub const FREE_FORM_LIMIT: usize = 5;

pub struct DbFormStore {
	db: DatabaseConnection,
}

impl DbFormStore {
	pub fn new(db: DatabaseConnection) -> Self {
		DbFormStore { db }
	}
}

#[async_trait]
impl FormStore for DbFormStore {
	async fn get(&self, server_id: u64, hid: &str) -> BotResult<Option<Form>> {
		let row = FormBehavior::find()
			.filter(Column::ServerId.eq(server_id))
			.filter(Column::Hid.eq(hid.to_lowercase()))
			.one(&self.db)
			.await?;

		Ok(row.map(Form::from_model))
	}

	async fn get_all(&self, server_id: u64) -> BotResult<Vec<Form>> {
		let rows = FormBehavior::find()
			.filter(Column::ServerId.eq(server_id))
			.order_by_asc(Column::Id)
			.all(&self.db)
			.await?;

		Ok(rows.into_iter().map(Form::from_model).collect())
	}

	async fn create(&self, mut form: Form) -> BotResult<Form> {
		if form.hid.is_empty() {
			let taken: Vec<String> = self.get_all(form.server_id).await?.into_iter().map(|f| f.hid).collect();
			form.hid = generate_hid(|candidate| taken.iter().any(|hid| hid == candidate));
		}

		let saved = insert_model::<FormBehavior, ActiveModel>(&form.to_model()).insert(&self.db).await?;
		info!("guild {}: created form {}", saved.server_id, saved.hid);
		Ok(Form::from_model(saved))
	}

	async fn save(&self, form: &mut Form) -> BotResult<()> {
		let Some(before) = &form.loaded else {
			return Err(BotError::not_found("Form"));
		};

		let active: ActiveModel = changed_model::<FormBehavior, _>(before, &form.to_model());
		if !active.is_changed() {
			return Ok(());
		}

		let saved = active.update(&self.db).await?;
		form.loaded = Some(saved);
		Ok(())
	}

	async fn delete(&self, form: &Form) -> BotResult<Vec<entity::FormPost>> {
		let Some(id) = form.id else {
			return Err(BotError::not_found("Form"));
		};

		let txn = self.db.begin().await?;
		let responses = ResponseBehavior::delete_many()
			.filter(response::Column::ServerId.eq(form.server_id))
			.filter(response::Column::FormHid.eq(form.hid.as_str()))
			.exec(&txn)
			.await?;
		let posts = FormPostBehavior::find()
			.filter(form_post::Column::ServerId.eq(form.server_id))
			.filter(form_post::Column::FormHid.eq(form.hid.as_str()))
			.all(&txn)
			.await?;
		FormPostBehavior::delete_many()
			.filter(form_post::Column::ServerId.eq(form.server_id))
			.filter(form_post::Column::FormHid.eq(form.hid.as_str()))
			.exec(&txn)
			.await?;
		FormBehavior::delete_by_id(id).exec(&txn).await?;
		txn.commit().await?;

		info!(
			"guild {}: deleted form {} with {} responses and {} posts",
			form.server_id,
			form.hid,
			responses.rows_affected,
			posts.len()
		);
		Ok(posts)
	}
}

#[derive(Debug, Default, PartialEq)]
pub struct ImportReport {
	pub updated: usize,
	pub created: usize,
	/// Labels of new forms left out because of the form limit.
	pub skipped: Vec<String>,
	/// `label - reason` for drafts that failed verification.
	pub failed: Vec<String>,
}

fn draft_label(draft: &FormDraft) -> String {
	draft
		.name
		.clone()
		.filter(|n| !n.trim().is_empty())
		.or_else(|| draft.hid.clone())
		.unwrap_or_else(|| "(invalid form)".to_string())
}

/// Imports drafts into a guild. Existing forms are matched by hid or name and updated in place.
pub async fn import(store: &dyn FormStore, server_id: u64, drafts: Vec<FormDraft>) -> BotResult<ImportReport> {
	if drafts.len() > MAX_IMPORT {
		return Err(BotError::validation(format!("You can only import up to {} forms at once.", MAX_IMPORT)));
	}

	let mut forms = store.get_all(server_id).await?;
	let can_create = forms.len() < FREE_FORM_LIMIT;
	let mut report = ImportReport::default();

	for draft in drafts {
		let questions = match verify(&draft) {
			Ok(questions) => questions,
			Err(reason) => {
				report.failed.push(format!("{} - {}", draft_label(&draft), reason));
				continue;
			},
		};

		let existing = forms.iter_mut().find(|form| {
			draft.hid.as_deref().is_some_and(|hid| hid.eq_ignore_ascii_case(&form.hid))
				|| draft.name.as_deref().is_some_and(|name| name.trim() == form.name)
		});

		match existing {
			Some(form) => {
				form.apply_draft(&draft, questions);
				store.save(form).await?;
				report.updated += 1;
			},
			None if can_create => {
				let created = store.create(Form::from_draft(server_id, "", &draft, questions)).await?;
				forms.push(created);
				report.created += 1;
			},
			None => {
				warn!("guild {}: import skipped {} (form limit)", server_id, draft_label(&draft));
				report.skipped.push(draft_label(&draft));
			},
		}
	}

	Ok(report)
}

/// Exports a guild's forms, optionally only the given hids.
pub async fn export(store: &dyn FormStore, server_id: u64, hids: &[String]) -> BotResult<Vec<FormDraft>> {
	let forms = store.get_all(server_id).await?;

	Ok(forms
		.iter()
		.filter(|form| hids.is_empty() || hids.iter().any(|hid| hid.eq_ignore_ascii_case(&form.hid)))
		.map(Form::to_draft)
		.collect())
}
