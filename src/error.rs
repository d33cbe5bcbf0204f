use sea_orm::DbErr;
use thiserror::Error;

/// Errors surfaced to command handlers and lifecycle callers.
#[derive(Debug, Error)]
pub enum BotError {
	#[error("{0}")]
	Validation(String),

	#[error("{0} not found")]
	NotFound(String),

	#[error("{0}")]
	Cancelled(String),

	#[error("database error: {0}")]
	Persistence(#[from] DbErr),

	#[error("discord error: {0}")]
	Discord(#[from] serenity::Error),
}

impl BotError {
	pub fn validation(message: impl Into<String>) -> Self {
		BotError::Validation(message.into())
	}

	pub fn not_found(what: impl Into<String>) -> Self {
		BotError::NotFound(what.into())
	}

	/// Text shown to the invoking user. Persistence and Discord failures are reported generically.
	pub fn user_message(&self) -> String {
		match self {
			BotError::Validation(message) | BotError::Cancelled(message) => message.clone(),
			BotError::NotFound(what) => format!("{} not found!", what),
			BotError::Persistence(_) | BotError::Discord(_) => {
				"Something went wrong while processing that. Please try again.".to_string()
			},
		}
	}
}

/// A failure raised by an action handler. Caught per action by the pipeline.
#[derive(Debug, Error)]
pub enum ActionError {
	#[error("PermissionError: {0}")]
	Permission(String),

	#[error("HierarchyError: {0}")]
	Hierarchy(String),

	#[error("invalid action data: {0}")]
	InvalidData(String),

	#[error("discord error: {0}")]
	Discord(#[from] serenity::Error),
}

impl ActionError {
	/// Message recorded in the pipeline report, without the error kind prefix.
	pub fn reason(&self) -> String {
		match self {
			ActionError::Permission(message)
			| ActionError::Hierarchy(message)
			| ActionError::InvalidData(message) => message.clone(),
			ActionError::Discord(error) => error.to_string(),
		}
	}
}

pub type BotResult<T> = Result<T, BotError>;
