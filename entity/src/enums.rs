use std::fmt::Display;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(16))")]
pub enum ResponseState {
	#[sea_orm(string_value = "open")]
	Open,
	#[sea_orm(string_value = "submitted")]
	Submitted,
	#[sea_orm(string_value = "accepted")]
	Accepted,
	#[sea_orm(string_value = "denied")]
	Denied,
	#[sea_orm(string_value = "cancelled")]
	Cancelled,
}

impl Display for ResponseState {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", match self {
			ResponseState::Open => "open",
			ResponseState::Submitted => "submitted",
			ResponseState::Accepted => "accepted",
			ResponseState::Denied => "denied",
			ResponseState::Cancelled => "cancelled",
		})
	}
}
