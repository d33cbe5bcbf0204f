//! Narrow views of the Discord API used by actions and the response lifecycle.

use async_trait::async_trait;

use crate::error::{ActionError, BotResult};
use crate::forms::{Configuration, Form, Response};

pub mod discord;
pub mod render;

pub use discord::DiscordGateway;

/// The bot's own standing in a guild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotStanding {
	pub manage_roles: bool,
	pub highest_position: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleInfo {
	pub id: u64,
	pub name: String,
	pub position: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForumTag {
	pub id: u64,
	pub name: String,
	pub emoji: Option<String>,
}

impl ForumTag {
	/// `emoji name`, or just the name for tags without an emoji.
	pub fn label(&self) -> String {
		match &self.emoji {
			Some(emoji) => format!("{} {}", emoji, self.name),
			None => self.name.clone(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelInfo {
	pub id: u64,
	pub is_forum: bool,
	pub available_tags: Vec<ForumTag>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketRequest {
	pub guild_id: u64,
	pub category_id: u64,
	pub name: String,
	pub user_id: u64,
	pub role_ids: Vec<u64>,
	pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostedResponse {
	pub channel_id: u64,
	pub message_id: u64,
	pub thread_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
	Submitted,
	Accepted { reason: String },
	Denied { reason: String },
	Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
	pub label: String,
	pub value: String,
	pub description: Option<String>,
}

#[async_trait]
pub trait GuildGateway: Send + Sync {
	async fn bot_standing(&self, guild_id: u64) -> Result<BotStanding, ActionError>;
	async fn guild_roles(&self, guild_id: u64) -> Result<Vec<RoleInfo>, ActionError>;
	async fn add_member_role(&self, guild_id: u64, user_id: u64, role_id: u64) -> Result<(), ActionError>;
	async fn remove_member_role(&self, guild_id: u64, user_id: u64, role_id: u64) -> Result<(), ActionError>;
	/// Tags applied to a thread, or `None` when the thread no longer exists.
	async fn thread_tags(&self, thread_id: u64) -> Result<Option<Vec<u64>>, ActionError>;
	async fn set_thread_tags(&self, thread_id: u64, tag_ids: Vec<u64>) -> Result<(), ActionError>;
	async fn create_ticket(&self, request: TicketRequest) -> Result<u64, ActionError>;
	async fn channel_info(&self, channel_id: u64) -> Option<ChannelInfo>;
}

/// Messages the lifecycle sends on behalf of a response.
#[async_trait]
pub trait Messenger: Send + Sync {
	/// DM channel id for a user.
	async fn open_dm(&self, user_id: u64) -> BotResult<u64>;
	/// Sends the prompt for question `index` and returns its message id.
	async fn send_question(&self, channel_id: u64, form: &Form, index: usize) -> BotResult<u64>;
	/// Posts a submitted response for moderation. `None` when the guild has nowhere to post it.
	async fn post_response(
		&self,
		form: &Form,
		response: &Response,
		config: &Configuration,
	) -> BotResult<Option<PostedResponse>>;
	async fn mark_prompt(&self, channel_id: u64, message_id: u64, banner: &Banner) -> BotResult<()>;
	async fn mark_post(&self, channel_id: u64, message_id: u64, banner: &Banner) -> BotResult<()>;
	async fn notify_user(&self, channel_id: u64, text: &str) -> BotResult<()>;
}

/// Interactive selection used while attaching an action to a form.
#[async_trait]
pub trait SetupPrompter: Send + Sync {
	/// Picks from `choices`. `Err` carries the message to show when the prompt times out or is dismissed.
	async fn select(&self, prompt: &str, choices: Vec<Choice>, min: usize, max: usize) -> Result<Vec<String>, String>;
	async fn select_roles(&self, prompt: &str, min: usize, max: usize) -> Result<Vec<u64>, String>;
}
