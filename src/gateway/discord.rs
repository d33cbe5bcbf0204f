use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};
use serenity::all::{
	Cache, Channel, ChannelId, ChannelType, CreateChannel, CreateEmbed, CreateForumPost, CreateMessage, CreateThread,
	EditMessage, EditThread, ForumTagId, GuildId, Http, MessageId, PermissionOverwrite, PermissionOverwriteType,
	Permissions, RoleId, UserId,
};

use crate::error::{ActionError, BotResult};
use crate::forms::{Configuration, Form, Response};
use crate::gateway::{
	render, Banner, BotStanding, ChannelInfo, ForumTag, GuildGateway, Messenger, PostedResponse, RoleInfo,
	TicketRequest,
};

const AUDIT_REASON: &str = "Form action";
const THREAD_NAME_LIMIT: usize = 100;

pub fn is_not_found(error: &serenity::Error) -> bool {
	match error {
		serenity::Error::Http(http_error) => http_error.status_code().is_some_and(|code| code.as_u16() == 404),
		_ => false,
	}
}

#[derive(Clone)]
pub struct DiscordGateway {
	http: Arc<Http>,
	cache: Arc<Cache>,
}

impl DiscordGateway {
	pub fn new(http: Arc<Http>, cache: Arc<Cache>) -> Self {
		DiscordGateway { http, cache }
	}
}

#[async_trait]
impl GuildGateway for DiscordGateway {
	async fn bot_standing(&self, guild_id: u64) -> Result<BotStanding, ActionError> {
		let bot_id = self.cache.current_user().id;
		let guild = GuildId::new(guild_id);
		let member = self.http.get_member(guild, bot_id).await?;
		let roles = self.http.get_guild_roles(guild).await?;

		let mut permissions = Permissions::empty();
		let mut highest_position = 0;
		for role in &roles {
			let everyone = role.id.get() == guild_id;
			if everyone || member.roles.contains(&role.id) {
				permissions |= role.permissions;
				if !everyone {
					highest_position = highest_position.max(role.position);
				}
			}
		}

		Ok(BotStanding {
			manage_roles: permissions.manage_roles() || permissions.administrator(),
			highest_position,
		})
	}

	async fn guild_roles(&self, guild_id: u64) -> Result<Vec<RoleInfo>, ActionError> {
		let roles = self.http.get_guild_roles(GuildId::new(guild_id)).await?;

		Ok(roles
			.into_iter()
			.map(|role| RoleInfo {
				id: role.id.get(),
				name: role.name,
				position: role.position,
			})
			.collect())
	}

	async fn add_member_role(&self, guild_id: u64, user_id: u64, role_id: u64) -> Result<(), ActionError> {
		self.http
			.add_member_role(GuildId::new(guild_id), UserId::new(user_id), RoleId::new(role_id), Some(AUDIT_REASON))
			.await?;
		Ok(())
	}

	async fn remove_member_role(&self, guild_id: u64, user_id: u64, role_id: u64) -> Result<(), ActionError> {
		self.http
			.remove_member_role(GuildId::new(guild_id), UserId::new(user_id), RoleId::new(role_id), Some(AUDIT_REASON))
			.await?;
		Ok(())
	}

	async fn thread_tags(&self, thread_id: u64) -> Result<Option<Vec<u64>>, ActionError> {
		match self.http.get_channel(ChannelId::new(thread_id)).await {
			Ok(Channel::Guild(channel)) => Ok(Some(channel.applied_tags.iter().map(|tag| tag.get()).collect())),
			Ok(_) => Ok(None),
			Err(error) if is_not_found(&error) => {
				debug!("thread {} is gone", thread_id);
				Ok(None)
			},
			Err(error) => Err(error.into()),
		}
	}

	async fn set_thread_tags(&self, thread_id: u64, tag_ids: Vec<u64>) -> Result<(), ActionError> {
		ChannelId::new(thread_id)
			.edit_thread(&*self.http, EditThread::new().applied_tags(tag_ids.into_iter().map(ForumTagId::new)))
			.await?;
		Ok(())
	}

	async fn create_ticket(&self, request: TicketRequest) -> Result<u64, ActionError> {
		let member_access = Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES | Permissions::READ_MESSAGE_HISTORY;
		let mut overwrites = vec![
			PermissionOverwrite {
				allow: Permissions::empty(),
				deny: Permissions::VIEW_CHANNEL,
				kind: PermissionOverwriteType::Role(RoleId::new(request.guild_id)),
			},
			PermissionOverwrite {
				allow: member_access,
				deny: Permissions::empty(),
				kind: PermissionOverwriteType::Member(UserId::new(request.user_id)),
			},
		];
		for role_id in &request.role_ids {
			overwrites.push(PermissionOverwrite {
				allow: member_access,
				deny: Permissions::empty(),
				kind: PermissionOverwriteType::Role(RoleId::new(*role_id)),
			});
		}

		let channel = GuildId::new(request.guild_id)
			.create_channel(
				&*self.http,
				CreateChannel::new(&request.name)
					.kind(ChannelType::Text)
					.category(ChannelId::new(request.category_id))
					.permissions(overwrites),
			)
			.await?;
		channel.id.send_message(&*self.http, CreateMessage::new().content(&request.message)).await?;

		Ok(channel.id.get())
	}

	async fn channel_info(&self, channel_id: u64) -> Option<ChannelInfo> {
		match self.http.get_channel(ChannelId::new(channel_id)).await {
			Ok(Channel::Guild(channel)) => Some(ChannelInfo {
				id: channel.id.get(),
				is_forum: channel.kind == ChannelType::Forum,
				available_tags: channel
					.available_tags
					.iter()
					.map(|tag| ForumTag {
						id: tag.id.get(),
						name: tag.name.clone(),
						emoji: tag.emoji.as_ref().map(|emoji| emoji.to_string()),
					})
					.collect(),
			}),
			Ok(_) => None,
			Err(error) => {
				warn!("channel {} could not be fetched: {}", channel_id, error);
				None
			},
		}
	}
}

#[async_trait]
impl Messenger for DiscordGateway {
	async fn open_dm(&self, user_id: u64) -> BotResult<u64> {
		let channel = UserId::new(user_id).create_dm_channel(&*self.http).await?;
		Ok(channel.id.get())
	}

	async fn send_question(&self, channel_id: u64, form: &Form, index: usize) -> BotResult<u64> {
		let message = ChannelId::new(channel_id)
			.send_message(&*self.http, CreateMessage::new().embed(render::question_embed(form, index)))
			.await?;
		Ok(message.id.get())
	}

	async fn post_response(
		&self,
		form: &Form,
		response: &Response,
		config: &Configuration,
	) -> BotResult<Option<PostedResponse>> {
		let Some(target) = form.channel_id.or(config.response_channel) else {
			return Ok(None);
		};

		let message = CreateMessage::new()
			.embed(render::response_embed(form, response))
			.components(vec![render::moderation_menu(response.id.unwrap_or_default(), &config.dropdown())]);
		let title = render::truncate(&format!("{} - {}", form.name, response.user_id), THREAD_NAME_LIMIT);
		let channel = ChannelId::new(target);

		let is_forum = self.channel_info(target).await.is_some_and(|info| info.is_forum);
		if is_forum {
			let thread = channel.create_forum_post(&*self.http, CreateForumPost::new(title, message)).await?;
			return Ok(Some(PostedResponse {
				channel_id: thread.id.get(),
				message_id: thread.id.get(),
				thread_id: Some(thread.id.get()),
			}));
		}

		let posted = channel.send_message(&*self.http, message).await?;
		let mut thread_id = None;
		if config.autothread {
			match channel.create_thread_from_message(&*self.http, posted.id, CreateThread::new(title)).await {
				Ok(thread) => thread_id = Some(thread.id.get()),
				Err(error) => warn!("could not open a thread for response {:?}: {}", response.id, error),
			}
		}

		Ok(Some(PostedResponse {
			channel_id: target,
			message_id: posted.id.get(),
			thread_id,
		}))
	}

	async fn mark_prompt(&self, channel_id: u64, message_id: u64, banner: &Banner) -> BotResult<()> {
		ChannelId::new(channel_id)
			.edit_message(
				&*self.http,
				MessageId::new(message_id),
				EditMessage::new().embed(render::banner_embed(banner)).components(vec![]),
			)
			.await?;
		Ok(())
	}

	async fn mark_post(&self, channel_id: u64, message_id: u64, banner: &Banner) -> BotResult<()> {
		let channel = ChannelId::new(channel_id);
		let message = channel.message(&*self.http, MessageId::new(message_id)).await?;

		let mut embeds: Vec<CreateEmbed> = message.embeds.into_iter().map(CreateEmbed::from).collect();
		embeds.push(render::banner_embed(banner));
		channel
			.edit_message(&*self.http, message.id, EditMessage::new().embeds(embeds).components(vec![]))
			.await?;
		Ok(())
	}

	async fn notify_user(&self, channel_id: u64, text: &str) -> BotResult<()> {
		ChannelId::new(channel_id).send_message(&*self.http, CreateMessage::new().content(text)).await?;
		Ok(())
	}
}
