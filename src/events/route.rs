use log::info;
use serenity::all::{ChannelId, GuildId, Interaction, Member, Message, MessageId, Ready, User};
use serenity::async_trait;
use serenity::client::{Context, EventHandler};

use crate::events::{interaction_event, member_remove_event, message_event, message_remove_event, ready_event};

pub struct Router;

#[async_trait]
impl EventHandler for Router {
	async fn guild_member_removal(&self, _: Context, guild_id: GuildId, user: User, _: Option<Member>) {
		member_remove_event::execute(guild_id, user).await;
	}

	async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
		interaction_event::execute(ctx, interaction).await;
	}

	async fn message(&self, ctx: Context, message: Message) {
		message_event::execute(ctx, message).await;
	}

	async fn message_delete(&self, _: Context, _: ChannelId, deleted_message_id: MessageId, guild_id: Option<GuildId>) {
		message_remove_event::execute(deleted_message_id, guild_id).await;
	}

	async fn ready(&self, ctx: Context, data_about_bot: Ready) {
		info!("Ready event start");
		ready_event::execute(ctx, data_about_bot).await;
		info!("Ready event end");
	}
}
