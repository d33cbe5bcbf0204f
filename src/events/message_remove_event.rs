use log::{debug, error};
use serenity::model::id::{GuildId, MessageId};

use crate::utils::client;

/// Forgets a form card that was deleted by hand.
pub async fn execute(deleted_message_id: MessageId, guild_id: Option<GuildId>) {
	let Some(guild_id) = guild_id else {
		return;
	};
	debug!("message {} removed in guild {}", deleted_message_id, guild_id);

	let removed = match client::lifecycle().await {
		Ok(lifecycle) => lifecycle.stores.form_posts.delete_by_message(deleted_message_id.get()).await,
		Err(error) => Err(error),
	};
	if let Err(error) = removed {
		error!("{}", error);
	}
}
