use log::{error, info};
use serenity::model::id::GuildId;
use serenity::model::user::User;

use crate::utils::client;
use crate::utils::convert::format_discord_username;

/// Cancels whatever the departed member left open or pending.
pub async fn execute(guild_id: GuildId, user: User) {
	if user.bot {
		return;
	}
	info!("member {} left guild {}", format_discord_username(&user), guild_id);

	match client::lifecycle().await {
		Ok(lifecycle) => {
			lifecycle.auto_cancel(guild_id.get(), user.id.get()).await;
		},
		Err(error) => error!("{}", error),
	}
}
