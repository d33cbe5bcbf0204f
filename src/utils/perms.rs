use serenity::all::{CommandInteraction, Member, Permissions};

use crate::forms::Configuration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
	Everyone,
	/// Manage Messages, or opped in the guild configuration.
	Moderator,
	/// Manage Guild, or opped in the guild configuration.
	Manager,
}

impl Access {
	fn required(&self) -> Permissions {
		match self {
			Access::Everyone => Permissions::empty(),
			Access::Moderator => Permissions::MANAGE_MESSAGES,
			Access::Manager => Permissions::MANAGE_GUILD,
		}
	}

	pub fn allows(&self, permissions: Permissions, user_id: u64, role_ids: &[u64], config: &Configuration) -> bool {
		*self == Access::Everyone
			|| permissions.administrator()
			|| permissions.contains(self.required())
			|| config.is_opped(user_id, role_ids)
	}
}

pub fn member_allowed(member: Option<&Member>, access: Access, config: &Configuration) -> bool {
	if access == Access::Everyone {
		return true;
	}
	let Some(member) = member else {
		return false;
	};

	let roles: Vec<u64> = member.roles.iter().map(|role| role.get()).collect();
	access.allows(member.permissions.unwrap_or_default(), member.user.id.get(), &roles, config)
}

pub fn command_allowed(command: &CommandInteraction, access: Access, config: &Configuration) -> bool {
	member_allowed(command.member.as_deref(), access, config)
}
