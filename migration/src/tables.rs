use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
pub enum GuildConfig {
	Table,

	// Column
	Uid,
	ResponseChannel,
	Message,
	Reacts,
	Embed,
	Opped,
	TicketCategory,
	TicketMessage,
	TicketRoles,
	Autothread,
	MsgEphemeral,
	DropdownOptions,
}

#[derive(DeriveIden)]
pub enum Form {
	Table,

	// Column
	Id,
	ServerId,
	Hid,
	Name,
	Description,
	Questions,
	ChannelId,
	Roles,
	Actions,
	Message,
	Color,
	Emoji,
	Open,
	Cooldown,
	PostIcon,
	PostBanner,
	ButtonText,
	ButtonStyle,
	TicketsId,
	TicketMsg,
	TicketRoles,
}

#[derive(DeriveIden)]
pub enum FormPost {
	Table,

	// Column
	Id,
	ServerId,
	ChannelId,
	MessageId,
	FormHid,
	Bound,
}

#[derive(DeriveIden)]
pub enum Response {
	Table,

	// Column
	Id,
	ServerId,
	UserId,
	ChannelId,
	FormHid,
	MessageId,
	PostChannelId,
	PostMessageId,
	ThreadId,
	Answers,
	State,
	CreatedAt,
	UpdatedAt,
}
