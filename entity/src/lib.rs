pub mod enums;

pub mod form;
pub mod form_post;
pub mod guild_config;
pub mod response;

pub type Form = form::Model;
pub type FormBehavior = form::Entity;

pub type FormPost = form_post::Model;
pub type FormPostBehavior = form_post::Entity;

pub type GuildConfig = guild_config::Model;
pub type GuildConfigBehavior = guild_config::Entity;

pub type Response = response::Model;
pub type ResponseBehavior = response::Entity;
