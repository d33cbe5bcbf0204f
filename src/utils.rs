pub mod client;
pub mod color;
pub mod confirm;
pub mod convert;
pub mod logger;
pub mod perms;
pub mod prompt;
pub mod reply;
