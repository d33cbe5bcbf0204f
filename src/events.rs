pub mod interaction_event;
pub mod member_remove_event;
pub mod message_event;
pub mod message_remove_event;
pub mod ready_event;
pub mod route;
