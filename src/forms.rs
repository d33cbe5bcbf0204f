pub mod configuration;
pub mod event;
pub mod form;
pub mod question;
pub mod response;

pub use configuration::Configuration;
pub use event::ActionEvent;
pub use form::Form;
pub use question::{Question, QuestionKind};
pub use response::Response;
