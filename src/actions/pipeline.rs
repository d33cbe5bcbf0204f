use log::{info, warn};

use crate::actions::{ActionRegistry, ExecutionContext};
use crate::forms::{ActionEvent, Configuration, Form, Response};
use crate::gateway::GuildGateway;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionFailure {
	pub action: String,
	pub message: String,
}

/// Outcome of running one event's actions. Failures never stop later actions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
	pub succeeded: Vec<String>,
	pub failures: Vec<ActionFailure>,
}

impl PipelineReport {
	pub fn failure_messages(&self) -> Vec<String> {
		self.failures.iter().map(|f| f.message.clone()).collect()
	}

	/// One combined message for the moderator, or `None` when nothing failed.
	pub fn summary(&self) -> Option<String> {
		if self.failures.is_empty() {
			return None;
		}

		let lines: Vec<String> = self.failures.iter().map(|f| format!("- `{}`: {}", f.action, f.message)).collect();
		Some(format!("Some actions failed to run:\n{}", lines.join("\n")))
	}
}

impl ActionRegistry {
	/// Runs the form's actions for `event` in ascending priority, keeping configuration order on ties.
	pub async fn run_event(
		&self,
		event: ActionEvent,
		form: &Form,
		response: &Response,
		config: &Configuration,
		client: &dyn GuildGateway,
	) -> PipelineReport {
		let mut report = PipelineReport::default();
		let mut planned = vec![];

		for stored in form.configured_actions(event) {
			match self.get(&stored.kind) {
				Some(action) if action.supports(event) => planned.push((action, stored)),
				Some(action) => report.failures.push(ActionFailure {
					action: action.id().to_string(),
					message: format!("Action cannot run on {}", event),
				}),
				None => report.failures.push(ActionFailure {
					action: stored.kind.clone(),
					message: "Unknown action".to_string(),
				}),
			}
		}
		planned.sort_by_key(|(action, _)| action.priority());

		for (action, stored) in &planned {
			let ctx = ExecutionContext {
				response,
				form,
				config,
				member: response.user_id,
				guild: response.server_id,
				action: stored,
				client,
			};

			match action.handler(&ctx).await {
				Ok(()) => report.succeeded.push(action.id().to_string()),
				Err(error) => {
					warn!("form {} {}: {} failed: {}", form.hid, event, action.id(), error);
					report.failures.push(ActionFailure {
						action: action.id().to_string(),
						message: error.reason(),
					});
				},
			}
		}

		info!(
			"form {} {}: {} actions ran, {} failed",
			form.hid,
			event,
			report.succeeded.len(),
			report.failures.len()
		);
		report
	}
}
