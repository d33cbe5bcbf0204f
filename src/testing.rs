//! In-memory stores and scripted Discord collaborators for unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use entity::enums::ResponseState;
use sea_orm::DbErr;

use crate::error::{ActionError, BotError, BotResult};
use crate::forms::{Configuration, Form, Response};
use crate::gateway::{
	Banner, BotStanding, ChannelInfo, Choice, GuildGateway, Messenger, PostedResponse, RoleInfo, SetupPrompter,
	TicketRequest,
};
use crate::stores::{generate_hid, ConfigStore, FormPostStore, FormStore, ResponseStore, Stores};

impl Stores {
	pub fn memory() -> Self {
		MemoryStores::default().stores()
	}
}

/// Keeps typed handles on the fakes so tests can inspect or sabotage them.
#[derive(Default, Clone)]
pub struct MemoryStores {
	pub configs: Arc<MemoryConfigStore>,
	pub forms: Arc<MemoryFormStore>,
	pub responses: Arc<MemoryResponseStore>,
	pub form_posts: Arc<MemoryFormPostStore>,
}

impl MemoryStores {
	pub fn stores(&self) -> Stores {
		Stores {
			configs: self.configs.clone(),
			forms: self.forms.clone(),
			responses: self.responses.clone(),
			form_posts: self.form_posts.clone(),
		}
	}
}

#[derive(Default)]
pub struct MemoryConfigStore {
	rows: Mutex<HashMap<u64, entity::GuildConfig>>,
}

impl MemoryConfigStore {
	pub fn stored(&self) -> usize {
		self.rows.lock().unwrap().len()
	}
}

#[async_trait]
impl ConfigStore for MemoryConfigStore {
	async fn get(&self, server_id: u64) -> BotResult<Configuration> {
		Ok(match self.rows.lock().unwrap().get(&server_id) {
			Some(model) => Configuration::from_model(model.clone()),
			None => Configuration::defaults(server_id),
		})
	}

	async fn save(&self, config: &mut Configuration) -> BotResult<()> {
		let model = config.to_model();
		self.rows.lock().unwrap().insert(config.server_id, model.clone());
		config.loaded = Some(model);
		Ok(())
	}
}

#[derive(Default)]
pub struct MemoryFormStore {
	rows: Mutex<Vec<entity::Form>>,
}

#[async_trait]
impl FormStore for MemoryFormStore {
	async fn get(&self, server_id: u64, hid: &str) -> BotResult<Option<Form>> {
		let hid = hid.to_lowercase();
		let rows = self.rows.lock().unwrap();
		Ok(rows
			.iter()
			.find(|row| row.server_id == server_id && row.hid == hid)
			.cloned()
			.map(Form::from_model))
	}

	async fn get_all(&self, server_id: u64) -> BotResult<Vec<Form>> {
		let rows = self.rows.lock().unwrap();
		Ok(rows
			.iter()
			.filter(|row| row.server_id == server_id)
			.cloned()
			.map(Form::from_model)
			.collect())
	}

	async fn create(&self, mut form: Form) -> BotResult<Form> {
		let mut rows = self.rows.lock().unwrap();
		if form.hid.is_empty() {
			form.hid = generate_hid(|candidate| {
				rows.iter().any(|row| row.server_id == form.server_id && row.hid == candidate)
			});
		}

		let mut model = form.to_model();
		model.id = rows.iter().map(|row| row.id).max().unwrap_or(0) + 1;
		rows.push(model.clone());
		Ok(Form::from_model(model))
	}

	async fn save(&self, form: &mut Form) -> BotResult<()> {
		let model = form.to_model();
		let mut rows = self.rows.lock().unwrap();
		let Some(row) = rows.iter_mut().find(|row| Some(row.id) == form.id) else {
			return Err(BotError::not_found("Form"));
		};
		*row = model.clone();
		form.loaded = Some(model);
		Ok(())
	}

	async fn delete(&self, form: &Form) -> BotResult<Vec<entity::FormPost>> {
		self.rows.lock().unwrap().retain(|row| Some(row.id) != form.id);
		Ok(vec![])
	}
}

#[derive(Default)]
pub struct MemoryResponseStore {
	rows: Mutex<Vec<entity::Response>>,
	failing_deletes: AtomicUsize,
}

impl MemoryResponseStore {
	/// Makes the next `count` deletes fail with a database error.
	pub fn fail_next_deletes(&self, count: usize) {
		self.failing_deletes.store(count, Ordering::SeqCst);
	}

	pub fn len(&self) -> usize {
		self.rows.lock().unwrap().len()
	}
}

fn is_active(row: &entity::Response) -> bool {
	matches!(row.state, ResponseState::Open | ResponseState::Submitted)
}

#[async_trait]
impl ResponseStore for MemoryResponseStore {
	async fn get(&self, id: u64) -> BotResult<Option<Response>> {
		let rows = self.rows.lock().unwrap();
		Ok(rows.iter().find(|row| row.id == id).cloned().map(Response::from_model))
	}

	async fn get_open_by_channel(&self, channel_id: u64) -> BotResult<Option<Response>> {
		let rows = self.rows.lock().unwrap();
		Ok(rows
			.iter()
			.filter(|row| row.channel_id == channel_id && row.state == ResponseState::Open)
			.max_by_key(|row| row.created_at)
			.cloned()
			.map(Response::from_model))
	}

	async fn find_active(&self, server_id: u64, user_id: u64, form_hid: &str) -> BotResult<Option<Response>> {
		let rows = self.rows.lock().unwrap();
		Ok(rows
			.iter()
			.find(|row| row.server_id == server_id && row.user_id == user_id && row.form_hid == form_hid && is_active(row))
			.cloned()
			.map(Response::from_model))
	}

	async fn find_all_active_by_user(&self, server_id: u64, user_id: u64) -> BotResult<Vec<Response>> {
		let rows = self.rows.lock().unwrap();
		Ok(rows
			.iter()
			.filter(|row| row.server_id == server_id && row.user_id == user_id && is_active(row))
			.cloned()
			.map(Response::from_model)
			.collect())
	}

	async fn create(&self, response: Response) -> BotResult<Response> {
		let mut rows = self.rows.lock().unwrap();
		let mut model = response.to_model();
		model.id = rows.iter().map(|row| row.id).max().unwrap_or(0) + 1;
		rows.push(model.clone());
		Ok(Response::from_model(model))
	}

	async fn save(&self, response: &mut Response) -> BotResult<()> {
		let model = response.to_model();
		let mut rows = self.rows.lock().unwrap();
		let Some(row) = rows.iter_mut().find(|row| Some(row.id) == response.id) else {
			return Err(BotError::not_found("Response"));
		};
		*row = model;
		Ok(())
	}

	async fn delete(&self, id: u64) -> BotResult<bool> {
		let pending = self.failing_deletes.load(Ordering::SeqCst);
		if pending > 0 {
			self.failing_deletes.store(pending - 1, Ordering::SeqCst);
			return Err(BotError::Persistence(DbErr::Custom("connection reset".into())));
		}

		let mut rows = self.rows.lock().unwrap();
		let before = rows.len();
		rows.retain(|row| row.id != id);
		Ok(rows.len() < before)
	}
}

#[derive(Default)]
pub struct MemoryFormPostStore {
	rows: Mutex<Vec<entity::FormPost>>,
}

#[async_trait]
impl FormPostStore for MemoryFormPostStore {
	async fn get_by_form(&self, server_id: u64, form_hid: &str) -> BotResult<Vec<entity::FormPost>> {
		let rows = self.rows.lock().unwrap();
		Ok(rows
			.iter()
			.filter(|row| row.server_id == server_id && row.form_hid == form_hid)
			.cloned()
			.collect())
	}

	async fn create(&self, mut post: entity::FormPost) -> BotResult<entity::FormPost> {
		let mut rows = self.rows.lock().unwrap();
		post.id = rows.iter().map(|row| row.id).max().unwrap_or(0) + 1;
		rows.push(post.clone());
		Ok(post)
	}

	async fn delete_by_message(&self, message_id: u64) -> BotResult<()> {
		self.rows.lock().unwrap().retain(|row| row.message_id != message_id);
		Ok(())
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
	AddRole { user: u64, role: u64 },
	RemoveRole { user: u64, role: u64 },
	SetTags { thread: u64, tags: Vec<u64> },
	Ticket(TicketRequest),
}

#[derive(Default)]
struct GatewayState {
	standing: Option<BotStanding>,
	roles: Vec<RoleInfo>,
	threads: HashMap<u64, Vec<u64>>,
	calls: Vec<GatewayCall>,
}

/// Guild view with a fixed bot standing, role list and thread set. Records every mutation.
#[derive(Default)]
pub struct ScriptedGateway {
	state: Mutex<GatewayState>,
}

impl ScriptedGateway {
	pub fn set_standing(&self, manage_roles: bool, highest_position: u16) {
		self.state.lock().unwrap().standing = Some(BotStanding { manage_roles, highest_position });
	}

	pub fn set_roles(&self, roles: Vec<RoleInfo>) {
		self.state.lock().unwrap().roles = roles;
	}

	pub fn set_thread(&self, thread_id: u64, tags: Vec<u64>) {
		self.state.lock().unwrap().threads.insert(thread_id, tags);
	}

	pub fn calls(&self) -> Vec<GatewayCall> {
		self.state.lock().unwrap().calls.clone()
	}
}

#[async_trait]
impl GuildGateway for ScriptedGateway {
	async fn bot_standing(&self, _: u64) -> Result<BotStanding, ActionError> {
		Ok(self.state.lock().unwrap().standing.unwrap_or(BotStanding {
			manage_roles: false,
			highest_position: 0,
		}))
	}

	async fn guild_roles(&self, _: u64) -> Result<Vec<RoleInfo>, ActionError> {
		Ok(self.state.lock().unwrap().roles.clone())
	}

	async fn add_member_role(&self, _: u64, user: u64, role: u64) -> Result<(), ActionError> {
		self.state.lock().unwrap().calls.push(GatewayCall::AddRole { user, role });
		Ok(())
	}

	async fn remove_member_role(&self, _: u64, user: u64, role: u64) -> Result<(), ActionError> {
		self.state.lock().unwrap().calls.push(GatewayCall::RemoveRole { user, role });
		Ok(())
	}

	async fn thread_tags(&self, thread_id: u64) -> Result<Option<Vec<u64>>, ActionError> {
		Ok(self.state.lock().unwrap().threads.get(&thread_id).cloned())
	}

	async fn set_thread_tags(&self, thread: u64, tags: Vec<u64>) -> Result<(), ActionError> {
		let mut state = self.state.lock().unwrap();
		state.threads.insert(thread, tags.clone());
		state.calls.push(GatewayCall::SetTags { thread, tags });
		Ok(())
	}

	async fn create_ticket(&self, request: TicketRequest) -> Result<u64, ActionError> {
		let mut state = self.state.lock().unwrap();
		state.calls.push(GatewayCall::Ticket(request));
		Ok(5000 + state.calls.len() as u64)
	}

	async fn channel_info(&self, _: u64) -> Option<ChannelInfo> {
		None
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessengerCall {
	Question { channel: u64, index: usize },
	Posted { response: u64 },
	Prompt { message: u64, banner: Banner },
	Post { message: u64, banner: Banner },
	Notify { channel: u64, text: String },
}

#[derive(Default)]
struct MessengerState {
	dm_closed: bool,
	post: Option<PostedResponse>,
	calls: Vec<MessengerCall>,
	next_message: u64,
}

/// DM and post channel stand-in. Closing the DM makes every DM operation fail as if the channel were gone.
#[derive(Default)]
pub struct ScriptedMessenger {
	state: Mutex<MessengerState>,
}

impl ScriptedMessenger {
	pub fn close_dm(&self) {
		self.state.lock().unwrap().dm_closed = true;
	}

	/// Where `post_response` claims the response landed.
	pub fn set_post(&self, post: PostedResponse) {
		self.state.lock().unwrap().post = Some(post);
	}

	pub fn calls(&self) -> Vec<MessengerCall> {
		self.state.lock().unwrap().calls.clone()
	}

	fn dm(&self) -> BotResult<std::sync::MutexGuard<'_, MessengerState>> {
		let state = self.state.lock().unwrap();
		if state.dm_closed {
			return Err(BotError::not_found("Channel"));
		}
		Ok(state)
	}
}

#[async_trait]
impl Messenger for ScriptedMessenger {
	async fn open_dm(&self, user_id: u64) -> BotResult<u64> {
		self.dm()?;
		Ok(user_id + 1_000_000)
	}

	async fn send_question(&self, channel: u64, _: &Form, index: usize) -> BotResult<u64> {
		let mut state = self.dm()?;
		state.calls.push(MessengerCall::Question { channel, index });
		state.next_message += 1;
		Ok(state.next_message)
	}

	async fn post_response(&self, _: &Form, response: &Response, _: &Configuration) -> BotResult<Option<PostedResponse>> {
		let mut state = self.state.lock().unwrap();
		state.calls.push(MessengerCall::Posted {
			response: response.id.unwrap_or_default(),
		});
		Ok(state.post)
	}

	async fn mark_prompt(&self, _: u64, message: u64, banner: &Banner) -> BotResult<()> {
		let mut state = self.dm()?;
		state.calls.push(MessengerCall::Prompt { message, banner: banner.clone() });
		Ok(())
	}

	async fn mark_post(&self, _: u64, message: u64, banner: &Banner) -> BotResult<()> {
		let mut state = self.state.lock().unwrap();
		state.calls.push(MessengerCall::Post { message, banner: banner.clone() });
		Ok(())
	}

	async fn notify_user(&self, channel: u64, text: &str) -> BotResult<()> {
		let mut state = self.dm()?;
		state.calls.push(MessengerCall::Notify { channel, text: text.to_string() });
		Ok(())
	}
}

/// Answers setup prompts from a queue. An empty queue behaves like a timed out prompt.
#[derive(Default)]
pub struct ScriptedPrompter {
	answers: Mutex<VecDeque<Result<Vec<String>, String>>>,
	bounds: Mutex<Vec<(usize, usize)>>,
}

impl ScriptedPrompter {
	pub fn answer(&self, answer: Result<Vec<String>, String>) {
		self.answers.lock().unwrap().push_back(answer);
	}

	/// The `(min, max)` selection limits of every prompt shown so far.
	pub fn bounds(&self) -> Vec<(usize, usize)> {
		self.bounds.lock().unwrap().clone()
	}

	fn next(&self) -> Result<Vec<String>, String> {
		self.answers
			.lock()
			.unwrap()
			.pop_front()
			.unwrap_or_else(|| Err("Timed out waiting for a selection.".to_string()))
	}
}

#[async_trait]
impl SetupPrompter for ScriptedPrompter {
	async fn select(&self, _: &str, _: Vec<Choice>, min: usize, max: usize) -> Result<Vec<String>, String> {
		self.bounds.lock().unwrap().push((min, max));
		self.next()
	}

	async fn select_roles(&self, _: &str, min: usize, max: usize) -> Result<Vec<u64>, String> {
		self.bounds.lock().unwrap().push((min, max));
		Ok(self.next()?.iter().filter_map(|id| id.parse().ok()).collect())
	}
}
