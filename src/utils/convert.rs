use chrono::{DateTime, Local, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serenity::all::{AttachmentId, CommandDataOption, User};

static ROLE_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"<@&(\d+)>|\b(\d{17,20})\b").expect("role id pattern"));

pub fn format_discord_username(user: &User) -> String {
	format!(
		"{}{}",
		user.name,
		match user.discriminator {
			None => String::new(),
			Some(n) => format!("#{:04}", n),
		}
	)
}

pub fn utc_to_local_format(time: &DateTime<Utc>) -> String {
	time.with_timezone(&Local).format("%Y/%m/%d %H:%M:%S").to_string()
}

fn find<'a>(args: &'a [CommandDataOption], name: &str) -> Option<&'a CommandDataOption> {
	args.iter().find(|option| option.name == name)
}

pub fn string_arg(args: &[CommandDataOption], name: &str) -> Option<String> {
	find(args, name)
		.and_then(|option| option.value.as_str())
		.map(|value| value.trim().to_string())
		.filter(|value| !value.is_empty())
}

pub fn integer_arg(args: &[CommandDataOption], name: &str) -> Option<i64> {
	find(args, name).and_then(|option| option.value.as_i64())
}

pub fn bool_arg(args: &[CommandDataOption], name: &str) -> Option<bool> {
	find(args, name).and_then(|option| option.value.as_bool())
}

pub fn channel_arg(args: &[CommandDataOption], name: &str) -> Option<u64> {
	find(args, name).and_then(|option| option.value.as_channel_id()).map(|id| id.get())
}

pub fn user_arg(args: &[CommandDataOption], name: &str) -> Option<u64> {
	find(args, name).and_then(|option| option.value.as_user_id()).map(|id| id.get())
}

pub fn attachment_arg(args: &[CommandDataOption], name: &str) -> Option<AttachmentId> {
	find(args, name).and_then(|option| option.value.as_attachment_id())
}

/// Role ids from mentions or raw snowflakes, in order, without duplicates.
pub fn parse_role_ids(text: &str) -> Vec<u64> {
	let mut ids: Vec<u64> = vec![];
	for capture in ROLE_ID.captures_iter(text) {
		let id = capture.get(1).or_else(|| capture.get(2)).and_then(|m| m.as_str().parse().ok());
		if let Some(id) = id {
			if !ids.contains(&id) {
				ids.push(id);
			}
		}
	}
	ids
}

/// 1-based comma separated positions, turned into 0-based indices.
pub fn parse_positions(text: &str) -> Result<Vec<usize>, String> {
	text.split(',')
		.map(str::trim)
		.filter(|part| !part.is_empty())
		.map(|part| match part.parse::<usize>() {
			Ok(position) if position > 0 => Ok(position - 1),
			_ => Err(format!("`{}` is not a valid option number.", part)),
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn role_ids_from_mentions_and_ids() {
		assert_eq!(
			parse_role_ids("<@&123456789012345678>, 223456789012345678 <@&123456789012345678>"),
			vec![123456789012345678, 223456789012345678]
		);
		assert!(parse_role_ids("no roles here 42").is_empty());
	}

	#[test]
	fn positions_are_one_based() {
		assert_eq!(parse_positions("3, 1,2").unwrap(), vec![2, 0, 1]);
		assert!(parse_positions("0").is_err());
		assert!(parse_positions("a").is_err());
	}
}
