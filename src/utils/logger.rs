use chrono::Local;
use log::LevelFilter;

use crate::configs::ConfigData;

pub fn init(config: &ConfigData, is_debug: bool) -> Result<(), fern::InitError> {
	let level = if is_debug { LevelFilter::Debug } else { config.get_log_level() };

	let mut dispatch = fern::Dispatch::new()
		.format(|out, message, record| {
			out.finish(format_args!(
				"{} [{}] {}: {}",
				Local::now().format("%Y-%m-%d %H:%M:%S"),
				record.level(),
				record.target(),
				message
			))
		})
		.level(level)
		.level_for("serenity", LevelFilter::Warn)
		.level_for("tracing", LevelFilter::Warn)
		.level_for("sqlx", LevelFilter::Warn)
		.level_for("sea_orm", LevelFilter::Warn)
		.chain(std::io::stdout());

	if let Some(path) = config.get_log_file() {
		dispatch = dispatch.chain(fern::log_file(path)?);
	}

	dispatch.apply()?;
	Ok(())
}
