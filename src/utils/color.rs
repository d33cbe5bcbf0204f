use serenity::model::colour::Color;

const ACCEPTED: u32 = 0x00B06B;
const DENIED: u32 = 0xFF4B00;
const PENDING: u32 = 0xF2E700;
const NORMAL: u32 = 0x1971FF;
const CANCELLED: u32 = 0xAA5555;

pub fn accepted_color() -> Color {
	Color::new(ACCEPTED)
}

pub fn denied_color() -> Color {
	Color::new(DENIED)
}

pub fn pending_color() -> Color {
	Color::new(PENDING)
}

pub fn normal_color() -> Color {
	Color::new(NORMAL)
}

pub fn cancelled_color() -> Color {
	Color::new(CANCELLED)
}

/// Parses `#rrggbb` or `rrggbb`.
pub fn from_hex(value: &str) -> Option<Color> {
	let hex = value.trim().trim_start_matches('#');
	if hex.len() != 6 {
		return None;
	}
	u32::from_str_radix(hex, 16).ok().map(Color::new)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn hex_colors() {
		assert_eq!(from_hex("#ee8833"), Some(Color::new(0xEE8833)));
		assert_eq!(from_hex("55aa55"), Some(Color::new(0x55AA55)));
		assert_eq!(from_hex("blue"), None);
	}
}
