use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use url::Url;

const MAX_TEXT_ANSWER: usize = 1024;
const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionKind {
	#[serde(rename = "att")]
	Attachment,
	#[serde(rename = "cb")]
	Checkbox,
	#[serde(rename = "dt")]
	Date,
	#[serde(rename = "img")]
	Image,
	#[serde(rename = "link")]
	Link,
	#[serde(rename = "mc")]
	MultipleChoice,
	#[serde(rename = "num")]
	Number,
	#[serde(rename = "text")]
	Text,
}

impl QuestionKind {
	pub fn from_code(code: &str) -> Option<QuestionKind> {
		match code.trim().to_ascii_lowercase().as_str() {
			"att" | "attachment" => Some(QuestionKind::Attachment),
			"cb" | "checkbox" => Some(QuestionKind::Checkbox),
			"dt" | "date" => Some(QuestionKind::Date),
			"img" | "image" => Some(QuestionKind::Image),
			"link" | "url" | "website" => Some(QuestionKind::Link),
			"mc" | "choice" => Some(QuestionKind::MultipleChoice),
			"num" | "number" => Some(QuestionKind::Number),
			"text" => Some(QuestionKind::Text),
			_ => None,
		}
	}

	pub fn code(&self) -> &'static str {
		match self {
			QuestionKind::Attachment => "att",
			QuestionKind::Checkbox => "cb",
			QuestionKind::Date => "dt",
			QuestionKind::Image => "img",
			QuestionKind::Link => "link",
			QuestionKind::MultipleChoice => "mc",
			QuestionKind::Number => "num",
			QuestionKind::Text => "text",
		}
	}

	/// Short hint shown under the question prompt.
	pub fn hint(&self) -> &'static str {
		match self {
			QuestionKind::Attachment => "Upload a file",
			QuestionKind::Checkbox => "Pick one or more choices, separated by commas",
			QuestionKind::Date => "Enter a date (YYYY-MM-DD)",
			QuestionKind::Image => "Upload an image",
			QuestionKind::Link => "Requires a valid URL link",
			QuestionKind::MultipleChoice => "Pick one choice",
			QuestionKind::Number => "Enter a number",
			QuestionKind::Text => "Type your answer",
		}
	}
}

fn default_required() -> bool {
	true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
	pub value: String,
	#[serde(rename = "type")]
	pub kind: QuestionKind,
	#[serde(default = "default_required")]
	pub required: bool,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub choices: Vec<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub required_domain: Option<String>,
}

impl Question {
	pub fn new(kind: QuestionKind, value: impl Into<String>) -> Self {
		Question {
			value: value.into(),
			kind,
			required: true,
			choices: vec![],
			required_domain: None,
		}
	}

	/// Validates raw input for this question, returning the text to store or a rejection message.
	pub fn validate(&self, raw: &str) -> Result<String, String> {
		let answer = raw.trim();
		if answer.is_empty() {
			return if self.required {
				Err("Invalid response! An answer is required.".to_string())
			} else {
				Ok(String::new())
			};
		}

		match self.kind {
			QuestionKind::Text => {
				if answer.chars().count() > MAX_TEXT_ANSWER {
					Err(format!("Invalid response! Answers must be {} characters or less.", MAX_TEXT_ANSWER))
				} else {
					Ok(answer.to_string())
				}
			},
			QuestionKind::Number => match answer.parse::<f64>() {
				Ok(n) if n.is_finite() => Ok(answer.to_string()),
				_ => Err("Invalid response! Please provide a number.".to_string()),
			},
			QuestionKind::Date => NaiveDate::parse_from_str(answer, "%Y-%m-%d")
				.or_else(|_| NaiveDate::parse_from_str(answer, "%Y/%m/%d"))
				.map(|date| date.format("%Y-%m-%d").to_string())
				.map_err(|_| "Invalid response! Please provide a date like 2024-01-31.".to_string()),
			QuestionKind::Link => self.validate_link(answer),
			QuestionKind::MultipleChoice => self
				.match_choice(answer)
				.map(str::to_string)
				.ok_or_else(|| format!("Invalid response! Please choose one of: {}", self.choices.join(", "))),
			QuestionKind::Checkbox => {
				let mut picked: Vec<&str> = vec![];
				for part in answer.split(',').map(str::trim).filter(|p| !p.is_empty()) {
					let Some(choice) = self.match_choice(part) else {
						return Err(format!("Invalid response! `{}` is not one of: {}", part, self.choices.join(", ")));
					};
					if !picked.contains(&choice) {
						picked.push(choice);
					}
				}
				if picked.is_empty() {
					Err("Invalid response! Please pick at least one choice.".to_string())
				} else {
					Ok(picked.join(", "))
				}
			},
			QuestionKind::Attachment => Url::parse(answer)
				.map(|_| answer.to_string())
				.map_err(|_| "Invalid response! Please upload a file.".to_string()),
			QuestionKind::Image => {
				let url = Url::parse(answer).map_err(|_| "Invalid response! Please upload an image.".to_string())?;
				let is_image = url
					.path()
					.rsplit('.')
					.next()
					.map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
					.unwrap_or(false);
				if is_image {
					Ok(answer.to_string())
				} else {
					Err("Invalid response! That file is not an image.".to_string())
				}
			},
		}
	}

	fn match_choice(&self, answer: &str) -> Option<&str> {
		if let Ok(index) = answer.parse::<usize>() {
			if index >= 1 && index <= self.choices.len() {
				return Some(self.choices[index - 1].as_str());
			}
		}

		self.choices
			.iter()
			.find(|choice| choice.eq_ignore_ascii_case(answer))
			.map(String::as_str)
	}

	fn validate_link(&self, answer: &str) -> Result<String, String> {
		let candidate = if answer.starts_with("http://") || answer.starts_with("https://") {
			answer.to_string()
		} else {
			format!("https://{}", answer)
		};

		let invalid = || match &self.required_domain {
			Some(domain) => format!(
				"Invalid response! Please provide a valid URL from {} (e.g., https://{}/something)",
				domain, domain
			),
			None => "Invalid response! Please provide a valid URL (e.g., https://example.com or example.com)".to_string(),
		};

		let url = Url::parse(&candidate).map_err(|_| invalid())?;
		let host = match url.host_str() {
			Some(host) if matches!(url.scheme(), "http" | "https") && host.contains('.') => host.to_ascii_lowercase(),
			_ => return Err(invalid()),
		};

		if let Some(domain) = &self.required_domain {
			let domain = domain.to_ascii_lowercase();
			if host != domain && !host.ends_with(&format!(".{}", domain)) {
				return Err(format!(
					"Invalid response! The URL must be from {} (e.g., https://{}/something)",
					domain, domain
				));
			}
		}

		Ok(candidate)
	}
}
