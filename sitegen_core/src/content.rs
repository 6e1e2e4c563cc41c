use std::collections::BTreeMap;

use derive_more::Deref;
use derive_more::DerefMut;
use serde::Serialize;

use crate::SiteError;
use crate::SiteResult;

/// Opens a definition: `:def <name>` followed by the value on later lines.
pub const DEFINITION_START: &str = ":def ";
/// Closes the most recent definition.
pub const DEFINITION_END: &str = ":end";
/// A definition marker preceded by this character is literal text.
pub const ESCAPE: char = '\\';

/// A flat mapping of property names to their string values.
///
/// Maps are merged explicitly with [`Properties::merge`]; the map being
/// merged in wins on conflicting names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deref, DerefMut)]
#[serde(transparent)]
pub struct Properties(BTreeMap<String, String>);

impl Properties {
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert every entry of `other`, overwriting existing names.
	pub fn merge(&mut self, other: &Properties) {
		self.extend(other.iter().map(|(k, v)| (k.clone(), v.clone())));
	}

	/// Returns a copy of `self` with `other` merged on top.
	pub fn merged_with(&self, other: &Properties) -> Self {
		let mut merged = self.clone();
		merged.merge(other);
		merged
	}

	/// Look up a property value by name.
	pub fn value(&self, name: &str) -> Option<&str> {
		self.0.get(name).map(String::as_str)
	}
}

impl From<BTreeMap<String, String>> for Properties {
	fn from(value: BTreeMap<String, String>) -> Self {
		Self(value)
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
	fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
		Self(
			iter.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		)
	}
}

/// Extract the `:def <name> ... :end` blocks of a content file.
///
/// ```text
/// :def title
/// Hello world
/// :end
/// ```
///
/// The name is the rest of the marker line; the value is everything up to
/// the next `:end`, trimmed. Text outside definitions is ignored. A repeated
/// name keeps the later value.
pub fn parse_content(content: &str) -> SiteResult<Properties> {
	let mut props = Properties::new();
	let mut cursor = 0;

	while let Some(found) = content[cursor..].find(DEFINITION_START) {
		let start = cursor + found;
		let name_start = start + DEFINITION_START.len();

		if content[..start].ends_with(ESCAPE) {
			cursor = name_start;
			continue;
		}

		let Some(line_len) = content[name_start..].find('\n') else {
			return Err(SiteError::UnterminatedDefinition(
				content[name_start..].trim().to_string(),
			));
		};
		let name = content[name_start..name_start + line_len].trim().to_string();
		let value_start = name_start + line_len + 1;

		let Some(value_len) = content[value_start..].find(DEFINITION_END) else {
			return Err(SiteError::UnterminatedDefinition(name));
		};
		let value = content[value_start..value_start + value_len].trim();

		tracing::trace!(name = %name, "parsed content definition");
		props.insert(name, value.to_string());
		cursor = value_start + value_len + DEFINITION_END.len();
	}

	Ok(props)
}
