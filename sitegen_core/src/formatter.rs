use std::io::ErrorKind;
use std::io::Read;
use std::io::Write;

use crate::Properties;
use crate::SiteResult;
use crate::config::STREAM_BUFFER_SIZE;

/// Opens a placeholder: `&{name}`.
pub const PLACEHOLDER_OPEN: &[u8] = b"&{";
/// Closes a placeholder.
pub const PLACEHOLDER_CLOSE: u8 = b'}';

/// Result of formatting one chunk of a stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormattedChunk {
	/// Bytes that are final and can be written out.
	pub output: Vec<u8>,
	/// Trailing bytes starting at a placeholder opener that could not be
	/// resolved yet. They must be prepended to the next chunk.
	pub pending: Option<Vec<u8>>,
}

/// Replace every `&{name}` in `text` with its property value. Unknown names
/// and an unterminated opener are kept as literal text.
pub fn format_text(text: &str, props: &Properties) -> String {
	let mut output = Vec::with_capacity(text.len());
	substitute(text.as_bytes(), props, false, &mut output);

	// Substitution only splits the input at ASCII delimiters.
	String::from_utf8(output).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

/// Format one chunk of a stream.
///
/// `pending` is the held-back tail returned for the previous chunk. The
/// returned `pending` starts at the first placeholder that is still open at
/// the end of this chunk (an `&{` with no `}` after it, or a trailing `&`),
/// so feeding a text through in any split produces the same bytes as
/// [`format_text`] on the whole text.
///
/// A held-back opener has no `}` after it, so while the new chunk brings no
/// `}` either it is only appended to and never rescanned.
pub fn format_chunk(chunk: &[u8], pending: Option<Vec<u8>>, props: &Properties) -> FormattedChunk {
	let mut buffer = match pending {
		Some(mut pending) => {
			let still_open =
				pending.starts_with(PLACEHOLDER_OPEN) && !chunk.contains(&PLACEHOLDER_CLOSE);
			pending.extend_from_slice(chunk);

			if still_open {
				return FormattedChunk {
					output: vec![],
					pending: Some(pending),
				};
			}
			pending
		}
		None => chunk.to_vec(),
	};

	let mut output = Vec::with_capacity(buffer.len());
	let pending = substitute(&buffer, props, true, &mut output).map(|held| {
		buffer.drain(..held);
		buffer
	});

	FormattedChunk { output, pending }
}

/// Copy `reader` to `writer`, substituting placeholders as the text streams
/// through a fixed-size buffer.
///
/// An opener still unterminated when the reader is exhausted is flushed
/// as-is.
pub fn format_stream<R: Read, W: Write>(
	mut reader: R,
	mut writer: W,
	props: &Properties,
) -> SiteResult<()> {
	let mut buffer = vec![0; STREAM_BUFFER_SIZE];
	let mut pending: Option<Vec<u8>> = None;

	loop {
		let read = match reader.read(&mut buffer) {
			Ok(0) => break,
			Ok(read) => read,
			Err(e) if e.kind() == ErrorKind::Interrupted => continue,
			Err(e) => return Err(e.into()),
		};

		let chunk = format_chunk(&buffer[..read], pending.take(), props);
		writer.write_all(&chunk.output)?;
		pending = chunk.pending;
	}

	if let Some(rest) = pending {
		if rest.starts_with(PLACEHOLDER_OPEN) {
			tracing::warn!(
				held = rest.len(),
				"unterminated placeholder at end of stream, writing it unchanged"
			);
		}
		writer.write_all(&rest)?;
	}

	writer.flush()?;
	Ok(())
}

/// Single left-to-right substitution pass over `input`, appending to
/// `output`.
///
/// When `hold_back` is set, scanning stops at the first opener that cannot
/// be resolved within `input` and its offset is returned. Otherwise the
/// remainder is written literally and `None` is returned.
fn substitute(input: &[u8], props: &Properties, hold_back: bool, output: &mut Vec<u8>) -> Option<usize> {
	let mut cursor = 0;

	while let Some(found) = input[cursor..].iter().position(|&b| b == PLACEHOLDER_OPEN[0]) {
		let amp = cursor + found;
		output.extend_from_slice(&input[cursor..amp]);

		let Some(&next) = input.get(amp + 1) else {
			return finish_open(input, amp, hold_back, output);
		};
		if next != PLACEHOLDER_OPEN[1] {
			output.push(input[amp]);
			cursor = amp + 1;
			continue;
		}

		let name_start = amp + PLACEHOLDER_OPEN.len();
		let Some(name_len) = input[name_start..].iter().position(|&b| b == PLACEHOLDER_CLOSE) else {
			return finish_open(input, amp, hold_back, output);
		};
		let name = &input[name_start..name_start + name_len];

		match std::str::from_utf8(name).ok().and_then(|name| props.value(name)) {
			Some(value) => {
				output.extend_from_slice(value.as_bytes());
				cursor = name_start + name_len + 1;
			}
			None => {
				output.extend_from_slice(PLACEHOLDER_OPEN);
				cursor = name_start;
			}
		}
	}

	output.extend_from_slice(&input[cursor..]);
	None
}

fn finish_open(input: &[u8], open: usize, hold_back: bool, output: &mut Vec<u8>) -> Option<usize> {
	if hold_back {
		Some(open)
	} else {
		output.extend_from_slice(&input[open..]);
		None
	}
}
