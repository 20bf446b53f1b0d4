//! Line-based patching of existing text files
//!
//! A file is loaded into a [`LineBuffer`], edited in memory and written
//! back whole. Each line keeps its own terminator, so a buffer that was not
//! edited serializes to exactly the bytes it was read from.
//!
//! Lists such as `INSTALLED_APPS` are located textually: the first line
//! containing the marker starts the region, and the first line at or after
//! it whose trimmed form ends with the closing character ends it. Nested
//! brackets, comments and several blocks sharing a marker are not handled.

use std::fmt;
use std::io::Write;
use std::path::Path;

use crate::{CommandError, CommandResult};

/// Result of [`LineBuffer::upsert_key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
	/// The line at this index was overwritten.
	Replaced(usize),
	/// A new line was appended.
	Appended,
}

/// Result of [`LineBuffer::insert_list_entry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListInsert {
	/// The entry now sits at this index, right before the closing line.
	Inserted(usize),
	/// The exact entry line already exists inside the region.
	AlreadyPresent,
	/// No line contains the marker.
	MarkerNotFound,
	/// No closing line follows the marker.
	ClosingNotFound,
	/// The list opens and closes on the marker line itself.
	InlineList,
}

impl ListInsert {
	/// Whether the list could be located at all.
	pub fn is_located(self) -> bool {
		matches!(self, Self::Inserted(_) | Self::AlreadyPresent)
	}
}

/// The `[start, end)` range of a located list.
///
/// `start` is the marker line and `end` the closing line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListRegion {
	pub start: usize,
	pub end: usize,
}

/// A text file as an ordered sequence of lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
	lines: Vec<String>,
}

impl LineBuffer {
	/// Split `content` into lines, keeping every line terminator.
	pub fn parse(content: &str) -> Self {
		Self {
			lines: content.split_inclusive('\n').map(str::to_string).collect(),
		}
	}

	pub fn read(path: &Path) -> CommandResult<Self> {
		let content = std::fs::read_to_string(path).map_err(|e| CommandError::io(path, e))?;
		Ok(Self::parse(&content))
	}

	/// Write the buffer to `path`.
	///
	/// Existing files are replaced through a temporary file in the same
	/// directory followed by a rename, keeping their permissions. A failure
	/// during the rename itself is not rolled back.
	pub fn write(&self, path: &Path) -> CommandResult<()> {
		let content = self.to_string();
		let original_perms = std::fs::metadata(path).ok().map(|m| m.permissions());

		let Some(perms) = original_perms else {
			return std::fs::write(path, content).map_err(|e| CommandError::io(path, e));
		};

		let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
		let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| CommandError::io(path, e))?;
		tmp.write_all(content.as_bytes())
			.map_err(|e| CommandError::io(path, e))?;
		tmp.persist(path).map_err(|e| CommandError::io(path, e.error))?;
		std::fs::set_permissions(path, perms).map_err(|e| CommandError::io(path, e))?;

		Ok(())
	}

	pub fn lines(&self) -> &[String] {
		&self.lines
	}

	pub fn len(&self) -> usize {
		self.lines.len()
	}

	pub fn is_empty(&self) -> bool {
		self.lines.is_empty()
	}

	/// Insert `marker` as the first line unless a line already equals it.
	///
	/// Lines are compared after stripping their terminator. Returns `true`
	/// if the buffer changed.
	pub fn prepend_if_absent(&mut self, marker: &str) -> bool {
		if self.lines.iter().any(|line| strip_terminator(line) == marker) {
			return false;
		}
		self.lines.insert(0, format!("{}\n", marker));
		true
	}

	/// Set `key='value'` on the first line starting with `key`, or append it.
	///
	/// Later lines sharing the prefix are left untouched.
	pub fn upsert_key(&mut self, key: &str, value: &str) -> Upsert {
		let entry = format!("{}='{}'\n", key, value);

		if let Some(index) = self.lines.iter().position(|line| line.starts_with(key)) {
			self.lines[index] = entry;
			return Upsert::Replaced(index);
		}

		self.terminate_last_line();
		self.lines.push(entry);
		Upsert::Appended
	}

	/// Append `text` after the last line.
	///
	/// An unterminated last line gets a newline first so the two never merge.
	pub fn append(&mut self, text: &str) {
		self.terminate_last_line();
		self.lines.extend(text.split_inclusive('\n').map(str::to_string));
	}

	fn terminate_last_line(&mut self) {
		if let Some(last) = self.lines.last_mut()
			&& !last.ends_with('\n')
		{
			last.push('\n');
		}
	}

	/// Locate the list that starts on the first line containing `marker`.
	pub fn find_list_region(&self, marker: &str, closing: char) -> Result<ListRegion, ListInsert> {
		let start = self
			.lines
			.iter()
			.position(|line| line.contains(marker))
			.ok_or(ListInsert::MarkerNotFound)?;

		let end = self.lines[start..]
			.iter()
			.position(|line| line.trim().ends_with(closing))
			.map(|offset| start + offset)
			.ok_or(ListInsert::ClosingNotFound)?;

		if end == start {
			return Err(ListInsert::InlineList);
		}

		Ok(ListRegion { start, end })
	}

	/// Insert the full line `entry` before the closing line of the list.
	///
	/// Lines are compared without their terminators. The inserted line takes
	/// the closing line's terminator, so CRLF files stay CRLF.
	pub fn insert_list_entry(&mut self, marker: &str, entry: &str, closing: char) -> ListInsert {
		let region = match self.find_list_region(marker, closing) {
			Ok(region) => region,
			Err(outcome) => return outcome,
		};

		let entry = strip_terminator(entry);
		if self.lines[region.start..region.end]
			.iter()
			.any(|line| strip_terminator(line) == entry)
		{
			return ListInsert::AlreadyPresent;
		}

		let closing_line = &self.lines[region.end];
		let terminator = if closing_line.ends_with("\r\n") { "\r\n" } else { "\n" };
		self.lines.insert(region.end, format!("{}{}", entry, terminator));
		ListInsert::Inserted(region.end)
	}

	/// Remove list items equal to `item` inside the located region.
	///
	/// An item line matches when its trimmed form is `'item'` or `"item"`,
	/// with or without a trailing comma. Returns the number of removed lines;
	/// `Err` carries the lookup failure when the list cannot be found.
	pub fn remove_list_entry(
		&mut self,
		marker: &str,
		item: &str,
		closing: char,
	) -> Result<usize, ListInsert> {
		let region = self.find_list_region(marker, closing)?;
		let single = format!("'{}'", item);
		let double = format!("\"{}\"", item);

		let before = self.lines.len();
		let mut index = 0;
		self.lines.retain(|line| {
			let inside = index > region.start && index < region.end;
			index += 1;
			if !inside {
				return true;
			}
			let value = line.trim();
			let value = value.strip_suffix(',').unwrap_or(value).trim_end();
			value != single && value != double
		});

		Ok(before - self.lines.len())
	}

	/// Drop every line containing `needle`, anywhere in the file.
	///
	/// This is not scoped to any list: unrelated lines that merely mention
	/// `needle` (comments, other settings) are removed too.
	pub fn remove_lines_containing(&mut self, needle: &str) -> usize {
		let before = self.lines.len();
		self.lines.retain(|line| !line.contains(needle));
		before - self.lines.len()
	}
}

impl fmt::Display for LineBuffer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for line in &self.lines {
			f.write_str(line)?;
		}
		Ok(())
	}
}

fn strip_terminator(line: &str) -> &str {
	line.trim_end_matches(['\n', '\r'])
}

/// Read `path`, apply `edit`, and write the file back only if it changed.
///
/// Returns whatever `edit` returned. When `edit` leaves the buffer as it
/// was, the file is not touched.
pub fn patch_file<T>(path: &Path, edit: impl FnOnce(&mut LineBuffer) -> T) -> CommandResult<T> {
	let original = LineBuffer::read(path)?;
	let mut buffer = original.clone();
	let outcome = edit(&mut buffer);

	if buffer != original {
		buffer.write(path)?;
		tracing::debug!(path = %path.display(), "patched file");
	} else {
		tracing::debug!(path = %path.display(), "file already up to date");
	}

	Ok(outcome)
}
