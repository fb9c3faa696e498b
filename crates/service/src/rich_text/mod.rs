//! Normalisation of free-text notes that may carry HTML
//!
//! Notes are decoded, then split into an optional embedded table and the
//! surrounding prose. Only the first balanced `<table>` span is extracted;
//! tables nested inside it contribute their text to the enclosing cell.

pub mod entities;
pub mod tokenizer;

pub use entities::{decode_entities, MAX_DECODE_PASSES};
pub use tokenizer::{tokenize, Token, Tokenizer};

/// Closing tags that end a line in stripped text
const BLOCK_TAGS: &[&str] = &[
	"p",
	"div",
	"li",
	"ul",
	"ol",
	"h1",
	"h2",
	"h3",
	"h4",
	"h5",
	"h6",
	"tr",
	"table",
	"blockquote",
	"section",
];

/// Normalised note content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RichText {
	pub headers: Vec<String>,
	pub rows: Vec<Vec<String>>,
	pub remaining_text: String,
}

impl RichText {
	pub fn has_table(&self) -> bool {
		!self.headers.is_empty() || !self.rows.is_empty()
	}

	/// Flatten back to plain text, table rows as ` | `-separated lines
	pub fn to_plain_text(&self) -> String {
		let mut lines: Vec<String> = Vec::new();
		if !self.remaining_text.is_empty() {
			lines.push(self.remaining_text.clone());
		}
		if !self.headers.is_empty() {
			lines.push(self.headers.join(" | "));
		}
		lines.extend(self.rows.iter().map(|row| row.join(" | ")));
		lines.join("\n")
	}
}

/// Decode entities and split a note into its table and prose
pub fn normalize(input: &str) -> RichText {
	let decoded = decode_entities(input);
	let tokens = tokenize(&decoded);

	match find_table_span(&tokens) {
		Some((start, end)) => {
			let (headers, rows) = parse_table(&tokens[start + 1..end]);
			let mut prose = strip_tokens(&tokens[..start]);
			prose.push('\n');
			prose.push_str(&strip_tokens(&tokens[end + 1..]));
			RichText {
				headers,
				rows,
				remaining_text: collapse_newlines(&prose).trim().to_string(),
			}
		},
		None => RichText {
			headers: Vec::new(),
			rows: Vec::new(),
			remaining_text: strip_tags(&decoded).trim().to_string(),
		},
	}
}

/// Remove markup, turning `<br>` and block closers into line breaks
///
/// Text without markup comes back unchanged, apart from runs of three or
/// more newlines, which are collapsed to two.
pub fn strip_tags(input: &str) -> String {
	collapse_newlines(&strip_tokens(&tokenize(input)))
}

fn strip_tokens(tokens: &[Token<'_>]) -> String {
	let mut out = String::new();
	for token in tokens {
		match token {
			Token::Text(text) => out.push_str(text),
			Token::StartTag { name, .. } if name == "br" => out.push('\n'),
			Token::EndTag { name } if BLOCK_TAGS.contains(&name.as_str()) => out.push('\n'),
			_ => {},
		}
	}
	out
}

/// Collapse every run of three or more newlines to exactly two
fn collapse_newlines(input: &str) -> String {
	let mut out = String::with_capacity(input.len());
	let mut run = 0;
	for c in input.chars() {
		if c == '\n' {
			run += 1;
			if run > 2 {
				continue;
			}
		} else {
			run = 0;
		}
		out.push(c);
	}
	out
}

/// Token indices of the first `<table>` and its matching `</table>`
fn find_table_span(tokens: &[Token<'_>]) -> Option<(usize, usize)> {
	let start = tokens.iter().position(|t| t.is_start("table"))?;
	let mut depth = 0usize;
	for (i, token) in tokens.iter().enumerate().skip(start) {
		if token.is_start("table") {
			depth += 1;
		} else if token.is_end("table") {
			depth -= 1;
			if depth == 0 {
				return Some((start, i));
			}
		}
	}
	None
}

#[derive(Default)]
struct TableBuilder {
	headers: Vec<String>,
	rows: Vec<Vec<String>>,
	row: Option<Row>,
	cell: Option<String>,
}

#[derive(Default)]
struct Row {
	cells: Vec<String>,
	has_header_cell: bool,
}

impl TableBuilder {
	fn open_row(&mut self) {
		self.close_row();
		self.row = Some(Row::default());
	}

	fn open_cell(&mut self, header: bool) {
		self.close_cell();
		let row = self.row.get_or_insert_with(Row::default);
		row.has_header_cell |= header;
		self.cell = Some(String::new());
	}

	fn close_cell(&mut self) {
		if let Some(cell) = self.cell.take() {
			let text = cell.split_whitespace().collect::<Vec<_>>().join(" ");
			self.row.get_or_insert_with(Row::default).cells.push(text);
		}
	}

	fn close_row(&mut self) {
		self.close_cell();
		let Some(row) = self.row.take() else {
			return;
		};
		if row.cells.is_empty() {
			return;
		}
		if row.has_header_cell && self.headers.is_empty() {
			self.headers = row.cells;
		} else {
			self.rows.push(row.cells);
		}
	}

	fn push_text(&mut self, text: &str) {
		if let Some(cell) = self.cell.as_mut() {
			cell.push_str(text);
		}
	}

	fn push_break(&mut self) {
		if let Some(cell) = self.cell.as_mut() {
			cell.push(' ');
		}
	}
}

/// Parse the tokens between `<table>` and `</table>` into header and body rows
fn parse_table(tokens: &[Token<'_>]) -> (Vec<String>, Vec<Vec<String>>) {
	let mut builder = TableBuilder::default();
	// Nested tables only contribute text to the current cell
	let mut nested = 0usize;

	for token in tokens {
		match token {
			Token::StartTag { name, .. } if name == "table" => {
				nested += 1;
				builder.push_break();
			},
			Token::EndTag { name } if name == "table" => {
				nested = nested.saturating_sub(1);
				builder.push_break();
			},
			Token::Text(text) => builder.push_text(text),
			Token::StartTag { name, .. } | Token::EndTag { name } if nested > 0 => {
				if name != "b" && name != "i" && name != "strong" && name != "em" {
					builder.push_break();
				}
			},
			Token::StartTag { name, .. } => match name.as_str() {
				"tr" => builder.open_row(),
				"td" => builder.open_cell(false),
				"th" => builder.open_cell(true),
				"br" | "p" | "div" | "li" => builder.push_break(),
				_ => {},
			},
			Token::EndTag { name } => match name.as_str() {
				"tr" => builder.close_row(),
				"td" | "th" => builder.close_cell(),
				"p" | "div" | "li" => builder.push_break(),
				_ => {},
			},
			Token::Comment(_) => {},
		}
	}
	builder.close_row();

	(builder.headers, builder.rows)
}
