//! Minimal HTML fragment tokenizer
//!
//! Splits semi-trusted markup into text runs, start tags, end tags and
//! comments. A `<` that does not open a well-formed tag or comment is kept as
//! text, so malformed input degrades to plain text instead of being dropped.

/// One lexical unit of a fragment, borrowing from the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
	Text(&'a str),
	StartTag { name: String, self_closing: bool },
	EndTag { name: String },
	Comment(&'a str),
}

impl Token<'_> {
	pub fn is_start(&self, tag: &str) -> bool {
		matches!(self, Token::StartTag { name, .. } if name == tag)
	}

	pub fn is_end(&self, tag: &str) -> bool {
		matches!(self, Token::EndTag { name } if name == tag)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
	Text,
	TagOpen,
	Done,
}

/// Streaming tokenizer over a fragment
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
	input: &'a str,
	pos: usize,
	state: State,
}

impl<'a> Tokenizer<'a> {
	pub fn new(input: &'a str) -> Self {
		Self {
			input,
			pos: 0,
			state: State::Text,
		}
	}

	fn rest(&self) -> &'a str {
		&self.input[self.pos..]
	}

	/// Consume text up to the next `<` that can open markup
	fn text_run(&mut self) -> Option<Token<'a>> {
		let rest = self.rest();
		if rest.is_empty() {
			self.state = State::Done;
			return None;
		}

		let mut search_from = 0;
		while let Some(offset) = rest[search_from..].find('<') {
			let at = search_from + offset;
			if opens_markup(&rest[at..]) {
				self.state = State::TagOpen;
				if at == 0 {
					return self.markup();
				}
				self.pos += at;
				return Some(Token::Text(&rest[..at]));
			}
			search_from = at + 1;
		}

		self.pos = self.input.len();
		self.state = State::Done;
		Some(Token::Text(rest))
	}

	/// Consume a comment or tag starting at `<`
	fn markup(&mut self) -> Option<Token<'a>> {
		let rest = self.rest();
		self.state = State::Text;

		if let Some(body) = rest.strip_prefix("<!--") {
			return match body.find("-->") {
				Some(end) => {
					self.pos += 4 + end + 3;
					Some(Token::Comment(&body[..end]))
				},
				None => self.unterminated(),
			};
		}

		let Some(end) = find_tag_end(rest) else {
			// Keep the bare `<` and resume scanning after it
			self.pos += 1;
			return Some(Token::Text(&rest[..1]));
		};
		let inner = &rest[1..end];
		self.pos += end + 1;

		if let Some(name) = inner.strip_prefix('/') {
			return Some(Token::EndTag {
				name: tag_name(name),
			});
		}
		// Doctype and processing instructions carry no content
		if inner.starts_with('!') || inner.starts_with('?') {
			return Some(Token::Comment(inner));
		}
		Some(Token::StartTag {
			name: tag_name(inner),
			self_closing: inner.trim_end().ends_with('/'),
		})
	}

	/// A comment that never closes is plain text through the end of input
	fn unterminated(&mut self) -> Option<Token<'a>> {
		let rest = self.rest();
		self.pos = self.input.len();
		self.state = State::Done;
		Some(Token::Text(rest))
	}
}

impl<'a> Iterator for Tokenizer<'a> {
	type Item = Token<'a>;

	fn next(&mut self) -> Option<Self::Item> {
		match self.state {
			State::Text => self.text_run(),
			State::TagOpen => self.markup(),
			State::Done => None,
		}
	}
}

/// Tokenize a whole fragment
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
	Tokenizer::new(input).collect()
}

fn opens_markup(at: &str) -> bool {
	let mut chars = at.chars().skip(1);
	match chars.next() {
		Some(c) if c.is_ascii_alphabetic() || c == '!' || c == '?' => true,
		Some('/') => matches!(chars.next(), Some(c) if c.is_ascii_alphabetic()),
		_ => false,
	}
}

/// Index of the `>` closing the tag at the start of `rest`, skipping quoted
/// attribute values
fn find_tag_end(rest: &str) -> Option<usize> {
	let mut quote: Option<char> = None;
	for (i, c) in rest.char_indices().skip(1) {
		match (quote, c) {
			(Some(q), c) if c == q => quote = None,
			(Some(_), _) => {},
			(None, '"') | (None, '\'') => quote = Some(c),
			(None, '>') => return Some(i),
			(None, '<') => return None,
			_ => {},
		}
	}
	None
}

fn tag_name(inner: &str) -> String {
	inner
		.chars()
		.take_while(|c| !c.is_whitespace() && *c != '/' && *c != '>')
		.collect::<String>()
		.to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn start(name: &str) -> Token<'static> {
		Token::StartTag {
			name: name.to_string(),
			self_closing: false,
		}
	}

	fn end(name: &str) -> Token<'static> {
		Token::EndTag {
			name: name.to_string(),
		}
	}

	#[test]
	fn test_basic_fragment() {
		assert_eq!(
			tokenize("<p class=\"x\">Olá <b>mundo</b></p>"),
			vec![
				start("p"),
				Token::Text("Olá "),
				start("b"),
				Token::Text("mundo"),
				end("b"),
				end("p"),
			]
		);
	}

	#[test]
	fn test_self_closing_and_case() {
		assert_eq!(
			tokenize("a<BR/>b<br >"),
			vec![
				Token::Text("a"),
				Token::StartTag {
					name: "br".to_string(),
					self_closing: true
				},
				Token::Text("b"),
				start("br"),
			]
		);
	}

	#[test]
	fn test_comments() {
		assert_eq!(
			tokenize("x<!-- hidden -->y"),
			vec![Token::Text("x"), Token::Comment(" hidden "), Token::Text("y")]
		);
	}

	#[test]
	fn test_stray_angle_brackets_are_text() {
		assert_eq!(tokenize("1 < 2 > 0"), vec![Token::Text("1 < 2 > 0")]);
		assert_eq!(tokenize("idade <18"), vec![Token::Text("idade <18")]);
		assert_eq!(
			tokenize("abc <b sem fim"),
			vec![Token::Text("abc "), Token::Text("<"), Token::Text("b sem fim")]
		);
		assert_eq!(
			tokenize("<a<b>c"),
			vec![Token::Text("<"), Token::Text("a"), start("b"), Token::Text("c")]
		);
		assert_eq!(tokenize("<!-- aberto"), vec![Token::Text("<!-- aberto")]);
	}

	#[test]
	fn test_quoted_gt_inside_attribute() {
		assert_eq!(
			tokenize("<a title=\"a>b\">link</a>"),
			vec![start("a"), Token::Text("link"), end("a")]
		);
	}

	#[test]
	fn test_no_markup_is_one_text_run() {
		let input = "Carência de 30 dias\npara consultas";
		assert_eq!(tokenize(input), vec![Token::Text(input)]);
		assert!(tokenize("").is_empty());
	}
}
