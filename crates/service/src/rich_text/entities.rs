//! HTML entity decoding

/// Double-encoded text (`&amp;amp;`) is decoded at most this many times
pub const MAX_DECODE_PASSES: usize = 3;

/// Longest entity body considered, excluding `&` and `;`
const MAX_ENTITY_LEN: usize = 10;

const NAMED_ENTITIES: &[(&str, char)] = &[
	("amp", '&'),
	("lt", '<'),
	("gt", '>'),
	("quot", '"'),
	("apos", '\''),
	("nbsp", ' '),
	("aacute", 'á'),
	("Aacute", 'Á'),
	("eacute", 'é'),
	("Eacute", 'É'),
	("iacute", 'í'),
	("Iacute", 'Í'),
	("oacute", 'ó'),
	("Oacute", 'Ó'),
	("uacute", 'ú'),
	("Uacute", 'Ú'),
	("agrave", 'à'),
	("Agrave", 'À'),
	("acirc", 'â'),
	("Acirc", 'Â'),
	("ecirc", 'ê'),
	("Ecirc", 'Ê'),
	("ocirc", 'ô'),
	("Ocirc", 'Ô'),
	("atilde", 'ã'),
	("Atilde", 'Ã'),
	("otilde", 'õ'),
	("Otilde", 'Õ'),
	("ccedil", 'ç'),
	("Ccedil", 'Ç'),
	("uuml", 'ü'),
	("Uuml", 'Ü'),
	("ordm", 'º'),
	("ordf", 'ª'),
	("deg", '°'),
	("sect", '§'),
	("ndash", '–'),
	("mdash", '—'),
	("hellip", '…'),
	("bull", '•'),
	("middot", '·'),
	("lsquo", '‘'),
	("rsquo", '’'),
	("ldquo", '“'),
	("rdquo", '”'),
	("euro", '€'),
	("copy", '©'),
	("reg", '®'),
	("trade", '™'),
];

/// Decode entities repeatedly until the text is stable or the pass cap is hit
pub fn decode_entities(input: &str) -> String {
	let mut current = input.to_string();
	for _ in 0..MAX_DECODE_PASSES {
		let next = decode_once(&current);
		if next == current {
			break;
		}
		current = next;
	}
	current
}

/// Single left-to-right decoding pass; unknown entities are kept verbatim
pub fn decode_once(input: &str) -> String {
	let mut out = String::with_capacity(input.len());
	let mut rest = input;

	while let Some(amp) = rest.find('&') {
		out.push_str(&rest[..amp]);
		let candidate = &rest[amp + 1..];

		let decoded = candidate
			.char_indices()
			.take(MAX_ENTITY_LEN + 1)
			.find(|(_, c)| *c == ';')
			.and_then(|(semi, _)| resolve(&candidate[..semi]).map(|c| (c, semi)));

		match decoded {
			Some((c, semi)) => {
				out.push(c);
				rest = &candidate[semi + 1..];
			},
			None => {
				out.push('&');
				rest = candidate;
			},
		}
	}

	out.push_str(rest);
	out
}

fn resolve(body: &str) -> Option<char> {
	if let Some(numeric) = body.strip_prefix('#') {
		let code = match numeric.strip_prefix(['x', 'X']) {
			Some(hex) => u32::from_str_radix(hex, 16).ok()?,
			None => numeric.parse::<u32>().ok()?,
		};
		return char::from_u32(code).filter(|c| *c != '\0');
	}

	NAMED_ENTITIES
		.iter()
		.find(|(name, _)| *name == body)
		.map(|(_, c)| *c)
}
