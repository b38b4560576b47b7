use crate::var::{Result, VarError};

/// Byte range into the source path text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
	/// Inclusive start offset.
	pub start: usize,
	/// Exclusive end offset.
	pub end: usize,
}

impl Span {
	/// Whether the range covers no bytes.
	pub fn is_empty(self) -> bool {
		self.start == self.end
	}
}

/// Syntax that introduced a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opener {
	/// Leading `$` of the root variable.
	Dollar,
	/// `[` ... `]` index brackets.
	Bracket,
	/// `->` property arrow.
	Arrow,
}

impl Opener {
	/// Text written before a key in synthesized paths.
	pub fn prefix(self) -> &'static str {
		match self {
			Self::Dollar => "$",
			Self::Bracket => "[",
			Self::Arrow => "->",
		}
	}

	/// Text written after a key in synthesized paths.
	pub fn suffix(self) -> &'static str {
		match self {
			Self::Bracket => "]",
			Self::Dollar | Self::Arrow => "",
		}
	}
}

/// Navigation performed by one segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStep {
	/// Root variable name.
	Root,
	/// Named or numeric index from `[key]`.
	Index,
	/// Property name from `->name`.
	Property,
	/// Every entry at this level, from `[]` or a trailing `->`.
	Wildcard,
}

/// One parsed segment with its source offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
	/// Navigation kind.
	pub step: PathStep,
	/// Opening syntax.
	pub opener: Opener,
	/// Key text between opener and closer.
	pub literal: Span,
	/// Whole segment including opener and closer.
	pub source: Span,
}

/// Parsed variable path expression such as `$list[0]->name`.
#[derive(Debug, Clone)]
pub struct VarPath {
	source: Box<str>,
	segments: Vec<Segment>,
}

impl VarPath {
	/// Parse `$root` followed by `[index]`, `[]`, and `->property` segments.
	pub fn parse(input: &str) -> Result<Self> {
		let malformed = || VarError::MalformedInput { path: input.to_owned() };

		let bytes = input.as_bytes();
		if bytes.len() < 2 || bytes[0] != b'$' {
			return Err(malformed());
		}

		let mut segments = Vec::new();
		let mut idx = scan_name(bytes, 1);
		if idx == 1 {
			return Err(malformed());
		}
		segments.push(Segment {
			step: PathStep::Root,
			opener: Opener::Dollar,
			literal: Span { start: 1, end: idx },
			source: Span { start: 0, end: idx },
		});

		while idx < bytes.len() {
			let open = idx;
			if bytes[idx] == b'[' {
				idx += 1;
				let literal_start = idx;
				while idx < bytes.len() && bytes[idx] != b']' {
					if bytes[idx] == b'[' {
						return Err(malformed());
					}
					idx += 1;
				}
				if idx >= bytes.len() {
					return Err(malformed());
				}

				let literal = Span {
					start: literal_start,
					end: idx,
				};
				idx += 1;
				if idx < bytes.len() && bytes[idx] != b'[' && !is_arrow(bytes, idx) {
					return Err(malformed());
				}

				segments.push(Segment {
					step: if literal.is_empty() { PathStep::Wildcard } else { PathStep::Index },
					opener: Opener::Bracket,
					literal,
					source: Span { start: open, end: idx },
				});
			} else if is_arrow(bytes, idx) {
				let literal_start = idx + 2;
				idx = scan_name(bytes, literal_start);
				let literal = Span {
					start: literal_start,
					end: idx,
				};

				segments.push(Segment {
					step: if literal.is_empty() { PathStep::Wildcard } else { PathStep::Property },
					opener: Opener::Arrow,
					literal,
					source: Span { start: open, end: idx },
				});
			} else {
				return Err(malformed());
			}
		}

		Ok(Self {
			source: input.into(),
			segments,
		})
	}

	/// Original expression text.
	pub fn as_str(&self) -> &str {
		&self.source
	}

	/// Ordered segments, root first.
	pub fn segments(&self) -> &[Segment] {
		&self.segments
	}

	/// Root variable name.
	pub fn root_name(&self) -> &str {
		self.literal(&self.segments[0])
	}

	/// Key text of a segment.
	pub fn literal(&self, segment: &Segment) -> &str {
		&self.source[segment.literal.start..segment.literal.end]
	}

	/// Source text of a segment including its opener and closer.
	pub fn text(&self, segment: &Segment) -> &str {
		&self.source[segment.source.start..segment.source.end]
	}
}

fn is_arrow(bytes: &[u8], idx: usize) -> bool {
	bytes.get(idx) == Some(&b'-') && bytes.get(idx + 1) == Some(&b'>')
}

fn scan_name(bytes: &[u8], mut idx: usize) -> usize {
	while idx < bytes.len() && bytes[idx] != b'[' && bytes[idx] != b']' && !is_arrow(bytes, idx) {
		idx += 1;
	}
	idx
}
