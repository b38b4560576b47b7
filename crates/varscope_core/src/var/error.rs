use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, VarError>;

/// Errors produced while parsing, resolving, and loading variable data.
#[derive(Debug, Error)]
pub enum VarError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Variable path expression violates the path grammar.
	#[error("malformed input: {path}")]
	MalformedInput {
		/// Original user-provided path string.
		path: String,
	},
	/// `Class::method` expression violates the method grammar.
	#[error("invalid class method: {input}")]
	InvalidClassMethod {
		/// Original user-provided expression.
		input: String,
	},
	/// Named or numeric key is absent at some segment.
	#[error("{path} is undefined")]
	Undefined {
		/// Concrete sub-path through the missing segment.
		path: String,
	},
	/// Path tried to index through a scalar or resource.
	#[error("{path} is neither an array nor an object")]
	NotIterable {
		/// Concrete sub-path naming the non-container value.
		path: String,
	},
	/// Guarded read of a container failed.
	#[error("could not read {path}, invalid data source")]
	AccessFault {
		/// Concrete sub-path whose container could not be read.
		path: String,
	},
	/// Resolution finished without any successful leaf and no other error.
	#[error("no value matched {path}")]
	NoMatch {
		/// Original path expression.
		path: String,
	},
	/// Leaf handler declined a resolved value.
	#[error("{path}: {message}")]
	Handler {
		/// Concrete path handed to the handler.
		path: String,
		/// Handler-provided reason.
		message: String,
	},
	/// Unknown leading snapshot magic.
	#[error("unsupported compression or not a snapshot (magic={magic:?})")]
	UnknownMagic {
		/// First up-to-4 bytes of the stream.
		magic: [u8; 4],
	},
	/// Decompression output exceeded configured safety limit.
	#[error("decompressed output exceeded limit {limit} bytes")]
	DecompressedTooLarge {
		/// Maximum allowed output bytes.
		limit: usize,
	},
	/// Snapshot document is not valid JSON.
	#[error("snapshot json: {0}")]
	SnapshotJson(#[from] serde_json::Error),
	/// Snapshot node has an unexpected shape.
	#[error("snapshot node at {at}: {reason}")]
	SnapshotShape {
		/// JSON-pointer-like location of the node.
		at: String,
		/// Human-readable problem description.
		reason: String,
	},
	/// `$ref` names an anchor that was never declared.
	#[error("snapshot reference to unknown anchor {name}")]
	UnknownAnchor {
		/// Referenced anchor name.
		name: String,
	},
	/// Two nodes declare the same anchor.
	#[error("snapshot anchor declared twice: {name}")]
	DuplicateAnchor {
		/// Duplicated anchor name.
		name: String,
	},
}

impl VarError {
	/// Concrete path carried by resolution errors.
	pub fn path(&self) -> Option<&str> {
		match self {
			Self::MalformedInput { path }
			| Self::Undefined { path }
			| Self::NotIterable { path }
			| Self::AccessFault { path }
			| Self::NoMatch { path }
			| Self::Handler { path, .. } => Some(path),
			_ => None,
		}
	}

	/// Stable lowercase label used in diagnostics output.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Io(_) => "io",
			Self::MalformedInput { .. } => "invalidinput",
			Self::InvalidClassMethod { .. } => "invalidmethod",
			Self::Undefined { .. } => "undefined",
			Self::NotIterable { .. } => "notiterable",
			Self::AccessFault { .. } => "signalsegv",
			Self::NoMatch { .. } => "nomatch",
			Self::Handler { .. } => "handler",
			Self::UnknownMagic { .. } | Self::DecompressedTooLarge { .. } => "snapshot",
			Self::SnapshotJson(_) | Self::SnapshotShape { .. } | Self::UnknownAnchor { .. } | Self::DuplicateAnchor { .. } => "snapshot",
		}
	}
}
