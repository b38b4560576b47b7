mod access;
mod error;
mod key;
mod method;
mod path;
mod render;
mod resolve;
mod snapshot;
mod value;

/// Container read discipline.
pub use access::{AccessFault, AccessMode};
/// Error and result aliases.
pub use error::{Result, VarError};
/// Table keys and property-key mangling.
pub use key::{Key, MANGLE_MARKER, PROTECTED_OWNER, Unmangled, Visibility, mangle_private, mangle_protected, property_key, unmangle};
/// `Class::method` expression parser.
pub use method::ClassMethod;
/// Variable path parser types.
pub use path::{Opener, PathStep, Segment, Span, VarPath};
/// Flat and markup renderers with cycle tracking.
pub use render::{
	ELLIPSIS, FAULT_MARKER, MAX_FLOAT_PRECISION, RECURSION_MARKER, RenderOptions, Renderer, VisitSet, escape_attr, format_float, render_flat, render_markup,
};
/// Path resolution entry points and outcome types.
pub use resolve::{Leaf, Resolution, ResolveOptions, parse_variable, resolve};
/// Snapshot loading and compression detection.
pub use snapshot::{Compression, Snapshot, ZSTD_MAGIC, decode_bytes};
/// Runtime value model.
pub use value::{ArrayRef, DebugInfoFn, Object, ObjectRef, Resource, Table, Value};
