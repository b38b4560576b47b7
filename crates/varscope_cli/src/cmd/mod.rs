/// Structured markup dump command.
pub mod dump;
/// Class-method expression check.
pub mod method;
/// Path resolution and flat print command.
pub mod print;
/// Root variable listing command.
pub mod vars;

#[cfg(test)]
pub(crate) mod test_support;
pub(crate) mod util;
