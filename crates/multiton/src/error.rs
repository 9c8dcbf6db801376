//! Registry error taxonomy.

/// Errors raised while populating or reading a [`Registry`](crate::Registry).
///
/// Every variant carries the label of the registry that raised it, so messages
/// read as `Label::NAME`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
	/// The registry was read from inside its own population routine.
	#[error("{registry} was accessed from inside its own population routine")]
	Configuration { registry: &'static str },

	/// The population routine panicked on an earlier access.
	#[error("{registry} population panicked; the registry is unusable")]
	Poisoned { registry: &'static str },

	/// A member name failed validation.
	#[error(
		"invalid member name {name:?} in {registry}: should only contain letters, numbers and underscores, and must not start with a number"
	)]
	InvalidName { registry: &'static str, name: String },

	/// Two registrations canonicalize to the same key.
	#[error("{registry}::{name} is already reserved")]
	DuplicateName { registry: &'static str, name: String },

	/// Explicit lookup miss.
	#[error("no such registry member: {registry}::{name}")]
	NotFound { registry: &'static str, name: String },

	/// Attribute-style lookup miss.
	#[error("unknown member {registry}::{name}")]
	UnknownMember { registry: &'static str, name: String },

	/// Attribute-style access was given arguments.
	#[error("{registry}::{name} expected exactly 0 arguments, {given} passed")]
	Arity {
		registry: &'static str,
		name: String,
		given: usize,
	},
}

impl RegistryError {
	/// Label of the registry that raised the error.
	pub fn registry(&self) -> &'static str {
		match self {
			Self::Configuration { registry }
			| Self::Poisoned { registry }
			| Self::InvalidName { registry, .. }
			| Self::DuplicateName { registry, .. }
			| Self::NotFound { registry, .. }
			| Self::UnknownMember { registry, .. }
			| Self::Arity { registry, .. } => *registry,
		}
	}

	/// Whether callers are expected to handle this error.
	///
	/// Non-recoverable kinds signal a defect in the calling code: the accessors
	/// that produce them panic rather than return.
	pub fn is_recoverable(&self) -> bool {
		match self {
			Self::InvalidName { .. } | Self::DuplicateName { .. } | Self::NotFound { .. } => true,
			Self::Configuration { .. }
			| Self::Poisoned { .. }
			| Self::UnknownMember { .. }
			| Self::Arity { .. } => false,
		}
	}
}
