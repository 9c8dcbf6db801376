//! Registration handle passed to population routines.

use std::sync::Arc;

use indexmap::map::Entry;
use tracing::trace;

use super::Members;
use crate::RegistryError;
use crate::name::{canonicalize, is_valid_name};

/// Collects members while a registry's population routine runs.
///
/// A `Registrar` only exists for the duration of the population routine and
/// is handed to it by `&mut`, so members cannot be added once the registry is
/// sealed. Code outside the crate cannot create one:
///
/// ```compile_fail
/// let mut registrar = multiton::Registrar::<u8>::new("X");
/// registrar.register("LATE", 1u8).unwrap();
/// ```
pub struct Registrar<T> {
	label: &'static str,
	members: Members<T>,
}

impl<T> Registrar<T> {
	pub(crate) fn new(label: &'static str) -> Self {
		Self {
			label,
			members: Members::default(),
		}
	}

	/// Registers `member` under the canonical form of `name`.
	///
	/// # Errors
	///
	/// - [`RegistryError::InvalidName`] if `name` is empty, starts with a digit,
	///   or contains anything besides ASCII letters, digits and underscores.
	/// - [`RegistryError::DuplicateName`] if a member with the same canonical
	///   name is already registered.
	pub fn register(&mut self, name: &str, member: impl Into<Arc<T>>) -> Result<(), RegistryError> {
		if !is_valid_name(name) {
			return Err(RegistryError::InvalidName {
				registry: self.label,
				name: name.to_owned(),
			});
		}

		match self.members.entry(name.to_ascii_uppercase().into_boxed_str()) {
			Entry::Occupied(existing) => Err(RegistryError::DuplicateName {
				registry: self.label,
				name: existing.key().to_string(),
			}),
			Entry::Vacant(slot) => {
				trace!(registry = self.label, member = %slot.key(), "registered member");
				slot.insert(member.into());
				Ok(())
			}
		}
	}

	/// Label of the registry being populated.
	pub fn label(&self) -> &'static str {
		self.label
	}

	/// Number of members registered so far.
	pub fn len(&self) -> usize {
		self.members.len()
	}

	pub fn is_empty(&self) -> bool {
		self.members.is_empty()
	}

	/// Whether a member with the same canonical name is already registered.
	pub fn contains(&self, name: &str) -> bool {
		self.members.contains_key(canonicalize(name).as_ref())
	}

	pub(crate) fn into_members(self) -> Members<T> {
		self.members
	}
}

impl<T> std::fmt::Debug for Registrar<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Registrar")
			.field("label", &self.label)
			.field("members", &self.members.keys().collect::<Vec<_>>())
			.finish()
	}
}
