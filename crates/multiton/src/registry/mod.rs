//! Lazily populated, name-indexed member registry.
//!
//! # Mental Model
//!
//! 1. **Construction:** A [`Registry`] is built in a `const` context from a label and a
//!    population routine, optionally with a post-processing hook. Nothing runs yet.
//! 2. **Population:** The first accessor call runs the population routine exactly once,
//!    handing it a [`Registrar`] that validates and canonicalizes every name.
//! 3. **Steady state:** The member table is sealed. Reads are lock-free and every read
//!    passes the stored member through the post-processing hook.
//!
//! # Invariants
//!
//! - The population routine runs at most once per registry value.
//!   - Enforced in: `Registry::members` (`OnceLock::get_or_init`).
//!   - Failure symptom: duplicate-name errors or repeated population side effects.
//!
//! - A failed population is permanent; every later call observes the same error.
//!   - Enforced in: `Registry::members` (the `Err` is stored in the cell).
//!
//! - Re-entrant access from inside the population routine is rejected instead of
//!   deadlocking on the cell.
//!   - Enforced in: `Registry::members` (populating-thread marker).
//!
//! - A population routine that panics is never run again; later accesses report
//!   [`RegistryError::Poisoned`].
//!   - Enforced in: `PopulatingMarker` (drop during unwind) and `Registry::run_population`.
//!
//! - Iteration order is registration order.
//!   - Enforced in: [`Registrar::register`] (`IndexMap` insertion).

use std::sync::{Arc, OnceLock};
use std::thread::{self, ThreadId};

use indexmap::IndexMap;
use parking_lot::Mutex;
use rustc_hash::FxBuildHasher;
use tracing::{debug, error, warn};

use crate::RegistryError;
use crate::name::canonicalize;

mod registrar;

pub use registrar::Registrar;

pub(crate) type Members<T> = IndexMap<Box<str>, Arc<T>, FxBuildHasher>;

/// Population routine: registers every member of a registry.
pub type Populate<T> = fn(&mut Registrar<T>) -> Result<(), RegistryError>;

/// Post-processing hook applied to a member on every read.
pub type Preprocess<T> = fn(Arc<T>) -> Arc<T>;

fn identity<T>(member: Arc<T>) -> Arc<T> {
	member
}

/// A self-initializing, name-indexed set of members.
///
/// Usually held in a `static` owned by the module that defines the member set,
/// either written by hand or generated with [`multiton!`](crate::multiton).
pub struct Registry<T> {
	label: &'static str,
	populate: Populate<T>,
	preprocess: Preprocess<T>,
	state: OnceLock<Result<Members<T>, RegistryError>>,
	population: Mutex<Population>,
}

/// Progress of the population routine, tracked outside the `OnceLock`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Population {
	Idle,
	Running(ThreadId),
	/// The routine panicked; it is never run again.
	Poisoned,
}

impl<T> Registry<T> {
	/// Creates an unpopulated registry.
	///
	/// `label` names the registry in error messages and logs.
	pub const fn new(label: &'static str, populate: Populate<T>) -> Self {
		Self {
			label,
			populate,
			preprocess: identity::<T>,
			state: OnceLock::new(),
			population: parking_lot::const_mutex(Population::Idle),
		}
	}

	/// Installs a post-processing hook, replacing the identity default.
	///
	/// The hook runs on every successful read and is never memoized; keep it
	/// cheap or cache inside it.
	pub const fn with_preprocess(mut self, preprocess: Preprocess<T>) -> Self {
		self.preprocess = preprocess;
		self
	}

	pub fn label(&self) -> &'static str {
		self.label
	}

	/// Returns `true` once population has completed successfully.
	pub fn is_initialized(&self) -> bool {
		matches!(self.state.get(), Some(Ok(_)))
	}

	/// Runs the population routine now if it has not run yet.
	///
	/// # Errors
	///
	/// Returns the population routine's error, [`RegistryError::Configuration`]
	/// when called from inside that routine, or [`RegistryError::Poisoned`] after
	/// the routine panicked.
	pub fn init(&self) -> Result<(), RegistryError> {
		self.members().map(|_| ())
	}

	/// Looks up a member by name, ignoring case.
	///
	/// # Errors
	///
	/// [`RegistryError::NotFound`] when no member has that canonical name, or the
	/// population error if initialization failed.
	pub fn from_name(&self, name: &str) -> Result<Arc<T>, RegistryError> {
		let members = self.members()?;
		let key = canonicalize(name);
		match members.get(key.as_ref()) {
			Some(member) => Ok(self.preprocessed(member)),
			None => Err(RegistryError::NotFound {
				registry: self.label,
				name: key.into_owned(),
			}),
		}
	}

	/// Constant-style access to a member.
	///
	/// # Panics
	///
	/// Panics with [`RegistryError::UnknownMember`] if no such member exists, or
	/// with the population error if initialization failed. Referencing a
	/// nonexistent member is a bug in the caller.
	pub fn member(&self, name: &str) -> Arc<T> {
		self.call::<()>(name, &[])
	}

	/// Constant-style access for dynamic callers that carry an argument list.
	///
	/// # Panics
	///
	/// Panics with [`RegistryError::Arity`] if `args` is non-empty, and otherwise
	/// under the same conditions as [`Registry::member`].
	pub fn call<A>(&self, name: &str, args: &[A]) -> Arc<T> {
		match self.try_call(name, args) {
			Ok(member) => member,
			Err(err) => panic!("{err}"),
		}
	}

	/// Non-panicking form of [`Registry::call`].
	///
	/// The argument count is checked before the name is looked at. An
	/// exact-case hit on an initialized registry skips canonicalization.
	///
	/// # Errors
	///
	/// [`RegistryError::Arity`], [`RegistryError::UnknownMember`], or the
	/// population error.
	pub fn try_call<A>(&self, name: &str, args: &[A]) -> Result<Arc<T>, RegistryError> {
		if !args.is_empty() {
			return Err(RegistryError::Arity {
				registry: self.label,
				name: name.to_owned(),
				given: args.len(),
			});
		}

		if let Some(Ok(members)) = self.state.get()
			&& let Some(member) = members.get(name)
		{
			return Ok(self.preprocessed(member));
		}

		self.from_name(name).map_err(|err| match err {
			RegistryError::NotFound { registry, name } => {
				RegistryError::UnknownMember { registry, name }
			}
			other => other,
		})
	}

	/// Every member in registration order.
	///
	/// # Errors
	///
	/// The population error if initialization failed.
	pub fn all(&self) -> Result<Vec<Arc<T>>, RegistryError> {
		Ok(self
			.members()?
			.values()
			.map(|member| self.preprocessed(member))
			.collect())
	}

	/// `(canonical name, member)` pairs in registration order.
	pub fn iter(&self) -> Result<impl Iterator<Item = (&str, Arc<T>)> + '_, RegistryError> {
		Ok(self
			.members()?
			.iter()
			.map(move |(name, member)| (&**name, self.preprocessed(member))))
	}

	/// Canonical member names in registration order.
	pub fn names(&self) -> Result<impl Iterator<Item = &str> + '_, RegistryError> {
		Ok(self.members()?.keys().map(|name| &**name))
	}

	pub fn len(&self) -> Result<usize, RegistryError> {
		Ok(self.members()?.len())
	}

	pub fn is_empty(&self) -> Result<bool, RegistryError> {
		Ok(self.members()?.is_empty())
	}

	/// Whether a member with this name exists, ignoring case.
	pub fn contains(&self, name: &str) -> Result<bool, RegistryError> {
		Ok(self.members()?.contains_key(canonicalize(name).as_ref()))
	}

	fn preprocessed(&self, member: &Arc<T>) -> Arc<T> {
		(self.preprocess)(Arc::clone(member))
	}

	/// Initialization guard; the entry point of every accessor.
	fn members(&self) -> Result<&Members<T>, RegistryError> {
		if let Some(state) = self.state.get() {
			return state.as_ref().map_err(Clone::clone);
		}

		let current = thread::current().id();
		if *self.population.lock() == Population::Running(current) {
			warn!(registry = self.label, "registry accessed from its own population routine");
			return Err(RegistryError::Configuration {
				registry: self.label,
			});
		}

		self.state
			.get_or_init(|| self.run_population(current))
			.as_ref()
			.map_err(Clone::clone)
	}

	fn run_population(&self, thread: ThreadId) -> Result<Members<T>, RegistryError> {
		{
			let mut population = self.population.lock();
			if *population == Population::Poisoned {
				error!(registry = self.label, "population routine panicked earlier; not retrying");
				return Err(RegistryError::Poisoned {
					registry: self.label,
				});
			}
			*population = Population::Running(thread);
		}
		let _marker = PopulatingMarker(&self.population);

		debug!(registry = self.label, "populating registry");
		let mut registrar = Registrar::new(self.label);
		match (self.populate)(&mut registrar) {
			Ok(()) => {
				debug!(registry = self.label, members = registrar.len(), "registry populated");
				Ok(registrar.into_members())
			}
			Err(err) => {
				error!(registry = self.label, error = %err, "registry population failed");
				Err(err)
			}
		}
	}
}

/// Clears the running marker when the population routine returns, or poisons the
/// registry when it unwinds.
struct PopulatingMarker<'a>(&'a Mutex<Population>);

impl Drop for PopulatingMarker<'_> {
	fn drop(&mut self) {
		*self.0.lock() = if thread::panicking() {
			Population::Poisoned
		} else {
			Population::Idle
		};
	}
}

impl<T> std::fmt::Debug for Registry<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let mut s = f.debug_struct("Registry");
		s.field("label", &self.label);
		match self.state.get() {
			None => s.field("state", &"uninitialized"),
			Some(Ok(members)) => s.field("members", &members.keys().collect::<Vec<_>>()),
			Some(Err(err)) => s.field("error", err),
		};
		s.finish()
	}
}
