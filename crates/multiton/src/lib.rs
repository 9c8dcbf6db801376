#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Self-initializing, name-indexed registries of typed constants.
//!
//! A [`Registry`] turns a member type into a catalog of named objects, the
//! pattern behind "typed enum" libraries where each constant is an object
//! rather than a primitive (block types, item types, colors). The owning module
//! supplies a population routine; the registry runs it once, lazily, and then
//! serves lookups.
//!
//! # Access paths
//!
//! | Call | Miss | Notes |
//! |------|------|-------|
//! | [`Registry::from_name`] | [`RegistryError::NotFound`] (returned) | case-insensitive |
//! | [`Registry::member`] | [`RegistryError::UnknownMember`] (panics) | exact-case fast path |
//! | [`Registry::call`] | as `member`; [`RegistryError::Arity`] with arguments | for dynamic callers |
//! | [`Registry::all`] | - | registration order |
//!
//! Every read passes the member through the registry's post-processing hook.
//!
//! # Example
//!
//! ```
//! use multiton::{Registrar, Registry, RegistryError};
//!
//! #[derive(Debug, PartialEq)]
//! pub struct Color(u32);
//!
//! fn populate(colors: &mut Registrar<Color>) -> Result<(), RegistryError> {
//! 	colors.register("Red", Color(0xff0000))?;
//! 	colors.register("Green", Color(0x00ff00))?;
//! 	colors.register("Blue", Color(0x0000ff))?;
//! 	Ok(())
//! }
//!
//! pub static COLORS: Registry<Color> = Registry::new("Color", populate);
//!
//! assert_eq!(*COLORS.from_name("blue")?, Color(0x0000ff));
//! assert_eq!(*COLORS.member("RED"), Color(0xff0000));
//! assert_eq!(COLORS.names()?.collect::<Vec<_>>(), ["RED", "GREEN", "BLUE"]);
//! assert!(matches!(COLORS.from_name("Purple"), Err(RegistryError::NotFound { .. })));
//! # Ok::<(), RegistryError>(())
//! ```

mod error;
mod macros;
mod name;
mod registry;

pub use error::RegistryError;
pub use name::{canonicalize, is_valid_name};
pub use registry::{Populate, Preprocess, Registrar, Registry};
