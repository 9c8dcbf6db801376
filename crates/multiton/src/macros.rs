//! Declarative front end for registries with a fixed member set.

/// Defines a `static` [`Registry`](crate::Registry) together with an accessor
/// type exposing one function per member.
///
/// Each member becomes a registration in the generated population routine and
/// an associated function on the accessor type that reads the member through
/// [`Registry::member`](crate::Registry::member). Member expressions are
/// evaluated during population, on first access.
///
/// ```
/// use multiton::multiton;
///
/// #[derive(Debug)]
/// pub struct Block {
/// 	pub hardness: u8,
/// }
///
/// multiton! {
/// 	pub static BLOCKS: Registry<Block> = "Block";
///
/// 	pub struct Blocks {
/// 		STONE => Block { hardness: 3 },
/// 		DIRT => Block { hardness: 1 },
/// 	}
/// }
///
/// assert_eq!(Blocks::STONE().hardness, 3);
/// assert_eq!(BLOCKS.from_name("dirt").unwrap().hardness, 1);
/// assert_eq!(BLOCKS.len().unwrap(), 2);
/// ```
///
/// A post-processing hook follows the label:
///
/// ```
/// use std::sync::Arc;
///
/// use multiton::multiton;
///
/// pub struct Tint(u32);
///
/// fn audited(member: Arc<Tint>) -> Arc<Tint> {
/// 	member
/// }
///
/// multiton! {
/// 	static TINTS: Registry<Tint> = "Tint", preprocess = audited;
///
/// 	struct Tints {
/// 		WARM => Tint(0xffaa00),
/// 	}
/// }
///
/// assert_eq!(Tints::WARM().0, 0xffaa00);
/// ```
#[macro_export]
macro_rules! multiton {
	(
		$(#[$registry_attr:meta])*
		$vis:vis static $registry:ident: Registry<$member:ty> = $label:literal
			$(, preprocess = $preprocess:expr)?;

		$(#[$accessor_attr:meta])*
		$accessor_vis:vis struct $accessor:ident {
			$(
				$(#[$name_attr:meta])*
				$name:ident => $value:expr
			),* $(,)?
		}
	) => {
		$(#[$registry_attr])*
		$vis static $registry: $crate::Registry<$member> = {
			fn populate(
				registrar: &mut $crate::Registrar<$member>,
			) -> ::core::result::Result<(), $crate::RegistryError> {
				$( registrar.register(::core::stringify!($name), $value)?; )*
				::core::result::Result::Ok(())
			}

			$crate::Registry::new($label, populate) $( .with_preprocess($preprocess) )?
		};

		$(#[$accessor_attr])*
		$accessor_vis struct $accessor;

		#[allow(non_snake_case, dead_code)]
		impl $accessor {
			/// The registry backing this accessor.
			$accessor_vis fn registry() -> &'static $crate::Registry<$member> {
				&$registry
			}

			$(
				$(#[$name_attr])*
				$accessor_vis fn $name() -> ::std::sync::Arc<$member> {
					$registry.member(::core::stringify!($name))
				}
			)*
		}
	};
}
