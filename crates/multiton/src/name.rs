//! Member name validation and canonicalization.
//!
//! A valid name is non-empty, does not start with a digit, and contains only
//! ASCII letters, ASCII digits and underscores. The canonical form of a name is
//! its uppercase spelling; registries key their storage by it.

use std::borrow::Cow;

/// Returns whether `name` may be registered as a member name.
pub fn is_valid_name(name: &str) -> bool {
	let mut bytes = name.bytes();
	match bytes.next() {
		Some(first) if first.is_ascii_alphabetic() || first == b'_' => {}
		_ => return false,
	}
	bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Returns the canonical (uppercase) form of `name`.
///
/// Borrows when `name` is already canonical. Non-ASCII input goes through full
/// Unicode case mapping, so a lookup can never match a key it would not match
/// case-insensitively.
pub fn canonicalize(name: &str) -> Cow<'_, str> {
	if !name.is_ascii() {
		return Cow::Owned(name.to_uppercase());
	}
	if name.bytes().any(|b| b.is_ascii_lowercase()) {
		Cow::Owned(name.to_ascii_uppercase())
	} else {
		Cow::Borrowed(name)
	}
}
