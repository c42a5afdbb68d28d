//! Property names for groups.
//!
//! Groups are declared with PascalCase keys (`Header`, `GroupWithProxy`) and
//! delivered under the same key with only the first character lower-cased:
//! - `Header` → `header`
//! - `GroupWithProxy` → `groupWithProxy`
//! - `WORLD` → `wORLD`
//! - `1Number` → `1Number` (nothing to lower-case)
//! - `ǅemal` → `ǆemal` (titlecase letters are lower-cased too)

use std::borrow::Cow;

/// Lower-case the first character of `name`, leaving the rest untouched.
///
/// Returns `Cow::Borrowed` when nothing changes, so already-camelCase keys
/// and the empty string don't allocate.
#[inline]
pub fn uncapitalize(name: &str) -> Cow<'_, str> {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if !first.to_lowercase().eq([first]) => {
            let mut out = String::with_capacity(name.len());
            out.extend(first.to_lowercase());
            out.push_str(chars.as_str());
            Cow::Owned(out)
        }
        _ => Cow::Borrowed(name),
    }
}
