//! Collection scope arguments.

/// Normalize an optional collection filter. Blank ids mean "every
/// collection", the same as `None`.
pub fn normalize(collection: Option<&str>) -> Option<&str> {
    collection.map(str::trim).filter(|c| !c.is_empty())
}
