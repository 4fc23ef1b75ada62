use core::fmt;

/// The ways an [`RBTreeMap`](crate::RBTreeMap) operation can be refused.
///
/// Every failing call leaves the map exactly as it was.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Error {
    /// A bounds-checked lookup such as [`at`](crate::RBTreeMap::at) found no equivalent key.
    NotFound,
    /// A [`Position`](crate::rbtree_map::Position) was past-the-end where an entry was needed,
    /// was stepped beyond the ends of the map, belongs to another map, or refers to an entry
    /// that has since been removed.
    InvalidIterator,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound => f.write_str("no entry found for key"),
            Error::InvalidIterator => f.write_str("position does not refer to an entry of this map"),
        }
    }
}

impl core::error::Error for Error {}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn display_messages() {
        assert_eq!(Error::NotFound.to_string(), "no entry found for key");
        assert_eq!(Error::InvalidIterator.to_string(), "position does not refer to an entry of this map");
    }

    #[test]
    fn is_a_core_error() {
        fn assert_error<E: core::error::Error + Send + Sync + 'static>() {}
        assert_error::<Error>();
    }
}
