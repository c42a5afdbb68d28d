//! Error types for spec normalization and children extraction.

use std::fmt;

/// Boxed error returned by user-supplied callbacks (factories, flatteners,
/// matchers and traversals).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error raised while normalizing a group spec or extracting grouped children.
///
/// The library never fails on its own: every variant wraps the failure of an
/// injected callback, tagged with the stage and the group it happened in.
#[derive(Debug)]
pub enum GroupingError {
    /// The proxy component factory failed while normalizing the spec.
    Factory {
        /// The spec key the proxy was being created for.
        group: String,
        /// The factory's error.
        source: BoxError,
    },

    /// The children flattener failed.
    Flatten {
        /// The flattener's error.
        source: BoxError,
    },

    /// The component matcher failed.
    Matcher {
        /// The spec key being matched.
        group: String,
        /// The matcher's error.
        source: BoxError,
    },

    /// The traversal of a matched proxy element failed.
    Traverse {
        /// The spec key the element was matched under.
        group: String,
        /// The traversal's error.
        source: BoxError,
    },
}

impl GroupingError {
    /// The spec key the failure happened in, if it is tied to one group.
    pub fn group(&self) -> Option<&str> {
        match self {
            Self::Factory { group, .. }
            | Self::Matcher { group, .. }
            | Self::Traverse { group, .. } => Some(group),
            Self::Flatten { .. } => None,
        }
    }
}

impl fmt::Display for GroupingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Factory { group, source } => {
                write!(f, "failed to create proxy component for `{group}`: {source}")
            }
            Self::Flatten { source } => write!(f, "failed to flatten children: {source}"),
            Self::Matcher { group, source } => {
                write!(f, "matcher failed for group `{group}`: {source}")
            }
            Self::Traverse { group, source } => {
                write!(f, "failed to traverse children of `{group}`: {source}")
            }
        }
    }
}

impl std::error::Error for GroupingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Factory { source, .. }
            | Self::Flatten { source }
            | Self::Matcher { source, .. }
            | Self::Traverse { source, .. } => Some(&**source),
        }
    }
}
