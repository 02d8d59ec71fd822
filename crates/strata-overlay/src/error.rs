#![forbid(unsafe_code)]

use crate::id::OverlayId;

/// Errors from misusing an [`OverlayController`](crate::OverlayController).
///
/// Each `attach` must be matched by exactly one `detach`. Violations are
/// reported instead of corrupting the shared registries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayError {
    /// `attach` called while the overlay, or another one with the same id,
    /// is already open.
    AlreadyOpen(OverlayId),
    /// `detach` called while the overlay is closed.
    NotOpen(OverlayId),
}

impl std::fmt::Display for OverlayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyOpen(id) => write!(f, "overlay '{id}' is already open"),
            Self::NotOpen(id) => write!(f, "overlay '{id}' is not open"),
        }
    }
}

impl std::error::Error for OverlayError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_overlay() {
        let err = OverlayError::AlreadyOpen(OverlayId::from("settings"));
        assert_eq!(err.to_string(), "overlay 'settings' is already open");
        let err = OverlayError::NotOpen(OverlayId::from("settings"));
        assert_eq!(err.to_string(), "overlay 'settings' is not open");
    }
}
