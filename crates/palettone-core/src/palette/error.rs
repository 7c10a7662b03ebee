//! Error types for color parsing and palette validation.

use thiserror::Error;

/// A hex color string could not be parsed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseColorError {
    /// Digits after stripping `#` must number 3 or 6
    #[error("invalid hex color length {0} (expected 3 or 6 digits)")]
    InvalidLength(usize),

    #[error("invalid hex digit '{0}'")]
    InvalidHex(char),
}

/// A palette could not be built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaletteError {
    #[error("palette cannot be empty")]
    EmptyPalette,

    /// Entry `index` (0-based) is not a valid color
    #[error("invalid color at palette entry {index}: {source}")]
    InvalidColor {
        index: usize,
        #[source]
        source: ParseColorError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(PaletteError::EmptyPalette.to_string(), "palette cannot be empty");
        assert_eq!(
            ParseColorError::InvalidLength(4).to_string(),
            "invalid hex color length 4 (expected 3 or 6 digits)"
        );

        let err = PaletteError::InvalidColor {
            index: 2,
            source: ParseColorError::InvalidLength(1),
        };
        assert!(err.to_string().starts_with("invalid color at palette entry 2"));
    }
}
