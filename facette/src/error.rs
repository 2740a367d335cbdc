//! Errors raised while building geometry.

use thiserror::Error;

use crate::Float;

/// A shape or mirror configuration that can't describe valid geometry.
///
/// These are detected when a shape is constructed, never while intersecting.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// Span lists hold `[start, end]` pairs, flattened.
    #[error("span list must hold an even number of bounds, got {0}")]
    OddSpanCount(usize),

    #[error("radius must be positive, got {0}")]
    NonPositiveRadius(Float),

    #[error("focal distance must be non-zero and finite, got {0}")]
    ZeroFocalDistance(Float),

    /// A parabola span whose lower bound is above its upper bound.
    #[error("span [{lo}, {hi}] is not ordered")]
    UnorderedSpan { lo: Float, hi: Float },

    /// Any other rejected parameter.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type for geometry construction.
pub type Result<T> = std::result::Result<T, ConfigurationError>;

/// Checks that `spans` is a flat list of pairs, and splits it.
pub fn span_pairs(spans: &[Float]) -> Result<Vec<[Float; 2]>> {
    if spans.len() % 2 != 0 {
        return Err(ConfigurationError::OddSpanCount(spans.len()));
    }

    Ok(spans
        .chunks_exact(2)
        .map(|pair| [pair[0], pair[1]])
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_pairs_splits_flat_lists() {
        assert_eq!(
            span_pairs(&[0., 1., 2., 3.]),
            Ok(vec![[0., 1.], [2., 3.]])
        );
        assert_eq!(span_pairs(&[]), Ok(vec![]));
    }

    #[test]
    fn span_pairs_rejects_odd_lengths() {
        assert_eq!(
            span_pairs(&[0., 1., 2.]),
            Err(ConfigurationError::OddSpanCount(3))
        );
    }

    #[test]
    fn errors_display_their_values() {
        assert_eq!(
            ConfigurationError::NonPositiveRadius(-2.).to_string(),
            "radius must be positive, got -2"
        );
    }
}
