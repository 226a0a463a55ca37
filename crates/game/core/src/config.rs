/// Measurement rule applied to diagonal steps on a square grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DiagonalRule {
    /// Straight-line distance between cell centers; one diagonal step ≈ 1.41.
    #[default]
    Euclidean,
    /// Chessboard (Chebyshev) distance; one diagonal step costs 1.
    Equidistant,
    /// 5-10-5 rule; every second diagonal step costs 2.
    Alternating,
}

/// Grid geometry and tunable targeting constants.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    /// Scene units (pixels) covered by one square.
    pub size: f64,

    /// Maximum distance, in squares, at which two anchors count as adjacent.
    ///
    /// Tied to the diagonal measurement: 1.5 admits the orthogonal step (1.0)
    /// and the Euclidean diagonal (≈1.41) while rejecting distance 2.
    pub adjacency_threshold: f64,

    pub diagonals: DiagonalRule,
}

impl GridConfig {
    // ===== defaults =====
    pub const DEFAULT_SIZE: f64 = 100.0;
    pub const DEFAULT_ADJACENCY_THRESHOLD: f64 = 1.5;

    pub const fn new() -> Self {
        Self {
            size: Self::DEFAULT_SIZE,
            adjacency_threshold: Self::DEFAULT_ADJACENCY_THRESHOLD,
            diagonals: DiagonalRule::Euclidean,
        }
    }

    #[must_use]
    pub const fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub const fn with_adjacency_threshold(mut self, threshold: f64) -> Self {
        self.adjacency_threshold = threshold;
        self
    }

    #[must_use]
    pub const fn with_diagonals(mut self, diagonals: DiagonalRule) -> Self {
        self.diagonals = diagonals;
        self
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_square_grid() {
        let config = GridConfig::default();
        assert_eq!(config.size, 100.0);
        assert_eq!(config.adjacency_threshold, 1.5);
        assert_eq!(config.diagonals, DiagonalRule::Euclidean);
    }

    #[test]
    fn diagonal_rule_parses_case_insensitively() {
        assert_eq!(
            "Equidistant".parse::<DiagonalRule>().unwrap(),
            DiagonalRule::Equidistant
        );
        assert_eq!(DiagonalRule::Alternating.to_string(), "alternating");
    }
}
