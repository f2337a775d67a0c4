use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// The builtin filter families.
///
/// Each family maps an eigenvalue `λ` and a parameter `β` to a response in
/// `[0, 1]` for non-negative arguments, equal to 1 at `λ = 0`. The
/// multivariate forms replace `β·λ` with `Σ_i β_i·λ_i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterKind {
    /// `(1 + β·λ)^-1`
    #[serde(rename = "random_walk")]
    RandomWalk,
    /// `exp(-β·λ)`
    #[serde(rename = "diffusion")]
    Diffusion,
    /// `max(1 - β·λ, 0)`
    #[serde(rename = "relu", alias = "ReLu")]
    ReLu,
    /// `2·exp(-β·λ) / (1 + exp(-β·λ))`
    #[serde(rename = "sigmoid")]
    Sigmoid,
    /// 1 inside the band, 0 outside.
    #[serde(rename = "bandlimited")]
    Bandlimited,
}

impl FilterKind {
    /// All builtin families.
    pub const ALL: [FilterKind; 5] = [
        FilterKind::RandomWalk,
        FilterKind::Diffusion,
        FilterKind::ReLu,
        FilterKind::Sigmoid,
        FilterKind::Bandlimited,
    ];

    /// The canonical name of the family.
    pub fn name(&self) -> &'static str {
        match self {
            FilterKind::RandomWalk => "random_walk",
            FilterKind::Diffusion => "diffusion",
            FilterKind::ReLu => "relu",
            FilterKind::Sigmoid => "sigmoid",
            FilterKind::Bandlimited => "bandlimited",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterKind {
    type Err = FilterError;

    /// Parse a family name, case-insensitively. `-` and `_` are interchangeable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        FilterKind::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized)
            .ok_or_else(|| FilterError::UnknownKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_roundtrip() -> Result<(), FilterError> {
        for kind in FilterKind::ALL {
            assert_eq!(kind.name().parse::<FilterKind>()?, kind);
            assert_eq!(kind.to_string(), kind.name());
        }
        assert_eq!("ReLu".parse::<FilterKind>()?, FilterKind::ReLu);
        assert_eq!("Random-Walk".parse::<FilterKind>()?, FilterKind::RandomWalk);
        Ok(())
    }

    #[test]
    fn test_kind_unknown() {
        assert_eq!(
            "heat".parse::<FilterKind>(),
            Err(FilterError::UnknownKind("heat".to_string()))
        );
    }

    #[test]
    fn test_kind_serde() -> Result<(), serde_json::Error> {
        assert_eq!(serde_json::to_string(&FilterKind::ReLu)?, r#""relu""#);
        let kind: FilterKind = serde_json::from_str(r#""ReLu""#)?;
        assert_eq!(kind, FilterKind::ReLu);
        let kind: FilterKind = serde_json::from_str(r#""bandlimited""#)?;
        assert_eq!(kind, FilterKind::Bandlimited);
        Ok(())
    }
}
