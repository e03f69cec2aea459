//! Benchmark categories.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// The closed set of workload categories.
///
/// Every registered workload belongs to exactly one category; the composite
/// score is a weighted sum over per-category means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Category {
    ComputeIntensive,
    Memory,
    Concurrency,
    Cryptography,
    FloatingPoint,
    Compression,
    Algorithmic,
}

impl Category {
    /// All categories in canonical report order.
    pub const ALL: [Category; 7] = [
        Category::ComputeIntensive,
        Category::Memory,
        Category::Concurrency,
        Category::Cryptography,
        Category::FloatingPoint,
        Category::Compression,
        Category::Algorithmic,
    ];

    /// Returns the canonical kebab-case name.
    pub fn name(self) -> &'static str {
        match self {
            Category::ComputeIntensive => "compute-intensive",
            Category::Memory => "memory",
            Category::Concurrency => "concurrency",
            Category::Cryptography => "cryptography",
            Category::FloatingPoint => "floating-point",
            Category::Compression => "compression",
            Category::Algorithmic => "algorithmic",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a category name matches none of the known categories.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        let category = match normalized.as_str() {
            "compute-intensive" | "compute" => Category::ComputeIntensive,
            "memory" => Category::Memory,
            "concurrency" => Category::Concurrency,
            "cryptography" | "crypto" => Category::Cryptography,
            "floating-point" | "float" => Category::FloatingPoint,
            "compression" => Category::Compression,
            "algorithmic" | "algorithm" => Category::Algorithmic,
            _ => return Err(UnknownCategory(s.to_string())),
        };
        Ok(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_names() {
        for category in Category::ALL {
            assert_eq!(category.name().parse::<Category>(), Ok(category));
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("compute".parse(), Ok(Category::ComputeIntensive));
        assert_eq!("Crypto".parse(), Ok(Category::Cryptography));
        assert_eq!("floating_point".parse(), Ok(Category::FloatingPoint));
        assert_eq!(" algorithm ".parse(), Ok(Category::Algorithmic));
    }

    #[test]
    fn test_parse_unknown() {
        let err = "gpu".parse::<Category>().unwrap_err();
        assert_eq!(err, UnknownCategory("gpu".to_string()));
        assert_eq!(err.to_string(), "unknown category: gpu");
    }

    #[test]
    fn test_display_matches_name() {
        assert_eq!(Category::FloatingPoint.to_string(), "floating-point");
    }
}
