// Category weight table.
//
// Passed explicitly into the score calculator so tests and configuration can
// substitute their own tables.

use std::collections::BTreeMap;
use std::fmt::{self, Debug};

use hyperpi_core::Category;

// Immutable-by-convention mapping from category to weight.
//
// Weights need not sum to 1: the composite is a weighted sum, not a weighted
// average. The canonical table does sum to 1.
#[derive(Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryWeights {
    weights: BTreeMap<Category, f64>,
}

impl Debug for CategoryWeights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.weights.iter()).finish()
    }
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self::canonical()
    }
}

impl CategoryWeights {
    // Creates an empty table. Every category contributes zero.
    pub fn new() -> Self {
        Self {
            weights: BTreeMap::new(),
        }
    }

    // The canonical seven-category table.
    pub fn canonical() -> Self {
        Self::from_pairs([
            (Category::ComputeIntensive, 0.20),
            (Category::Memory, 0.15),
            (Category::Concurrency, 0.15),
            (Category::Cryptography, 0.15),
            (Category::FloatingPoint, 0.15),
            (Category::Compression, 0.10),
            (Category::Algorithmic, 0.10),
        ])
    }

    // Creates a table from an iterator of (category, weight) pairs.
    pub fn from_pairs<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (Category, f64)>,
    {
        Self {
            weights: iter.into_iter().collect(),
        }
    }

    // Sets the weight for a category.
    pub fn put(&mut self, category: Category, weight: f64) {
        self.weights.insert(category, weight);
    }

    // Returns a copy with `category` set to `weight`.
    pub fn with(mut self, category: Category, weight: f64) -> Self {
        self.put(category, weight);
        self
    }

    // Gets the weight if the category is in the table.
    pub fn get(&self, category: Category) -> Option<f64> {
        self.weights.get(&category).copied()
    }

    // Gets the weight, or zero for categories outside the table.
    pub fn get_or_zero(&self, category: Category) -> f64 {
        self.get(category).unwrap_or(0.0)
    }

    // Returns true if the category has a weight.
    pub fn contains(&self, category: Category) -> bool {
        self.weights.contains_key(&category)
    }

    // Sum of all weights.
    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }

    // Iterates (category, weight) in canonical category order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        self.weights.iter().map(|(&c, &w)| (c, w))
    }

    // Returns the number of weighted categories.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    // Returns true if no category is weighted.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl FromIterator<(Category, f64)> for CategoryWeights {
    fn from_iter<I: IntoIterator<Item = (Category, f64)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}
