//! The HyperPi workload catalog.
//!
//! Every workload is a plain function over `WorkloadInput` wrapped in a
//! [`Workload`] descriptor. Bodies return a checksum and use only the PRNG
//! seeded from their input, so concurrent workers never share state.
//!
//! | Category | Workloads |
//! |---|---|
//! | compute-intensive | pi digits, bit operations, integer arithmetic |
//! | memory | random access, sequential access |
//! | concurrency | mutex/barrier mix, channel messaging |
//! | cryptography | hash + stream cipher, HMAC + keyed hash, hash mix |
//! | floating-point | float mix, trigonometry, matrix multiply |
//! | compression | gzip and zlib round trips |
//! | algorithmic | sorting, string processing, binary encoding |
//!
//! # Example
//!
//! ```
//! use hyperpi_workloads::catalog;
//!
//! let workloads = catalog();
//! assert_eq!(workloads.len(), 17);
//! assert_eq!(workloads[0].name(), "pi-digits");
//! ```

pub mod algorithmic;
pub mod compression;
pub mod compute;
pub mod concurrency;
pub mod crypto;
pub mod float;
pub mod memory;

use hyperpi_core::Workload;

/// All workloads in registration order.
pub fn catalog() -> Vec<Workload> {
    vec![
        compute::pi_digits(),
        compute::bit_operations(),
        compute::integer_arithmetic(),
        memory::random_access(),
        memory::sequential_access(),
        concurrency::mutex_barrier(),
        concurrency::channel_messaging(),
        crypto::hash_and_stream(),
        crypto::hmac_and_keyed(),
        crypto::hash_mix(),
        float::float_mix(),
        float::trigonometry(),
        float::matrix_multiply(),
        compression::deflate_round_trip(),
        algorithmic::sorting(),
        algorithmic::string_processing(),
        algorithmic::binary_encoding(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyperpi_core::Category;

    #[test]
    fn test_catalog_identities_unique() {
        let workloads = catalog();
        for (i, a) in workloads.iter().enumerate() {
            for b in &workloads[i + 1..] {
                assert!(!a.same_identity(b), "duplicate {}", a.name());
            }
        }
    }

    #[test]
    fn test_catalog_covers_every_category() {
        let workloads = catalog();
        for category in Category::ALL {
            assert!(
                workloads.iter().any(|w| w.category() == category),
                "no workload in {}",
                category
            );
        }
    }

    #[test]
    fn test_catalog_descriptions_present() {
        for workload in catalog() {
            assert!(!workload.description().is_empty(), "{}", workload.name());
            assert!(workload.work() > 0.0, "{}", workload.name());
        }
    }
}
