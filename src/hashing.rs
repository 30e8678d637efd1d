//! Deterministic string hashing used to derive per-stream seed offsets.
//!
//! The standard library hashers are randomly seeded per process, which would
//! break run-to-run reproducibility, so seed offsets are computed with xxh3
//! instead.

use xxhash_rust::xxh3::xxh3_64;

/// A convenience method to compute the hash of a `&str`.
pub fn hash_str(data: &str) -> u64 {
    xxh3_64(data.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_strings() {
        let a = hash_str("hello");
        let b = hash_str("hello");
        let c = hash_str("world");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn distinct_stream_names_get_distinct_offsets() {
        assert_ne!(hash_str("CasesRng"), hash_str("VaccinationRng"));
        assert_ne!(hash_str("HospitalRng"), hash_str("TestingRng"));
    }
}
