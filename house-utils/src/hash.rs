use ahash::RandomState;

pub fn u8s_from_str(input: &str) -> [u8; 32] {
    blake3::hash(input.as_bytes()).into()
}

pub fn u64s_from_seed(seed: &[u8; 32]) -> [u64; 4] {
    let mut output = [0u64; 4];
    for (i, chunk) in seed.chunks_exact(8).enumerate() {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(chunk);
        output[i] = u64::from_le_bytes(bytes);
    }
    output
}

/// Hasher with fixed keys, so hash-based containers built from the same
/// seed behave identically across runs.
pub fn seeded_hasher(seed: &[u8; 32]) -> RandomState {
    let [s1, s2, s3, s4] = u64s_from_seed(seed);
    RandomState::with_seeds(s1, s2, s3, s4)
}

pub type HashMap<K, V> = std::collections::HashMap<K, V, RandomState>;
