use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

fn hash_of(value: impl Hash) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

pub fn stable_seed(value: impl Hash) -> u64 {
    hash_of(value)
}

/// Deterministic value in `[0, 1)` for any hashable seed.
pub fn stable_unit(seed: impl Hash) -> f32 {
    ((hash_of(seed) >> 40) as f64 / (1u64 << 24) as f64) as f32
}

pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let mut truncated = text.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        text.to_owned()
    }
}
