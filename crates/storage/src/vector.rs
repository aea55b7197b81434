//! Embedding math and blob encoding shared by the repository backends.

use crate::repository::StorageError;

/// Cosine similarity in `[-1, 1]`; zero when either vector has no magnitude
/// or the dimensions differ.
#[must_use]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let mut dot = 0.0_f32;
    let mut norm_a = 0.0_f32;
    let mut norm_b = 0.0_f32;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Little-endian `f32` blob.
#[must_use]
pub fn encode_embedding(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// # Errors
///
/// Returns `StorageError::Serialization` if the blob length is not a multiple
/// of four bytes.
pub fn decode_embedding(bytes: &[u8]) -> Result<Vec<f32>, StorageError> {
    if bytes.len() % 4 != 0 {
        return Err(StorageError::Serialization(format!(
            "embedding blob has {} bytes",
            bytes.len()
        )));
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect())
}

/// Keep the `limit` highest scores, best first. Ties keep input order.
pub fn top_k<T>(mut scored: Vec<(f32, T)>, limit: usize) -> Vec<(f32, T)> {
    scored.sort_by(|left, right| right.0.total_cmp(&left.0));
    scored.truncate(limit);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosine_of_parallel_vectors_is_one() {
        let s = cosine_similarity(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]);
        assert!((s - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_handles_degenerate_inputs() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn blob_decoding_rejects_ragged_input() {
        assert!(decode_embedding(&[0, 0, 128]).is_err());
        let values = vec![0.25_f32, -1.5, 3.0];
        assert_eq!(decode_embedding(&encode_embedding(&values)).unwrap(), values);
    }

    #[test]
    fn top_k_orders_best_first() {
        let ranked = top_k(vec![(0.1, "a"), (0.9, "b"), (0.5, "c")], 2);
        assert_eq!(ranked, vec![(0.9, "b"), (0.5, "c")]);
    }
}
