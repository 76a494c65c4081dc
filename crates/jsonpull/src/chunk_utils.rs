use alloc::vec::Vec;

/// Split `payload` into approximately equal-sized chunks. Boundaries fall on
/// arbitrary bytes, including inside multi-byte UTF-8 sequences.
///
/// # Panics
///
/// Panics if `parts` is zero.
#[must_use]
pub fn produce_chunks(payload: &[u8], parts: usize) -> Vec<&[u8]> {
    assert!(parts > 0);
    let chunk_size = payload.len().div_ceil(parts).max(1);
    payload.chunks(chunk_size).collect()
}

/// Return a sequence of prefixes converging to `payload`.
///
/// # Panics
///
/// Panics if `parts` is zero.
#[must_use]
pub fn produce_prefixes(payload: &[u8], parts: usize) -> Vec<&[u8]> {
    let chunks = produce_chunks(payload, parts);
    let mut prefixes = Vec::with_capacity(chunks.len());
    let mut end = 0;
    for chunk in chunks {
        end += chunk.len();
        prefixes.push(&payload[..end]);
    }
    prefixes
}

/// Split `payload` at each of `points` (taken modulo its length, sorted and
/// deduplicated). Empty chunks are kept out.
#[must_use]
pub fn split_at_points<'a>(payload: &'a [u8], points: &[usize]) -> Vec<&'a [u8]> {
    if payload.is_empty() {
        return Vec::new();
    }
    let mut cuts: Vec<usize> = points.iter().map(|p| p % payload.len()).collect();
    cuts.sort_unstable();
    cuts.dedup();

    let mut chunks = Vec::with_capacity(cuts.len() + 1);
    let mut start = 0;
    for cut in cuts {
        if cut > start {
            chunks.push(&payload[start..cut]);
            start = cut;
        }
    }
    chunks.push(&payload[start..]);
    chunks
}
