use rand::seq::SliceRandom;

use crate::error::{PipelineError, PipelineResult};

/// Draw `count` background clips from `pool` for one video.
///
/// Clips are drawn uniformly without replacement from a working copy of the
/// pool; when the copy runs dry and more clips are still needed it is
/// refilled from the full pool. Repeats are therefore possible only after
/// every clip has been used once, which keeps back-to-back footage varied
/// even when a long narration outruns a small pool.
pub fn select(pool: &[String], count: usize) -> PipelineResult<Vec<String>> {
    if pool.is_empty() {
        if count == 0 {
            return Ok(Vec::new());
        }
        return Err(PipelineError::EmptyPool);
    }

    let mut rng = rand::rng();
    let mut selected = Vec::with_capacity(count);
    let mut available: Vec<&String> = Vec::new();

    while selected.len() < count {
        if available.is_empty() {
            available = pool.iter().collect();
            available.shuffle(&mut rng);
        }
        let to_pick = (count - selected.len()).min(available.len());
        let split_at = available.len() - to_pick;
        selected.extend(available.drain(split_at..).cloned());
    }

    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn pool(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("clip_{i}.mp4")).collect()
    }

    #[test]
    fn returns_exact_count() {
        let p = pool(10);
        for count in [0, 1, 5, 10, 23] {
            assert_eq!(select(&p, count).unwrap().len(), count);
        }
    }

    #[test]
    fn no_duplicates_until_pool_exhausted() {
        let p = pool(8);
        let picked = select(&p, 8).unwrap();
        let unique: HashSet<&String> = picked.iter().collect();
        assert_eq!(unique.len(), 8, "one full cycle must use each clip once");
    }

    #[test]
    fn oversized_request_refills_from_full_pool() {
        let p = pool(3);
        let picked = select(&p, 7).unwrap();
        assert_eq!(picked.len(), 7);
        // first cycle of 3 is duplicate-free
        let first: HashSet<&String> = picked[..3].iter().collect();
        assert_eq!(first.len(), 3);
        // every pick still comes from the pool
        assert!(picked.iter().all(|c| p.contains(c)));
    }

    #[test]
    fn empty_pool_is_an_error() {
        assert!(matches!(
            select(&[], 1),
            Err(PipelineError::EmptyPool)
        ));
    }
}
