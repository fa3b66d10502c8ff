//! Per-segment token accounting (`spec.md` §4.7, "Token Counter").
//!
//! Ported from `language_models/server/models/_token_counter.py`'s
//! `TokenCounter`. The tokenizer itself lives behind the adapter boundary;
//! this module only consumes the end offsets it already computed over the
//! concatenation of a request's text segments and folds them against the
//! segments' cumulative lengths.

/// Cumulative character lengths of each segment double as that segment's
/// end boundary over the concatenation.
pub struct TokenCounter {
    /// Cumulative end offset (over the concatenated text) of every
    /// non-special token, in ascending order.
    ends: Vec<usize>,
    num_special_tokens: usize,
    segment_boundaries: Vec<usize>,
    indicate_shared: bool,
    consumed: bool,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct TokenCounts {
    pub counts: Vec<f32>,
    pub num_all: usize,
    pub num_special: usize,
    pub num_non_special: usize,
}

#[derive(Debug, thiserror::Error)]
#[error("token counter has already been consumed")]
pub struct AlreadyConsumed;

impl TokenCounter {
    pub fn new(
        segment_lengths: &[usize],
        non_special_token_ends: Vec<usize>,
        num_special_tokens: usize,
        indicate_shared: bool,
    ) -> Self {
        let mut acc = 0usize;
        let segment_boundaries = segment_lengths
            .iter()
            .map(|len| {
                acc += len;
                acc
            })
            .collect();
        TokenCounter {
            ends: non_special_token_ends,
            num_special_tokens,
            segment_boundaries,
            indicate_shared,
            consumed: false,
        }
    }

    /// Consumes the token stream exactly once, producing one count per
    /// segment. A second call fails with [`AlreadyConsumed`] (`spec.md`
    /// §4.7 "Termination").
    pub fn consume(&mut self) -> Result<TokenCounts, AlreadyConsumed> {
        if self.consumed {
            return Err(AlreadyConsumed);
        }
        self.consumed = true;

        let mut counts: Vec<f32> = Vec::new();
        let mut current_count: f32 = 0.0;
        let mut idx = 0usize;

        let mut current_length = match Self::next_boundary(
            &self.segment_boundaries,
            &mut idx,
            0,
            &mut counts,
            &mut current_count,
            false,
            self.indicate_shared,
        ) {
            Some(len) => len,
            None => return Ok(self.finish(counts)),
        };

        'ends: for &end in &self.ends {
            current_count += 1.0;
            while current_length <= end {
                let is_partial = current_length != end;
                Self::commit(&mut counts, &mut current_count, is_partial, self.indicate_shared);
                current_length = match Self::next_boundary(
                    &self.segment_boundaries,
                    &mut idx,
                    current_length,
                    &mut counts,
                    &mut current_count,
                    is_partial,
                    self.indicate_shared,
                ) {
                    Some(len) => len,
                    None => break 'ends,
                };
            }
        }

        Ok(self.finish(counts))
    }

    fn finish(&self, counts: Vec<f32>) -> TokenCounts {
        TokenCounts {
            counts,
            num_all: self.ends.len() + self.num_special_tokens,
            num_special: self.num_special_tokens,
            num_non_special: self.ends.len(),
        }
    }

    fn commit(counts: &mut Vec<f32>, current_count: &mut f32, is_partial: bool, indicate_shared: bool) {
        if indicate_shared && is_partial {
            *current_count += 0.5;
        }
        counts.push(*current_count);
        *current_count = 0.0;
    }

    /// Mirrors `_get_next_length`: advances past every segment boundary
    /// that coincides exactly with `current_length` (empty or
    /// already-finished segments), committing a count for each, and
    /// returns the first boundary strictly beyond it.
    fn next_boundary(
        boundaries: &[usize],
        idx: &mut usize,
        current_length: usize,
        counts: &mut Vec<f32>,
        current_count: &mut f32,
        is_partial: bool,
        indicate_shared: bool,
    ) -> Option<usize> {
        loop {
            let next_length = *boundaries.get(*idx)?;
            *idx += 1;
            if next_length == current_length {
                Self::commit(counts, current_count, is_partial, indicate_shared);
            } else {
                return Some(next_length);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_tokens_inside_a_single_segment_sum_to_the_token_count() {
        let mut counter = TokenCounter::new(&[11], vec![5, 6, 11], 0, false);
        let result = counter.consume().unwrap();
        assert_eq!(result.counts, vec![3.0]);
        assert_eq!(result.num_non_special, 3);
    }

    #[test]
    fn tokens_cleanly_split_between_two_segments() {
        // "ab" (len 2) + "cde" (len 3); tokens end at 1, 2, 5 — none cross
        // the segment boundary.
        let mut counter = TokenCounter::new(&[2, 3], vec![1, 2, 5], 0, false);
        let result = counter.consume().unwrap();
        assert_eq!(result.counts, vec![2.0, 1.0]);
        assert_eq!(result.counts.iter().sum::<f32>() as usize, result.num_non_special);
    }

    #[test]
    fn special_tokens_are_reported_separately_from_the_per_segment_counts() {
        let mut counter = TokenCounter::new(&[5], vec![5], 2, false);
        let result = counter.consume().unwrap();
        assert_eq!(result.num_special, 2);
        assert_eq!(result.num_all, 3);
    }

    #[test]
    fn a_boundary_spanning_token_gets_a_half_share_when_indicating_shared() {
        let mut counter = TokenCounter::new(&[2, 3], vec![1, 4, 5], 0, true);
        let result = counter.consume().unwrap();
        // Token ending at 4 straddles the boundary at 2; it contributes its
        // full unit plus the 0.5 bonus to the segment it was tallied
        // against when the boundary was crossed.
        assert_eq!(result.counts, vec![2.5, 1.0]);
    }

    #[test]
    fn repeated_consumption_fails() {
        let mut counter = TokenCounter::new(&[5], vec![5], 0, false);
        counter.consume().unwrap();
        assert!(counter.consume().is_err());
    }

    #[test]
    fn empty_trailing_segments_each_receive_a_zero_count() {
        let mut counter = TokenCounter::new(&[3, 0, 0], vec![3], 0, false);
        let result = counter.consume().unwrap();
        assert_eq!(result.counts, vec![1.0, 0.0, 0.0]);
    }
}
