//! Property-based tests for SPRS scoring
//!
//! Uses proptest to verify properties that should hold for all inputs.

use cmmc_query::core::services::score::POINT_TABLE;
use cmmc_query::core::services::{MAX_SCORE, MIN_SCORE, ScoreEngine, derive_control_id};
use proptest::prelude::*;

fn scored_ids() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(prop::sample::select(POINT_TABLE.map(|(id, _)| id).to_vec()), 0..40)
}

proptest! {
    /// Order and duplicates never change the result
    #[test]
    fn impact_ignores_order_and_duplicates(ids in scored_ids(), seed in any::<u64>()) {
        let engine = ScoreEngine::new();
        let base = engine.compute_impact(&ids);

        let mut shuffled = ids.clone();
        shuffled.extend(ids.iter().copied());
        let len = shuffled.len();
        if len > 1 {
            let by = usize::try_from(seed % len as u64).unwrap();
            shuffled.rotate_left(by);
        }
        shuffled.reverse();

        prop_assert_eq!(engine.compute_impact(&shuffled), base);
    }

    /// Score always stays within the SPRS range and matches the deduction
    #[test]
    fn score_within_range(ids in scored_ids()) {
        let impact = ScoreEngine::new().compute_impact(&ids);
        prop_assert!(impact.score <= MAX_SCORE);
        prop_assert!(impact.score >= MIN_SCORE);
        prop_assert_eq!(i64::from(impact.score), i64::from(MAX_SCORE) - i64::from(impact.deduction));
    }

    /// Adding a not-met requirement never raises the score
    #[test]
    fn more_gaps_never_raise_score(
        ids in scored_ids(),
        extra in prop::sample::select(POINT_TABLE.map(|(id, _)| id).to_vec()),
    ) {
        let engine = ScoreEngine::new();
        let before = engine.compute_impact(&ids).score;
        let mut more = ids.clone();
        more.push(extra);
        prop_assert!(engine.compute_impact(&more).score <= before);
    }

    /// Objective suffixes and practice prefixes reduce to the control id
    #[test]
    fn derive_strips_objective_suffix(
        index in 0..POINT_TABLE.len(),
        letter in "[a-z]",
        prefixed in any::<bool>(),
    ) {
        let id = POINT_TABLE[index].0;
        let key = if prefixed {
            format!("XX.L2-{id}[{letter}]")
        } else {
            format!("{id}[{letter}]")
        };
        prop_assert_eq!(derive_control_id(&key), id);
    }
}
