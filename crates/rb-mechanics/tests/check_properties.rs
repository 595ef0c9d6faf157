//! Integration tests: check properties.
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rb_core::GameState;
use rb_mechanics::{MAX_FATE, StatKind, Tier, build_stats, fate, resolve, roll_check};

proptest! {
    #[test]
    fn naturals_override_totals(modifier in -10i32..10, fate_bonus in 0i32..=3, dc in -5i32..40) {
        prop_assert!(resolve(StatKind::Intuition, 20, modifier, fate_bonus, dc).success);
        let fumble = resolve(StatKind::Intuition, 1, modifier, fate_bonus, dc);
        prop_assert!(!fumble.success);
        prop_assert_eq!(fumble.tier, Tier::CriticalFailure);
    }

    #[test]
    fn middle_rolls_compare_total_to_dc(roll in 2u32..20, modifier in -5i32..8, dc in 0i32..30) {
        let r = resolve(StatKind::Equipment, roll, modifier, 0, dc);
        prop_assert_eq!(r.total, roll as i32 + modifier);
        prop_assert_eq!(r.success, r.total >= dc);
    }

    #[test]
    fn fate_stays_in_range(
        loops in 0u32..4,
        rapport in -20i32..=10,
        aria in any::<bool>(),
    ) {
        let mut state = GameState::initial(0);
        state.loop_count = loops;
        state.progress.rapport = rapport;
        state.progress.aria_revealed = aria;
        let f = fate(&state);
        prop_assert!((0..=MAX_FATE).contains(&f));
    }

    #[test]
    fn same_seed_same_check(seed in any::<u64>(), dc in 0i32..25) {
        let state = GameState::initial(seed);
        let stats = build_stats(&state);
        let a = roll_check(StatKind::Intuition, &stats, dc, Some(&state), &mut StdRng::seed_from_u64(seed));
        let b = roll_check(StatKind::Intuition, &stats, dc, Some(&state), &mut StdRng::seed_from_u64(seed));
        prop_assert_eq!(a, b);
        prop_assert!((1..=20).contains(&a.roll));
    }
}
