//! The loop reset and the true escape.
//!
//! The first wipe is a soft retry: a fresh state with the durable
//! [`Progress`](crate::state::Progress) laid over it and the loop-aware
//! intro queued. Every later wipe keeps the current state, forces the
//! hostile lockdown and re-arms the boss.

use crate::script::{Entry, Script};
use crate::stage::Stage;
use crate::state::{BossState, GameState};
use crate::tuning::Tuning;

pub(super) fn gaslight(state: &GameState, script: &Script, tuning: &Tuning) -> Option<GameState> {
    let next = if state.loop_count == 0 {
        let mut fresh = GameState::with_tuning(state.rng_seed, tuning);
        fresh.progress = state.progress.clone();
        fresh.loop_count = 1;
        fresh.stage = Stage::LOOP_INTRO;
        fresh.chat_queue = script.entry_steps(Entry::LoopIntro).into();
        fresh.chat_open = true;
        tracing::info!(loop_count = 1, "memory wipe: soft reset");
        fresh
    } else {
        let mut next = state.clone();
        next.loop_count = 2;
        next.stage = Stage::HostileLockdown;
        next.boss = BossState::fresh(tuning.boss_max_hp);
        next.riley_dead = false;
        next.chat_options.clear();
        next.branch_tail = 0;
        next.chat_queue = script.entry_steps(Entry::Lockdown).into();
        next.chat_open = true;
        tracing::info!(loop_count = 2, "memory wipe: hostile lockdown");
        next
    };
    Some(next)
}

/// Enter the terminal ending. A second dispatch is a no-op.
pub(super) fn true_escape(state: &GameState, script: &Script, tuning: &Tuning) -> Option<GameState> {
    if state.stage == Stage::Purified {
        return None;
    }
    let mut next = state.clone();
    next.stage = Stage::Purified;
    next.riley_dead = true;
    next.chat_open = false;
    next.chat_options.clear();
    next.branch_tail = 0;
    next.chat_queue = script.entry_steps(Entry::Escape).into();
    next.boss = BossState::fresh(tuning.boss_max_hp);
    tracing::info!("true escape");
    Some(next)
}
