//! The three-phase boss encounter.
//!
//! Phase objectives: (1) both coolant hoses disconnected, (2) the node
//! order clicked without a mistake, (3) the valve inside its window and the
//! simon sequence echoed. A met objective completes its phase within the
//! same transition. Completing phase 3 lands on `FalseVictory`.

use rand::Rng;

use crate::script::{Entry, Script};
use crate::stage::Stage;
use crate::state::{BossState, GameState};
use crate::tuning::Tuning;

use super::roll;

const FINAL_PHASE: u8 = 3;

fn fighting(state: &GameState, phase: u8) -> bool {
    state.stage == Stage::BossFight && state.boss.phase == phase
}

pub(super) fn enter_intro(state: &GameState, tuning: &Tuning) -> Option<GameState> {
    if matches!(
        state.stage,
        Stage::BossIntro | Stage::BossFight | Stage::Purified
    ) {
        return None;
    }
    let mut next = state.clone();
    next.progress.apex_encounters = next.progress.apex_encounters.saturating_add(1);
    next.boss = BossState::fresh(tuning.boss_max_hp);
    next.stage = Stage::BossIntro;
    Some(next)
}

pub(super) fn enter_fight(state: &GameState, tuning: &Tuning) -> Option<GameState> {
    if state.stage != Stage::BossIntro {
        return None;
    }
    let mut next = state.clone();
    next.boss = BossState::fresh(tuning.boss_max_hp);
    next.boss.phase = 1;
    next.stage = Stage::BossFight;
    Some(next)
}

/// Advance one phase, clearing the per-phase sub-state.
fn complete_phase(next: &mut GameState, tuning: &Tuning) {
    let boss = &mut next.boss;
    boss.phase += 1;
    boss.hoses_connected = [true, true];
    boss.node_click_sequence.clear();
    boss.valve_percent = 0;
    boss.simon_sequence.clear();
    boss.simon_player_input.clear();

    if next.boss.phase == FINAL_PHASE {
        let (len, symbols) = (tuning.simon_length, tuning.simon_symbols.max(1));
        next.boss.simon_sequence =
            roll(next, |rng| (0..len).map(|_| rng.random_range(0..symbols)).collect());
    } else if next.boss.phase > FINAL_PHASE {
        next.stage = Stage::FalseVictory;
    }
}

pub(super) fn phase_complete(state: &GameState, tuning: &Tuning) -> Option<GameState> {
    if state.stage != Stage::BossFight || !(1..=FINAL_PHASE).contains(&state.boss.phase) {
        return None;
    }
    let mut next = state.clone();
    complete_phase(&mut next, tuning);
    Some(next)
}

/// Damage the player. Death re-arms the encounter and regresses to the lockdown.
pub(super) fn player_hit(
    state: &GameState,
    damage: i32,
    script: &Script,
    tuning: &Tuning,
) -> Option<GameState> {
    if state.stage != Stage::BossFight || damage <= 0 {
        return None;
    }
    let mut next = state.clone();
    next.boss.player_hp = next.boss.player_hp.saturating_sub(damage);
    if next.boss.player_hp <= 0 {
        tracing::info!(phase = state.boss.phase, "player died; back to lockdown");
        next.boss = BossState::fresh(tuning.boss_max_hp);
        next.stage = Stage::HostileLockdown;
        next.chat_options.clear();
        next.branch_tail = 0;
        next.chat_queue = script.entry_steps(Entry::Lockdown).into();
        next.chat_open = true;
    }
    Some(next)
}

pub(super) fn heal(state: &GameState, amount: i32, tuning: &Tuning) -> Option<GameState> {
    if state.stage != Stage::BossFight || amount <= 0 || state.boss.player_hp >= tuning.boss_max_hp
    {
        return None;
    }
    let mut next = state.clone();
    next.boss.player_hp = next.boss.player_hp.saturating_add(amount).min(tuning.boss_max_hp);
    Some(next)
}

pub(super) fn disconnect_hose(state: &GameState, index: usize, tuning: &Tuning) -> Option<GameState> {
    if !fighting(state, 1) || !state.boss.hoses_connected.get(index).copied().unwrap_or(false) {
        return None;
    }
    let mut next = state.clone();
    next.boss.hoses_connected[index] = false;
    if next.boss.hoses_connected.iter().all(|&c| !c) {
        complete_phase(&mut next, tuning);
    }
    Some(next)
}

pub(super) fn reconnect_hose(state: &GameState, index: usize) -> Option<GameState> {
    if !fighting(state, 1) || state.boss.hoses_connected.get(index).copied().unwrap_or(true) {
        return None;
    }
    let mut next = state.clone();
    next.boss.hoses_connected[index] = true;
    Some(next)
}

pub(super) fn click_node(state: &GameState, node: u8, tuning: &Tuning) -> Option<GameState> {
    if !fighting(state, 2) {
        return None;
    }
    let progress = state.boss.node_click_sequence.len();
    let expected = tuning.node_order.get(progress).copied();
    let mut next = state.clone();
    if expected == Some(node) {
        next.boss.node_click_sequence.push(node);
        if next.boss.node_click_sequence.len() == tuning.node_order.len() {
            complete_phase(&mut next, tuning);
        }
    } else if progress == 0 {
        return None;
    } else {
        next.boss.node_click_sequence.clear();
    }
    Some(next)
}

fn phase_three_met(boss: &BossState, tuning: &Tuning) -> bool {
    tuning.valve_in_window(boss.valve_percent)
        && !boss.simon_sequence.is_empty()
        && boss.simon_player_input == boss.simon_sequence
}

pub(super) fn set_valve(state: &GameState, percent: u8, tuning: &Tuning) -> Option<GameState> {
    if !fighting(state, 3) || percent > 100 || state.boss.valve_percent == percent {
        return None;
    }
    let mut next = state.clone();
    next.boss.valve_percent = percent;
    if phase_three_met(&next.boss, tuning) {
        complete_phase(&mut next, tuning);
    }
    Some(next)
}

pub(super) fn simon_input(state: &GameState, symbol: u8, tuning: &Tuning) -> Option<GameState> {
    if !fighting(state, 3) || symbol >= tuning.simon_symbols {
        return None;
    }
    let boss = &state.boss;
    let Some(&expected) = boss.simon_sequence.get(boss.simon_player_input.len()) else {
        return None;
    };
    let mut next = state.clone();
    if symbol == expected {
        next.boss.simon_player_input.push(symbol);
        if phase_three_met(&next.boss, tuning) {
            complete_phase(&mut next, tuning);
        }
    } else if boss.simon_player_input.is_empty() {
        return None;
    } else {
        next.boss.simon_player_input.clear();
    }
    Some(next)
}

/// The override code skips straight to the false victory once ARIA is known.
pub(super) fn enter_aria_code(state: &GameState, code: &str, tuning: &Tuning) -> Option<GameState> {
    if state.stage != Stage::BossFight
        || !state.progress.aria_revealed
        || !code.trim().eq_ignore_ascii_case(&tuning.aria_code)
    {
        return None;
    }
    let mut next = state.clone();
    next.boss = BossState::fresh(tuning.boss_max_hp);
    next.boss.phase = FINAL_PHASE + 1;
    next.boss.player_hp = state.boss.player_hp;
    next.stage = Stage::FalseVictory;
    Some(next)
}
