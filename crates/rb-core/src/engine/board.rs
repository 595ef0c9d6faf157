//! Power, bit-parity, resonance and forced stage changes.

use rand::Rng;
use rand::rngs::StdRng;

use crate::stage::Stage;
use crate::state::{Bits, GameState};
use crate::tuning::BIT_COUNT;

use super::roll;

pub(super) fn random_bits(rng: &mut StdRng) -> Bits {
    let mut bits = [false; BIT_COUNT];
    for bit in &mut bits {
        *bit = rng.random();
    }
    bits
}

pub(super) fn engage_power(state: &GameState) -> Option<GameState> {
    if state.power_on {
        return None;
    }
    let mut next = state.clone();
    let current = state.bits;
    next.target_bits = roll(&mut next, |rng| {
        let mut target = random_bits(rng);
        if target == current {
            let i = rng.random_range(0..BIT_COUNT);
            target[i] = !target[i];
        }
        target
    });
    next.power_on = true;
    next.stage = Stage::HardwareCalibration;
    Some(next)
}

pub(super) fn flip_bit(state: &GameState, index: usize) -> Option<GameState> {
    if matches!(state.stage, Stage::PowerOff | Stage::HostileLockdown) || index >= BIT_COUNT {
        return None;
    }
    let mut next = state.clone();
    next.bits[index] = !next.bits[index];
    let matched = next.bits_match();
    match next.stage {
        Stage::HardwareCalibration if matched => next.stage = Stage::Resonance,
        Stage::Resonance | Stage::Handshake if !matched => {
            next.stage = Stage::HardwareCalibration;
        }
        _ => {}
    }
    Some(next)
}

pub(super) fn set_resonance(state: &GameState, hz: u32) -> Option<GameState> {
    if state.stage < Stage::Resonance || state.resonance_hz == hz {
        return None;
    }
    let mut next = state.clone();
    next.resonance_hz = hz;
    Some(next)
}

pub(super) fn calibrate(state: &GameState, hz: u32) -> Option<GameState> {
    if !state.power_on || state.progress.calibrated_freqs.contains(&hz) {
        return None;
    }
    let mut next = state.clone();
    next.progress.calibrated_freqs.insert(hz);
    Some(next)
}

/// Move `from -> to`, only while in `from`.
pub(super) fn advance(state: &GameState, from: Stage, to: Stage) -> Option<GameState> {
    if state.stage != from {
        return None;
    }
    let mut next = state.clone();
    next.stage = to;
    Some(next)
}

pub(super) fn force_stage(state: &GameState, stage: Stage) -> Option<GameState> {
    if state.stage == stage || state.stage.is_terminal() {
        return None;
    }
    let mut next = state.clone();
    next.stage = stage;
    Some(next)
}
