//! The clicker economy and the backend patch.

use crate::ids::UpgradeKind;
use crate::stage::Stage;
use crate::state::GameState;
use crate::tuning::Tuning;

pub(super) fn ingest(state: &GameState, tuning: &Tuning) -> Option<GameState> {
    if !state.stage.routes_data() {
        return None;
    }
    let mut next = state.clone();
    let gain = f64::from(next.click_power);
    next.data_cycles += gain;
    next.currency += gain;
    if next.stage == Stage::RoutingManual && next.data_cycles >= tuning.routing_auto_threshold {
        next.stage = Stage::RoutingAuto;
        if next.auto_rate <= 0.0 {
            next.auto_rate = tuning.initial_auto_rate;
        }
    }
    Some(next)
}

pub(super) fn set_auto_rate(state: &GameState, rate: f64) -> Option<GameState> {
    if !state.stage.routes_data() || !rate.is_finite() || rate < 0.0 {
        return None;
    }
    let mut next = state.clone();
    next.auto_rate = rate;
    Some(next)
}

/// Price of the next upgrade of a kind.
pub(super) fn upgrade_cost(state: &GameState, kind: UpgradeKind, tuning: &Tuning) -> f64 {
    match kind {
        UpgradeKind::ClickPower => tuning.click_upgrade_cost * f64::from(state.click_power),
        UpgradeKind::AutoRate => tuning.auto_upgrade_cost * (state.auto_rate + 1.0),
    }
}

pub(super) fn buy_upgrade(
    state: &GameState,
    kind: UpgradeKind,
    tuning: &Tuning,
) -> Option<GameState> {
    if !state.stage.routes_data() {
        return None;
    }
    let cost = upgrade_cost(state, kind, tuning);
    if state.currency < cost {
        return None;
    }
    let mut next = state.clone();
    next.currency -= cost;
    match kind {
        UpgradeKind::ClickPower => next.click_power += 1,
        UpgradeKind::AutoRate => next.auto_rate += 1.0,
    }
    Some(next)
}

pub(super) fn auto_tick(state: &GameState, tuning: &Tuning) -> Option<GameState> {
    if !matches!(state.stage, Stage::RoutingAuto | Stage::Unlocked) || state.auto_rate <= 0.0 {
        return None;
    }
    let mut next = state.clone();
    let gain = next.auto_rate / 2.0;
    next.data_cycles += gain;
    next.currency += gain;
    if next.stage == Stage::RoutingAuto && next.data_cycles > tuning.fault_ceiling {
        next.stage = Stage::SoftwareFault;
        next.auto_rate = 0.0;
    }
    Some(next)
}

pub(super) fn apply_patch(state: &GameState, text: &str, tuning: &Tuning) -> Option<GameState> {
    if state.stage != Stage::SoftwareFault {
        return None;
    }
    let stripped: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if !stripped.contains(&tuning.patch_token) {
        return None;
    }
    let mut next = state.clone();
    next.auto_rate = tuning.patched_auto_rate;
    next.backend_patched = true;
    next.progress.backend_patch_count = next.progress.backend_patch_count.saturating_add(1);
    next.stage = Stage::Unlocked;
    Some(next)
}

pub(super) fn complete_game(state: &GameState) -> Option<GameState> {
    if state.stage != Stage::Unlocked {
        return None;
    }
    let mut next = state.clone();
    next.stage = Stage::Complete;
    next.game_complete = true;
    Some(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::engine::Engine;

    fn at(stage: Stage) -> GameState {
        let mut state = GameState::initial(0);
        state.power_on = true;
        state.stage = stage;
        state
    }

    fn ingest_n(engine: &Engine, mut state: GameState, n: usize) -> GameState {
        for _ in 0..n {
            state = engine.apply(&state, Action::IngestData);
        }
        state
    }

    #[test]
    fn ingest_ignored_early_and_during_fault() {
        let engine = Engine::builtin();
        for stage in [Stage::ThermalRegulation, Stage::SoftwareFault, Stage::HostileLockdown] {
            let state = at(stage);
            assert_eq!(engine.apply(&state, Action::IngestData), state);
        }
    }

    #[test]
    fn threshold_switches_to_auto() {
        let engine = Engine::builtin();
        let state = ingest_n(&engine, at(Stage::RoutingManual), 14);
        assert_eq!(state.stage, Stage::RoutingManual);
        assert_eq!(state.data_cycles, 14.0);
        let state = engine.apply(&state, Action::IngestData);
        assert_eq!(state.stage, Stage::RoutingAuto);
        assert_eq!(state.auto_rate, 1.0);
    }

    #[test]
    fn auto_tick_faults_past_ceiling() {
        let engine = Engine::builtin();
        let mut state = at(Stage::RoutingAuto);
        state.data_cycles = 59.0;
        state.auto_rate = 2.0;
        let state = engine.apply(&state, Action::AutoTick);
        assert_eq!(state.data_cycles, 60.0);
        assert_eq!(state.stage, Stage::RoutingAuto);
        let state = engine.apply(&state, Action::AutoTick);
        assert_eq!(state.stage, Stage::SoftwareFault);
        assert_eq!(state.auto_rate, 0.0);
        assert_eq!(engine.apply(&state, Action::AutoTick), state);
    }

    #[test]
    fn unlocked_tick_never_faults() {
        let engine = Engine::builtin();
        let mut state = at(Stage::Unlocked);
        state.data_cycles = 500.0;
        state.auto_rate = 4.0;
        let state = engine.apply(&state, Action::AutoTick);
        assert_eq!(state.stage, Stage::Unlocked);
        assert_eq!(state.data_cycles, 502.0);
    }

    #[test]
    fn patch_needs_token() {
        let engine = Engine::builtin();
        let state = at(Stage::SoftwareFault);
        assert_eq!(engine.apply(&state, Action::ApplyPatch("size = 512".into())), state);

        let patched = engine.apply(&state, Action::ApplyPatch("size = 10 24".into()));
        assert_eq!(patched.stage, Stage::Unlocked);
        assert!(patched.backend_patched);
        assert_eq!(patched.auto_rate, 4.0);
        assert_eq!(patched.progress.backend_patch_count, 1);
    }

    #[test]
    fn patch_outside_fault_is_noop() {
        let engine = Engine::builtin();
        let state = at(Stage::RoutingAuto);
        assert_eq!(engine.apply(&state, Action::ApplyPatch("1024".into())), state);
    }

    #[test]
    fn upgrades_spend_currency() {
        let engine = Engine::builtin();
        let mut state = at(Stage::RoutingManual);
        state.currency = 9.0;
        assert_eq!(
            engine.apply(&state, Action::BuyUpgrade(UpgradeKind::ClickPower)),
            state
        );

        state.currency = 40.0;
        let state = engine.apply(&state, Action::BuyUpgrade(UpgradeKind::ClickPower));
        assert_eq!(state.click_power, 2);
        assert_eq!(state.currency, 30.0);

        let state = engine.apply(&state, Action::BuyUpgrade(UpgradeKind::AutoRate));
        assert_eq!(state.auto_rate, 1.0);
        assert_eq!(state.currency, 15.0);
    }

    #[test]
    fn auto_rate_rejects_nonsense() {
        let engine = Engine::builtin();
        let state = at(Stage::RoutingAuto);
        assert_eq!(engine.apply(&state, Action::SetAutoRate(f64::NAN)), state);
        assert_eq!(engine.apply(&state, Action::SetAutoRate(-1.0)), state);
        assert_eq!(engine.apply(&state, Action::SetAutoRate(3.0)).auto_rate, 3.0);
    }

    #[test]
    fn complete_game_from_unlocked() {
        let engine = Engine::builtin();
        let state = engine.apply(&at(Stage::Unlocked), Action::CompleteGame);
        assert_eq!(state.stage, Stage::Complete);
        assert!(state.game_complete);
        assert_eq!(engine.apply(&state, Action::CompleteGame), state);
    }
}
