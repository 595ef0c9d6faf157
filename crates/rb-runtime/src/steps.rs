//! The explicit mapping from dialogue action steps to engine transitions.
//!
//! Every [`ActionStepKind`] has one builder. [`StepTable::validate`] is run
//! against a script at load time, so an unmapped kind or a step with a
//! missing payload is reported before play rather than mid-dialogue.

use std::collections::HashMap;

use rb_core::{Action, ActionStep, ActionStepKind, Script, Stage};

use crate::bus::GameEvent;
use crate::error::{RuntimeError, RuntimeResult};

/// Transitions delayed by a step payload.
#[derive(Debug, Clone, PartialEq)]
pub struct FollowUp {
    /// Delay from the moment the step is processed.
    pub delay_ms: u64,
    /// Actions to dispatch when it fires.
    pub actions: Vec<Action>,
}

/// What one action step expands to.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StepPlan {
    /// Dispatched immediately, in order.
    pub actions: Vec<Action>,
    /// Published immediately, before the actions.
    pub events: Vec<GameEvent>,
    /// Dispatched later instead of `actions`.
    pub follow_up: Option<FollowUp>,
}

/// Builds the base plan of a step kind, before payload modifiers.
pub type StepBuilder = fn(&ActionStep) -> RuntimeResult<StepPlan>;

/// Kind → builder lookup.
#[derive(Debug, Clone)]
pub struct StepTable {
    builders: HashMap<ActionStepKind, StepBuilder>,
}

fn dispatch(action: Action) -> RuntimeResult<StepPlan> {
    Ok(StepPlan {
        actions: vec![action],
        ..StepPlan::default()
    })
}

fn set_stage(step: &ActionStep) -> RuntimeResult<StepPlan> {
    match step.payload.stage {
        // The fight needs its phase state initialized, not just the stage.
        Some(Stage::BossFight) => dispatch(Action::EnterBossFight),
        Some(stage) => dispatch(Action::SetStage(stage)),
        None => Err(RuntimeError::MissingStagePayload(step.kind)),
    }
}

impl StepTable {
    /// A table with no builders.
    pub fn empty() -> Self {
        Self {
            builders: HashMap::new(),
        }
    }

    /// The shipped mapping covering every kind.
    pub fn standard() -> Self {
        Self::empty()
            .with_builder(ActionStepKind::CloseChat, |_| dispatch(Action::CloseChat))
            .with_builder(ActionStepKind::OpenSidebar, |_| {
                dispatch(Action::OpenSidebar)
            })
            .with_builder(ActionStepKind::SetStage, set_stage)
            .with_builder(ActionStepKind::GaslightReset, |_| {
                dispatch(Action::DoGaslightReset)
            })
            .with_builder(ActionStepKind::TrueEscape, |_| dispatch(Action::TrueEscape))
            .with_builder(ActionStepKind::SetAriaRevealed, |_| {
                dispatch(Action::SetAriaRevealed)
            })
            .with_builder(ActionStepKind::ShowAsciiRabbit, |_| {
                Ok(StepPlan {
                    events: vec![GameEvent::AsciiRabbit],
                    ..StepPlan::default()
                })
            })
            .with_builder(ActionStepKind::EnterBossIntro, |_| {
                dispatch(Action::EnterBossIntro)
            })
    }

    /// Register or replace the builder of a kind.
    pub fn with_builder(mut self, kind: ActionStepKind, builder: StepBuilder) -> Self {
        self.builders.insert(kind, builder);
        self
    }

    /// Expand a step, applying its `jitter` and `delay_ms` modifiers.
    pub fn plan(&self, step: &ActionStep) -> RuntimeResult<StepPlan> {
        let builder = self
            .builders
            .get(&step.kind)
            .ok_or(RuntimeError::UnmappedStep(step.kind))?;
        let mut plan = builder(step)?;
        if let Some(intensity) = step.payload.jitter {
            plan.events
                .insert(0, GameEvent::ScreenJitter { intensity });
        }
        if let Some(delay_ms) = step.payload.delay_ms
            && !plan.actions.is_empty()
        {
            plan.follow_up = Some(FollowUp {
                delay_ms,
                actions: std::mem::take(&mut plan.actions),
            });
        }
        Ok(plan)
    }

    /// Check kind coverage and that every action step in `script` builds.
    pub fn validate(&self, script: &Script) -> Vec<RuntimeError> {
        let mut errors: Vec<RuntimeError> = ActionStepKind::ALL
            .iter()
            .filter(|kind| !self.builders.contains_key(kind))
            .map(|&kind| RuntimeError::UnmappedStep(kind))
            .collect();
        for (node, step) in script.action_steps() {
            if let Err(e) = self.plan(step) {
                errors.push(RuntimeError::InvalidStep {
                    node: node.to_string(),
                    reason: e.to_string(),
                });
            }
        }
        errors
    }
}

impl Default for StepTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rb_core::DialogueStep;

    #[test]
    fn standard_table_covers_builtin_script() {
        let errors = StepTable::standard().validate(&Script::builtin());
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn empty_table_reports_every_kind() {
        let errors = StepTable::empty().validate(&Script::new());
        assert_eq!(errors.len(), ActionStepKind::ALL.len());
    }

    #[test]
    fn boss_fight_stage_enters_fight() {
        let step = ActionStep::new(ActionStepKind::SetStage).with_stage(Stage::BossFight);
        let plan = StepTable::standard().plan(&step).unwrap();
        assert_eq!(plan.actions, vec![Action::EnterBossFight]);

        let step = ActionStep::new(ActionStepKind::SetStage).with_stage(Stage::Unlocked);
        let plan = StepTable::standard().plan(&step).unwrap();
        assert_eq!(plan.actions, vec![Action::SetStage(Stage::Unlocked)]);
    }

    #[test]
    fn stage_payload_is_required() {
        let script = Script::new().with_node(
            "broken",
            vec![DialogueStep::action(ActionStepKind::SetStage)],
        );
        let errors = StepTable::standard().validate(&script);
        assert!(matches!(
            errors.as_slice(),
            [RuntimeError::InvalidStep { node, .. }] if node == "broken"
        ));
    }

    #[test]
    fn modifiers_apply() {
        let step = ActionStep::new(ActionStepKind::GaslightReset)
            .with_delay(2500)
            .with_jitter(3);
        let plan = StepTable::standard().plan(&step).unwrap();
        assert!(plan.actions.is_empty());
        assert_eq!(plan.events, vec![GameEvent::ScreenJitter { intensity: 3 }]);
        assert_eq!(
            plan.follow_up,
            Some(FollowUp {
                delay_ms: 2500,
                actions: vec![Action::DoGaslightReset],
            })
        );
    }

    #[test]
    fn rabbit_is_presentation_only() {
        let step = ActionStep::new(ActionStepKind::ShowAsciiRabbit).with_delay(100);
        let plan = StepTable::standard().plan(&step).unwrap();
        assert!(plan.actions.is_empty());
        assert!(plan.follow_up.is_none());
        assert_eq!(plan.events, vec![GameEvent::AsciiRabbit]);
    }
}
