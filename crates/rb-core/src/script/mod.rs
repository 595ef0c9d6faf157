//! Dialogue script: a map of node ids to step lists plus named entry points.
//!
//! Nodes are the unit of branching. Choosing an option replaces the rest of
//! the dialogue queue with the steps of the option's `next_node`. Stage
//! announcements live in nodes named `on:<STAGE_NAME>`.

mod content;

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dialogue::{ActionStepKind, DialogueStep};
use crate::error::{CoreError, CoreResult};
use crate::stage::Stage;

/// A named entry point into the script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    /// Opening of a brand-new game.
    Intro,
    /// Opening after the first loop reset.
    LoopIntro,
    /// Opening of the hostile lockdown.
    Lockdown,
    /// Boss introduction for a player with non-negative karma.
    BossIntroBenevolent,
    /// Boss introduction for a player with negative karma.
    BossIntroHostile,
    /// Epilogue after the true escape.
    Escape,
}

impl Entry {
    /// Every entry point.
    pub const ALL: [Entry; 6] = [
        Entry::Intro,
        Entry::LoopIntro,
        Entry::Lockdown,
        Entry::BossIntroBenevolent,
        Entry::BossIntroHostile,
        Entry::Escape,
    ];

    /// The snake_case name of the entry point.
    pub fn name(self) -> &'static str {
        match self {
            Self::Intro => "intro",
            Self::LoopIntro => "loop_intro",
            Self::Lockdown => "lockdown",
            Self::BossIntroBenevolent => "boss_intro_benevolent",
            Self::BossIntroHostile => "boss_intro_hostile",
            Self::Escape => "escape",
        }
    }
}

/// Node ids for each entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPoints {
    /// See [`Entry::Intro`].
    pub intro: String,
    /// See [`Entry::LoopIntro`].
    pub loop_intro: String,
    /// See [`Entry::Lockdown`].
    pub lockdown: String,
    /// See [`Entry::BossIntroBenevolent`].
    pub boss_intro_benevolent: String,
    /// See [`Entry::BossIntroHostile`].
    pub boss_intro_hostile: String,
    /// See [`Entry::Escape`].
    pub escape: String,
}

impl Default for EntryPoints {
    fn default() -> Self {
        Self {
            intro: Entry::Intro.name().to_string(),
            loop_intro: Entry::LoopIntro.name().to_string(),
            lockdown: Entry::Lockdown.name().to_string(),
            boss_intro_benevolent: Entry::BossIntroBenevolent.name().to_string(),
            boss_intro_hostile: Entry::BossIntroHostile.name().to_string(),
            escape: Entry::Escape.name().to_string(),
        }
    }
}

impl EntryPoints {
    /// The node id for an entry point.
    pub fn get(&self, entry: Entry) -> &str {
        match entry {
            Entry::Intro => &self.intro,
            Entry::LoopIntro => &self.loop_intro,
            Entry::Lockdown => &self.lockdown,
            Entry::BossIntroBenevolent => &self.boss_intro_benevolent,
            Entry::BossIntroHostile => &self.boss_intro_hostile,
            Entry::Escape => &self.escape,
        }
    }
}

/// A complete dialogue script.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Script {
    /// Named entry points.
    #[serde(default)]
    pub entries: EntryPoints,
    /// Node id to steps.
    pub nodes: BTreeMap<String, Vec<DialogueStep>>,
}

impl Script {
    /// Create an empty script with default entry names.
    pub fn new() -> Self {
        Self::default()
    }

    /// The shipped narrative.
    pub fn builtin() -> Self {
        content::builtin()
    }

    /// Add or replace a node.
    pub fn with_node(mut self, id: impl Into<String>, steps: Vec<DialogueStep>) -> Self {
        self.nodes.insert(id.into(), steps);
        self
    }

    /// The node id announcing a stage.
    pub fn stage_node_id(stage: Stage) -> String {
        format!("on:{}", stage.name())
    }

    /// Steps of a node, if it exists.
    pub fn steps(&self, node: &str) -> Option<&[DialogueStep]> {
        self.nodes.get(node).map(Vec::as_slice)
    }

    /// Steps of an entry point, empty if its node is missing.
    pub fn entry_steps(&self, entry: Entry) -> Vec<DialogueStep> {
        self.branch(self.entries.get(entry))
    }

    /// Steps announcing a stage, if the script has any.
    pub fn stage_steps(&self, stage: Stage) -> Option<&[DialogueStep]> {
        self.steps(&Self::stage_node_id(stage))
    }

    /// Steps of a branch target. A missing node yields an empty branch,
    /// which stalls the dialogue instead of failing.
    pub fn branch(&self, node: &str) -> Vec<DialogueStep> {
        match self.nodes.get(node) {
            Some(steps) => steps.clone(),
            None => {
                tracing::warn!(node, "dialogue node not found; branch is empty");
                Vec::new()
            }
        }
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the script has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every action step in the script, with the node that holds it.
    pub fn action_steps(&self) -> impl Iterator<Item = (&str, &crate::dialogue::ActionStep)> {
        self.nodes.iter().flat_map(|(id, steps)| {
            steps.iter().filter_map(move |step| match step {
                DialogueStep::Action(action) => Some((id.as_str(), action)),
                _ => None,
            })
        })
    }

    /// Check referential integrity. Returns every problem found.
    pub fn validate(&self) -> Vec<CoreError> {
        let mut errors = Vec::new();

        for entry in Entry::ALL {
            let node = self.entries.get(entry);
            if !self.nodes.contains_key(node) {
                errors.push(CoreError::MissingEntry {
                    entry: entry.name().to_string(),
                    node: node.to_string(),
                });
            }
        }

        for (id, steps) in &self.nodes {
            for step in steps {
                match step {
                    DialogueStep::Options { choices } => {
                        if choices.is_empty() {
                            errors.push(CoreError::EmptyOptions(id.clone()));
                        }
                        let mut seen = BTreeSet::new();
                        for choice in choices {
                            if !seen.insert(choice.choice_id.as_str()) {
                                errors.push(CoreError::DuplicateChoice {
                                    node: id.clone(),
                                    choice: choice.choice_id.clone(),
                                });
                            }
                            if !self.nodes.contains_key(&choice.next_node) {
                                errors.push(CoreError::UnresolvedNode {
                                    node: id.clone(),
                                    choice: choice.choice_id.clone(),
                                    target: choice.next_node.clone(),
                                });
                            }
                        }
                    }
                    DialogueStep::Action(action)
                        if action.kind == ActionStepKind::SetStage
                            && action.payload.stage.is_none() =>
                    {
                        errors.push(CoreError::MissingStage {
                            node: id.clone(),
                            kind: action.kind,
                        });
                    }
                    _ => {}
                }
            }
        }

        errors
    }

    /// Parse a script from JSON.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the script as pretty JSON.
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a script from a JSON file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}
