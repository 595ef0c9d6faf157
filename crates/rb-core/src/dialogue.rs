//! Dialogue data: queued steps, choices and transcript lines.

use serde::{Deserialize, Serialize};

use crate::stage::Stage;

/// Who said a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    /// The antagonist.
    Riley,
    /// The player.
    Player,
    /// The machine itself.
    System,
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Riley => write!(f, "RILEY"),
            Self::Player => write!(f, "YOU"),
            Self::System => write!(f, "SYSTEM"),
        }
    }
}

/// A committed transcript line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who said it.
    pub sender: Sender,
    /// What was said.
    pub text: String,
}

/// One selectable option at a branch point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatChoice {
    /// Text shown to the player and echoed into the transcript.
    pub text: String,
    /// Script node whose steps replace the queue when chosen.
    pub next_node: String,
    /// Stable id recorded in the durable choice history.
    pub choice_id: String,
    /// Signed rapport/karma delta applied when chosen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rapport_boost: Option<i32>,
    /// Minimum rapport required to pick this option.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub req_rapport: Option<i32>,
}

impl ChatChoice {
    /// Create a choice leading to `next_node`.
    pub fn new(
        choice_id: impl Into<String>,
        text: impl Into<String>,
        next_node: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            next_node: next_node.into(),
            choice_id: choice_id.into(),
            rapport_boost: None,
            req_rapport: None,
        }
    }

    /// Set the rapport delta.
    pub fn with_boost(mut self, boost: i32) -> Self {
        self.rapport_boost = Some(boost);
        self
    }

    /// Require a minimum rapport.
    pub fn requires(mut self, rapport: i32) -> Self {
        self.req_rapport = Some(rapport);
        self
    }

    /// Whether the choice is available at the given rapport.
    pub fn unlocked_at(&self, rapport: i32) -> bool {
        self.req_rapport.is_none_or(|req| rapport >= req)
    }
}

/// The closed set of side effects a dialogue step can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionStepKind {
    /// Close the chat surface.
    CloseChat,
    /// Open the handbook sidebar.
    OpenSidebar,
    /// Force a stage (requires a stage payload).
    SetStage,
    /// Run the loop reset.
    GaslightReset,
    /// Run the true escape.
    TrueEscape,
    /// Flag the ARIA reveal.
    SetAriaRevealed,
    /// Draw the rabbit. Presentation only.
    ShowAsciiRabbit,
    /// Start the boss introduction.
    EnterBossIntro,
}

impl ActionStepKind {
    /// Every step kind.
    pub const ALL: [ActionStepKind; 8] = [
        ActionStepKind::CloseChat,
        ActionStepKind::OpenSidebar,
        ActionStepKind::SetStage,
        ActionStepKind::GaslightReset,
        ActionStepKind::TrueEscape,
        ActionStepKind::SetAriaRevealed,
        ActionStepKind::ShowAsciiRabbit,
        ActionStepKind::EnterBossIntro,
    ];

    /// The wire name of the kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::CloseChat => "CLOSE_CHAT",
            Self::OpenSidebar => "OPEN_SIDEBAR",
            Self::SetStage => "SET_STAGE",
            Self::GaslightReset => "GASLIGHT_RESET",
            Self::TrueEscape => "TRUE_ESCAPE",
            Self::SetAriaRevealed => "SET_ARIA_REVEALED",
            Self::ShowAsciiRabbit => "SHOW_ASCII_RABBIT",
            Self::EnterBossIntro => "ENTER_BOSS_INTRO",
        }
    }
}

impl std::fmt::Display for ActionStepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Optional parameters of an action step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepPayload {
    /// Target stage for `SET_STAGE`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<Stage>,
    /// Run the transition as a follow-up after this many milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_ms: Option<u64>,
    /// Pulse the screen jitter effect with this intensity first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jitter: Option<u8>,
}

impl StepPayload {
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A side-effecting dialogue step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionStep {
    /// What to do.
    pub kind: ActionStepKind,
    /// How to do it.
    #[serde(default, skip_serializing_if = "StepPayload::is_empty")]
    pub payload: StepPayload,
}

impl ActionStep {
    /// Create a step with an empty payload.
    pub fn new(kind: ActionStepKind) -> Self {
        Self {
            kind,
            payload: StepPayload::default(),
        }
    }

    /// Set the stage payload.
    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.payload.stage = Some(stage);
        self
    }

    /// Delay the transition.
    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.payload.delay_ms = Some(delay_ms);
        self
    }

    /// Pulse the jitter effect.
    pub fn with_jitter(mut self, intensity: u8) -> Self {
        self.payload.jitter = Some(intensity);
        self
    }
}

/// One unit of queued narrative content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DialogueStep {
    /// A line revealed after the typing delay.
    Message {
        /// Who says it.
        sender: Sender,
        /// The line.
        text: String,
    },
    /// A branch point that blocks draining until the player picks.
    Options {
        /// Available choices.
        choices: Vec<ChatChoice>,
    },
    /// A side effect.
    Action(ActionStep),
}

impl DialogueStep {
    /// A line from the antagonist.
    pub fn riley(text: impl Into<String>) -> Self {
        Self::Message {
            sender: Sender::Riley,
            text: text.into(),
        }
    }

    /// A line from the machine.
    pub fn system(text: impl Into<String>) -> Self {
        Self::Message {
            sender: Sender::System,
            text: text.into(),
        }
    }

    /// A branch point.
    pub fn options(choices: Vec<ChatChoice>) -> Self {
        Self::Options { choices }
    }

    /// An action step with no payload.
    pub fn action(kind: ActionStepKind) -> Self {
        Self::Action(ActionStep::new(kind))
    }

    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Message { .. } => "message",
            Self::Options { .. } => "options",
            Self::Action(_) => "action",
        }
    }
}

impl From<ActionStep> for DialogueStep {
    fn from(step: ActionStep) -> Self {
        Self::Action(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choice_gating() {
        let open = ChatChoice::new("a", "Hi", "n");
        assert!(open.unlocked_at(-5));

        let gated = ChatChoice::new("b", "I forgive you", "n").requires(5);
        assert!(!gated.unlocked_at(4));
        assert!(gated.unlocked_at(5));
    }

    #[test]
    fn step_json_shape() {
        let step: DialogueStep = ActionStep::new(ActionStepKind::SetStage)
            .with_stage(Stage::BossFight)
            .into();
        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(json["type"], "action");
        assert_eq!(json["kind"], "SET_STAGE");
        assert_eq!(json["payload"]["stage"], "BOSS_FIGHT");

        let bare = serde_json::to_value(DialogueStep::action(ActionStepKind::CloseChat)).unwrap();
        assert!(bare.get("payload").is_none());
    }

    #[test]
    fn options_parse_from_camel_case() {
        let json = r#"{"type":"options","choices":[
            {"text":"Yes","nextNode":"yes","choiceId":"c1","rapportBoost":2}
        ]}"#;
        let step: DialogueStep = serde_json::from_str(json).unwrap();
        let DialogueStep::Options { choices } = step else {
            panic!("expected options");
        };
        assert_eq!(choices[0].next_node, "yes");
        assert_eq!(choices[0].rapport_boost, Some(2));
        assert_eq!(choices[0].req_rapport, None);
    }
}
