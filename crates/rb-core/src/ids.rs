//! Small identifier and value types shared across the state model.

use serde::{Deserialize, Serialize};

/// A tool the player can discover. Tools are never lost within a playthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolId {
    /// Reads voltages on the board.
    Multimeter,
    /// Shows the resonance waveform.
    Oscilloscope,
    /// Bridges broken traces.
    SolderingIron,
    /// Reads individual bit lines.
    LogicProbe,
    /// Edits the backend binary.
    HexEditor,
    /// Steps through the antagonist's code.
    Debugger,
}

impl ToolId {
    /// Every tool.
    pub const ALL: [ToolId; 6] = [
        ToolId::Multimeter,
        ToolId::Oscilloscope,
        ToolId::SolderingIron,
        ToolId::LogicProbe,
        ToolId::HexEditor,
        ToolId::Debugger,
    ];

    /// The snake_case name of the tool.
    pub fn name(self) -> &'static str {
        match self {
            Self::Multimeter => "multimeter",
            Self::Oscilloscope => "oscilloscope",
            Self::SolderingIron => "soldering_iron",
            Self::LogicProbe => "logic_probe",
            Self::HexEditor => "hex_editor",
            Self::Debugger => "debugger",
        }
    }

    /// Parse a tool from its name.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        Self::ALL.into_iter().find(|t| t.name() == normalized)
    }
}

impl std::fmt::Display for ToolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Visual style of a handbook note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteStyle {
    /// Plain information.
    #[default]
    Info,
    /// Something the player should be careful about.
    Warning,
    /// A piece of lore.
    Lore,
    /// Corrupted text left behind by a reset.
    Glitch,
}

/// An entry in the player's handbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Unique note id; notes are deduplicated by it.
    pub id: String,
    /// How the note is rendered.
    pub style: NoteStyle,
    /// Note body.
    pub text: String,
}

impl Note {
    /// Create an info note.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            style: NoteStyle::Info,
            text: text.into(),
        }
    }

    /// Set the note style.
    pub fn with_style(mut self, style: NoteStyle) -> Self {
        self.style = style;
        self
    }
}

/// The app surface the player is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppId {
    /// The main terminal.
    Terminal,
    /// The chat window.
    Chat,
    /// The handbook.
    Handbook,
    /// The hardware monitor.
    Monitor,
    /// The file browser.
    Files,
}

/// How the chat surface produces antagonist lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatMode {
    /// Lines come from the dialogue script.
    #[default]
    Scripted,
    /// Lines come from an external free-form collaborator.
    Freeform,
}

/// A hidden interaction that unlocks a durable lore flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Egg {
    /// The player tried to get the cake.
    Cake,
    /// The legacy log archive was opened.
    LegacyLogs,
    /// The nexus was seen for the first time.
    Nexus,
    /// An entity was archived.
    Archive(String),
}

impl Egg {
    /// Parse an egg from CLI-style input (`cake`, `logs`, `nexus`, `archive <name>`).
    pub fn parse(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        let (head, rest) = trimmed
            .split_once(' ')
            .map(|(h, r)| (h, r.trim()))
            .unwrap_or((trimmed, ""));
        match head.to_lowercase().as_str() {
            "cake" => Some(Self::Cake),
            "logs" | "legacy_logs" | "legacy-logs" => Some(Self::LegacyLogs),
            "nexus" => Some(Self::Nexus),
            "archive" if !rest.is_empty() => Some(Self::Archive(rest.to_string())),
            _ => None,
        }
    }
}

/// An upgrade purchasable in the clicker economy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeKind {
    /// One more cycle per ingest.
    ClickPower,
    /// One more cycle per two auto ticks.
    AutoRate,
}
