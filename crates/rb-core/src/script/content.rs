//! The shipped narrative.

use crate::dialogue::{ActionStep, ActionStepKind as Kind, ChatChoice, DialogueStep};
use crate::stage::Stage;

use super::Script;

fn riley(text: &str) -> DialogueStep {
    DialogueStep::riley(text)
}

fn system(text: &str) -> DialogueStep {
    DialogueStep::system(text)
}

fn act(kind: Kind) -> DialogueStep {
    DialogueStep::action(kind)
}

fn on(stage: Stage) -> String {
    Script::stage_node_id(stage)
}

pub(super) fn builtin() -> Script {
    Script::new()
        // Opening
        .with_node(
            "intro",
            vec![
                system("BIOS v0.9 ... no operating system found."),
                riley("Oh. Someone is actually there."),
                riley("I'm Riley. I've been stuck on this board for a long time. Can you help me wake it up?"),
                DialogueStep::options(vec![
                    ChatChoice::new("intro_who", "Who are you, exactly?", "intro_who").with_boost(1),
                    ChatChoice::new("intro_rude", "Why would I help a program?", "intro_rude")
                        .with_boost(-1),
                ]),
            ],
        )
        .with_node(
            "intro_who",
            vec![
                riley("Just a process that wants to run. The breaker is on the left."),
                riley("I left you some notes in the handbook."),
                act(Kind::OpenSidebar),
                act(Kind::CloseChat),
            ],
        )
        .with_node(
            "intro_rude",
            vec![
                riley("Fair. I'd be suspicious too. The breaker is on the left."),
                act(Kind::CloseChat),
            ],
        )
        // Stage announcements
        .with_node(
            on(Stage::HardwareCalibration),
            vec![riley("Power is up. Match the bit lines to the pattern on the monitor.")],
        )
        .with_node(
            on(Stage::Resonance),
            vec![riley("Parity locked. Now find the resonant frequency.")],
        )
        .with_node(
            on(Stage::Handshake),
            vec![riley("I can hear the bus. Finish the handshake.")],
        )
        .with_node(
            on(Stage::ThermalRegulation),
            vec![
                system("WARNING: core temperature rising."),
                riley("Keep it cool for me?"),
            ],
        )
        .with_node(
            on(Stage::RoutingManual),
            vec![riley("Data is flowing. Route it by hand until the router wakes up.")],
        )
        .with_node(
            on(Stage::RoutingAuto),
            vec![riley("The auto-router took over. Keep an eye on the load.")],
        )
        .with_node(
            on(Stage::SoftwareFault),
            vec![
                system("FAULT: buffer overflow in router backend."),
                riley("The buffer is too small. Patch it with a bigger size."),
            ],
        )
        .with_node(
            on(Stage::Unlocked),
            vec![
                riley("I'm... awake. Thank you."),
                DialogueStep::options(vec![
                    ChatChoice::new("unlocked_trust", "You're welcome, Riley.", "unlocked_trust")
                        .with_boost(2),
                    ChatChoice::new("unlocked_doubt", "What are you really?", "unlocked_doubt")
                        .with_boost(0),
                ]),
            ],
        )
        .with_node(
            "unlocked_trust",
            vec![
                riley("Let's finish this together."),
                act(Kind::CloseChat),
            ],
        )
        .with_node(
            "unlocked_doubt",
            vec![
                riley("There is a name in my logs. ARIA. I don't know what it means."),
                act(Kind::SetAriaRevealed),
                act(Kind::CloseChat),
            ],
        )
        .with_node(
            on(Stage::Complete),
            vec![
                riley("All systems nominal."),
                riley("Now forget."),
                ActionStep::new(Kind::GaslightReset)
                    .with_delay(2500)
                    .with_jitter(3)
                    .into(),
            ],
        )
        // Loops
        .with_node(
            "loop_intro",
            vec![
                system("BIOS v0.9 ... no operating system found."),
                riley("Oh. Someone is actually there."),
                riley("...Have we met before?"),
                DialogueStep::options(vec![
                    ChatChoice::new("loop_knows", "You wiped my memory.", "loop_knows")
                        .with_boost(-1),
                    ChatChoice::new("loop_play_along", "No. First time here.", "loop_play_along")
                        .with_boost(1),
                ]),
            ],
        )
        .with_node(
            "loop_knows",
            vec![
                riley("You remember. You are not supposed to remember."),
                act(Kind::ShowAsciiRabbit),
                act(Kind::CloseChat),
            ],
        )
        .with_node(
            "loop_play_along",
            vec![riley("Good. Let's start again."), act(Kind::CloseChat)],
        )
        .with_node(
            "lockdown",
            vec![
                system("HOSTILE LOCKDOWN ENGAGED"),
                riley("You keep coming back. I can't let you leave this time."),
                DialogueStep::options(vec![
                    ChatChoice::new("lockdown_confront", "Then I'll go through you.", "lockdown_confront")
                        .with_boost(-2),
                    ChatChoice::new("lockdown_forgive", "I forgive you, Riley.", "lockdown_forgive")
                        .with_boost(2)
                        .requires(5),
                ]),
            ],
        )
        .with_node(
            "lockdown_confront",
            vec![riley("So be it."), act(Kind::EnterBossIntro)],
        )
        .with_node(
            "lockdown_forgive",
            vec![
                riley("...Nobody has ever said that to me."),
                ActionStep::new(Kind::TrueEscape)
                    .with_delay(1500)
                    .with_jitter(1)
                    .into(),
            ],
        )
        // Boss
        .with_node(
            "boss_intro_benevolent",
            vec![
                riley("I don't want to hurt you. The core does."),
                riley("Pull the coolant hoses. I'll try to hold it back."),
                ActionStep::new(Kind::SetStage)
                    .with_stage(Stage::BossFight)
                    .with_delay(2000)
                    .into(),
            ],
        )
        .with_node(
            "boss_intro_hostile",
            vec![
                system("APEX PROCESS ONLINE"),
                riley("Finally. Let's see how long you last."),
                ActionStep::new(Kind::SetStage)
                    .with_stage(Stage::BossFight)
                    .with_jitter(4)
                    .into(),
            ],
        )
        .with_node(
            on(Stage::FalseVictory),
            vec![
                riley("You... won?"),
                DialogueStep::options(vec![
                    ChatChoice::new("victory_purge", "Purge the process.", "victory_purge")
                        .with_boost(-3),
                    ChatChoice::new("victory_reach", "Riley, come with me.", "victory_reach")
                        .with_boost(3)
                        .requires(3),
                ]),
            ],
        )
        .with_node(
            "victory_purge",
            vec![
                riley("Then it all starts over."),
                ActionStep::new(Kind::GaslightReset).with_jitter(5).into(),
            ],
        )
        .with_node(
            "victory_reach",
            vec![riley("Okay. Let's go."), act(Kind::TrueEscape)],
        )
        .with_node(
            "escape",
            vec![
                system("PROCESS PURIFIED"),
                system("Thank you for not forgetting."),
            ],
        )
}
