use std::io::{self, BufRead, Write};
use std::path::Path;
use std::str::FromStr;

use colored::Colorize;
use rb_core::{Action, Egg, GameState, Sender, Stage, ToolId, UpgradeKind};
use rb_mechanics::{StatKind, fate, karma_polar};
use rb_runtime::{EventBus, GameEvent, Session, SessionConfig};
use rb_save::{FileStore, SlotId, SlotStore};
use tokio::sync::broadcast::Receiver;
use tokio::sync::broadcast::error::TryRecvError;

const HELP: &str = "\
  Board      power | flip <bit> | tune <hz> | resonate | calibrate <hz>
             handshake | cool
  Router     ingest [n] | buy click|auto | patch <text> | finish
  Chat       choose <id> | chat
  Finds      tool <name> | egg <cake|logs|nexus|archive NAME>
  Boss       fight | hit <n> | heal <n> | hose <0|1> | node <n>
             valve <pct> | simon <d> | aria <code>
  Session    wait <ms> | status | stats | roll <stat> <dc>
             save <n> | load <slot> | new | help | quit";

/// Upper bound on `ingest <n>`.
const MAX_REPEAT: u32 = 1000;

const RABBIT: &str = r#"
      (\(\
      ( -.-)
      o_(\")(\")"#;

/// One line of player input.
#[derive(Debug, Clone, PartialEq)]
enum Input {
    Act(Action, u32),
    Wait(u64),
    Roll(StatKind, i32),
    Status,
    Chat,
    Stats,
    Save(u8),
    Load(SlotId),
    New,
    Help,
    Quit,
}

fn arg<T: FromStr>(value: &str, what: &str) -> Result<T, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("expected {what}, got '{}'", value.trim()))
}

fn required<'a>(rest: &'a str, usage: &str) -> Result<&'a str, String> {
    if rest.is_empty() {
        Err(format!("usage: {usage}"))
    } else {
        Ok(rest)
    }
}

fn parse_input(line: &str) -> Result<Input, String> {
    let line = line.trim();
    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map(|(v, r)| (v, r.trim()))
        .unwrap_or((line, ""));
    let act = |action: Action| -> Result<Input, String> { Ok(Input::Act(action, 1)) };

    match verb.to_lowercase().as_str() {
        "power" => act(Action::EngagePower),
        "flip" => act(Action::FlipBit(arg(required(rest, "flip <bit>")?, "a bit index")?)),
        "tune" => act(Action::SetResonance(arg(required(rest, "tune <hz>")?, "a frequency")?)),
        "resonate" => act(Action::AchieveResonance),
        "calibrate" => act(Action::CalibrateFreq(arg(
            required(rest, "calibrate <hz>")?,
            "a frequency",
        )?)),
        "handshake" => act(Action::CompleteHandshake),
        "cool" => act(Action::CompleteThermalTask),
        "ingest" => {
            let times = if rest.is_empty() { 1 } else { arg(rest, "a count")? };
            if !(1..=MAX_REPEAT).contains(&times) {
                return Err(format!("ingest count must be between 1 and {MAX_REPEAT}"));
            }
            Ok(Input::Act(Action::IngestData, times))
        }
        "buy" => match rest.to_lowercase().as_str() {
            "click" => act(Action::BuyUpgrade(UpgradeKind::ClickPower)),
            "auto" => act(Action::BuyUpgrade(UpgradeKind::AutoRate)),
            _ => Err("usage: buy click|auto".into()),
        },
        "patch" => act(Action::ApplyPatch(required(rest, "patch <text>")?.to_string())),
        "finish" => act(Action::CompleteGame),
        "choose" => act(Action::SelectChatOption(
            required(rest, "choose <id>")?.to_string(),
        )),
        "tool" => ToolId::parse(rest)
            .map(|tool| Input::Act(Action::FindTool(tool), 1))
            .ok_or_else(|| format!("unknown tool '{rest}'")),
        "egg" => Egg::parse(rest)
            .map(|egg| Input::Act(Action::TriggerEgg(egg), 1))
            .ok_or_else(|| "usage: egg <cake|logs|nexus|archive NAME>".to_string()),
        "fight" => act(Action::EnterBossIntro),
        "hit" => act(Action::PlayerHit(arg(required(rest, "hit <n>")?, "a number")?)),
        "heal" => act(Action::HealPlayer(arg(required(rest, "heal <n>")?, "a number")?)),
        "hose" => act(Action::DisconnectHose(arg(
            required(rest, "hose <0|1>")?,
            "a hose index",
        )?)),
        "node" => act(Action::ClickNode(arg(required(rest, "node <n>")?, "a node")?)),
        "valve" => act(Action::SetValve(arg(required(rest, "valve <pct>")?, "a percentage")?)),
        "simon" => act(Action::SimonInput(arg(required(rest, "simon <d>")?, "a symbol")?)),
        "aria" => act(Action::EnterAriaCode(required(rest, "aria <code>")?.to_string())),
        "wait" => Ok(Input::Wait(arg(required(rest, "wait <ms>")?, "milliseconds")?)),
        "roll" => {
            let usage = "roll <stat> <dc>";
            let (stat, dc) = required(rest, usage)?
                .split_once(char::is_whitespace)
                .ok_or_else(|| format!("usage: {usage}"))?;
            let stat = StatKind::parse(stat).map_err(|e| e.to_string())?;
            Ok(Input::Roll(stat, arg(dc, "a difficulty")?))
        }
        "status" => Ok(Input::Status),
        "chat" => Ok(Input::Chat),
        "stats" => Ok(Input::Stats),
        "save" => Ok(Input::Save(arg(required(rest, "save <n>")?, "a slot number")?)),
        "load" => SlotId::from_str(required(rest, "load <slot>")?)
            .map(Input::Load)
            .map_err(|e| e.to_string()),
        "new" => Ok(Input::New),
        "help" | "?" => Ok(Input::Help),
        "quit" | "q" | "exit" => Ok(Input::Quit),
        _ => Err(format!("unknown command '{verb}'. Type 'help'.")),
    }
}

pub fn run(dir: &Path, seed: u64, resume: bool, reveal_ms: u64) -> Result<(), String> {
    let config = SessionConfig::default()
        .with_seed(seed)
        .with_reveal_delay(reveal_ms);
    let bus = EventBus::new();
    let mut events = bus.subscribe();
    let mut session = Session::new(config, FileStore::new(dir)).with_sink(bus);

    println!("  {} Reboot", "Booting".bold());
    println!("  Seed: {seed} | Saves: {}", dir.display());
    if resume {
        if session.continue_game() {
            println!("  Resumed from the auto slot.");
        } else {
            println!("  {}", "No auto save to resume. Starting fresh.".yellow());
        }
    }
    println!("  Type 'help' for commands, 'quit' to exit.\n");

    session.settle();
    print_events(&mut events, session.state());

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break,
            Err(e) => return Err(e.to_string()),
            _ => {}
        }
        if line.trim().is_empty() {
            continue;
        }

        let input = match parse_input(&line) {
            Ok(input) => input,
            Err(e) => {
                println!("  {}\n", e.yellow());
                continue;
            }
        };
        if input == Input::Quit {
            break;
        }
        execute(&mut session, input);
        session.settle();
        print_events(&mut events, session.state());
        println!();
    }

    Ok(())
}

fn execute<S: SlotStore>(session: &mut Session<S>, input: Input) {
    match input {
        Input::Act(action, times) => {
            let mut changed = false;
            for _ in 0..times {
                changed |= session.dispatch(action.clone());
            }
            if !changed {
                println!("  {}", "Nothing happens.".dimmed());
            }
        }
        Input::Wait(ms) => session.advance(ms),
        Input::Roll(stat, dc) => {
            session.roll_check(stat, dc);
        }
        Input::Status => print_status(session),
        Input::Chat => print_chat(session.state()),
        Input::Stats => print_stats(session.state()),
        Input::Save(n) => {
            if let Err(e) = session.save_slot(n) {
                println!("  {}", e.to_string().yellow());
            }
        }
        Input::Load(slot) => {
            if !session.load_slot(slot) {
                println!("  {}", format!("Slot {slot} holds no loadable save.").yellow());
            }
        }
        Input::New => session.new_game(),
        Input::Help => println!("{HELP}"),
        Input::Quit => {}
    }
}

fn print_events(events: &mut Receiver<GameEvent>, state: &GameState) {
    loop {
        match events.try_recv() {
            Ok(event) => print_event(&event, state),
            Err(TryRecvError::Lagged(skipped)) => {
                println!("  {}", format!("({skipped} events skipped)").dimmed());
            }
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }
}

fn print_event(event: &GameEvent, state: &GameState) {
    match event {
        GameEvent::StageChanged { to, .. } => {
            println!("  {} {}", "==".cyan(), to.name().cyan().bold());
        }
        GameEvent::MessageRevealed(message) => {
            let who = match message.sender {
                Sender::Riley => "Riley:".magenta().bold(),
                Sender::Player => "You:".green().bold(),
                Sender::System => "SYSTEM".dimmed(),
            };
            println!("  {who} {}", message.text);
        }
        GameEvent::OptionsPublished(choices) => {
            for choice in choices {
                if choice.unlocked_at(state.progress.rapport) {
                    println!("    [{}] {}", choice.choice_id.bold(), choice.text);
                } else {
                    let need = choice.req_rapport.unwrap_or_default();
                    println!(
                        "    {}",
                        format!("[{}] {} (needs rapport {need})", choice.choice_id, choice.text)
                            .dimmed()
                    );
                }
            }
        }
        GameEvent::ScreenJitter { intensity } => {
            println!("  {}", "~".repeat(usize::from(*intensity) * 4).red());
        }
        GameEvent::AsciiRabbit => println!("{RABBIT}"),
        GameEvent::ChatClosed => println!("  {}", "(chat closed)".dimmed()),
        GameEvent::SidebarOpened => println!("  {}", "(handbook opened)".dimmed()),
        GameEvent::Saved { slot: SlotId::Auto } => println!("  {}", "(autosaved)".dimmed()),
        GameEvent::Saved { slot } => println!("  Saved to slot {slot}."),
        GameEvent::Loaded { slot } => println!("  Loaded slot {slot}."),
        GameEvent::CheckRolled(result) => println!(
            "  {}",
            format!(
                "[{}] d20 {} + {} + fate {} = {} vs DC {}: {}",
                result.stat,
                result.roll,
                result.modifier,
                result.fate_bonus,
                result.total,
                result.dc,
                result.tier
            )
            .dimmed()
        ),
        GameEvent::HitDodged { total } => {
            println!("  {}", format!("You dodge the surge ({total}).").green());
        }
    }
}

fn print_status<S: SlotStore>(session: &Session<S>) {
    let state = session.state();
    println!("  {} {}", "Stage".bold(), state.stage.name());
    println!(
        "  Loop {} | Rapport {} | Karma {}",
        state.loop_count, state.progress.rapport, state.progress.karma
    );
    match state.stage {
        Stage::PowerOff | Stage::HardwareCalibration | Stage::Resonance | Stage::Handshake => {
            println!(
                "  Bits {} / target {} | Resonance {} Hz",
                GameState::bits_string(&state.bits),
                GameState::bits_string(&state.target_bits),
                state.resonance_hz
            );
        }
        Stage::RoutingManual | Stage::RoutingAuto | Stage::SoftwareFault | Stage::Unlocked => {
            let engine = session.engine();
            println!(
                "  Cycles {:.1} | Currency {:.1} | Click {} | Auto {:.1}/tick",
                state.data_cycles, state.currency, state.click_power, state.auto_rate
            );
            println!(
                "  Upgrades: click {:.0}, auto {:.0}",
                engine.upgrade_cost(state, UpgradeKind::ClickPower),
                engine.upgrade_cost(state, UpgradeKind::AutoRate)
            );
        }
        Stage::BossFight => {
            let boss = &state.boss;
            println!(
                "  HP {} | Phase {} | Hoses {:?} | Nodes {:?} | Valve {}% | Simon {:?}",
                boss.player_hp,
                boss.phase,
                boss.hoses_connected,
                boss.node_click_sequence,
                boss.valve_percent,
                boss.simon_sequence
            );
        }
        _ => {}
    }
    if !state.progress.tools_found.is_empty() {
        let tools: Vec<_> = state.progress.tools_found.iter().map(|t| t.name()).collect();
        println!("  Tools: {}", tools.join(", "));
    }
    if !session.scheduler().is_empty() {
        println!("  {}", format!("{} timers pending", session.scheduler().len()).dimmed());
    }
}

fn print_chat(state: &GameState) {
    let skip = state.chat_messages.len().saturating_sub(20);
    for message in &state.chat_messages[skip..] {
        let who = match message.sender {
            Sender::Riley => "Riley",
            Sender::Player => "You",
            Sender::System => "SYSTEM",
        };
        println!("  {who}: {}", message.text);
    }
    for choice in &state.chat_options {
        println!("    [{}] {}", choice.choice_id, choice.text);
    }
}

fn print_stats(state: &GameState) {
    let stats = rb_mechanics::build_stats(state);
    for kind in StatKind::ALL {
        println!("  {:<11} {:+}", kind.name(), stats.get(kind));
    }
    println!("  {:<11} {}", "fate", fate(state));
    println!("  {:<11} {}", "polarity", karma_polar(state));
}
