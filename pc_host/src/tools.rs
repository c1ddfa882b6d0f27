//! Line-oriented tool dispatch.
//!
//! Each request line is `{"tool": <name>, "arguments": {...}}`. Each reply is
//! `{"tool": <name>, "result": ...}` on success or `{"tool": <name>,
//! "error": "..."}` on failure. Lines that aren't valid JSON get
//! `{"error": "invalid JSON: ..."}`.

use log::{debug, warn};
use poker_copilot::{
    game::{
        entities::{Card, CardParseError, Usd},
        equity::{Equity, estimate_equity, estimate_equity_parallel, pot_odds},
        functional::eval,
    },
    session::{
        Capture, HandUpdate, PlayerSeat, PokerSession, SessionError, TurnView,
    },
};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Value, json};
use thiserror::Error;

use crate::config::HostConfig;

/// Trial counts at or above this run on the rayon pool.
const PARALLEL_TRIALS: u32 = 5_000;

/// Names of every tool the host answers.
pub const TOOLS: [&str; 12] = [
    "setup",
    "capture_cards",
    "update",
    "commit_read",
    "act",
    "evaluate_hand",
    "estimate_equity",
    "pot_odds",
    "hero_equity",
    "reveal_hole_cards",
    "snapshot",
    "phase",
];

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("bad arguments: {0}")]
    Arguments(#[from] serde_json::Error),

    #[error(transparent)]
    Card(#[from] CardParseError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("capture needs exactly 2 cards, got {0}")]
    CaptureSize(usize),

    #[error("the session doesn't know the hole cards")]
    UnknownHoleCards,
}

#[derive(Deserialize)]
struct ToolCall {
    tool: String,
    #[serde(default)]
    arguments: Value,
}

#[derive(Deserialize)]
struct SetupArgs {
    players: Vec<PlayerSeat>,
    #[serde(default)]
    hero_chips: Option<Usd>,
}

#[derive(Deserialize)]
struct CaptureArgs {
    #[serde(default)]
    cards: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct CommitArgs {
    #[serde(default)]
    analysis: Option<String>,
}

#[derive(Deserialize)]
struct ActArgs {
    payload: String,
}

#[derive(Deserialize)]
struct EvaluateArgs {
    cards: Vec<String>,
}

#[derive(Deserialize)]
struct EquityArgs {
    hand: Vec<String>,
    #[serde(default)]
    board: Vec<String>,
    #[serde(default)]
    trials: Option<u32>,
}

#[derive(Deserialize)]
struct PotOddsArgs {
    pot: Usd,
    bet: Usd,
    #[serde(default)]
    hand: Option<Vec<String>>,
    #[serde(default)]
    board: Vec<String>,
    #[serde(default)]
    trials: Option<u32>,
}

#[derive(Deserialize)]
struct TrialsArgs {
    #[serde(default)]
    trials: Option<u32>,
}

/// Missing or null arguments read as an empty object.
fn parse_args<T: DeserializeOwned>(arguments: Value) -> Result<T, ToolError> {
    let arguments = if arguments.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        arguments
    };
    Ok(serde_json::from_value(arguments)?)
}

/// Owns the session for the lifetime of the loop.
#[derive(Debug)]
pub struct ToolHost {
    session: PokerSession,
    rng: SmallRng,
}

impl ToolHost {
    pub fn new(config: &HostConfig) -> Result<Self, SessionError> {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        Ok(Self {
            session: PokerSession::new(config.session.clone())?,
            rng,
        })
    }

    #[must_use]
    pub fn session(&self) -> &PokerSession {
        &self.session
    }

    /// Answer one request line.
    pub fn handle_line(&mut self, line: &str) -> Value {
        let call: ToolCall = match serde_json::from_str(line) {
            Ok(call) => call,
            Err(e) => {
                warn!("invalid request line: {e}");
                return json!({ "error": format!("invalid JSON: {e}") });
            }
        };
        debug!("tool call: {}", call.tool);
        match self.dispatch(&call.tool, call.arguments) {
            Ok(result) => json!({ "tool": call.tool, "result": result }),
            Err(e) => {
                warn!("{} failed: {e}", call.tool);
                json!({ "tool": call.tool, "error": e.to_string() })
            }
        }
    }

    fn default_trials(&self) -> u32 {
        self.session.config().equity_trials
    }

    fn equity(&mut self, hand: &[Card], board: &[Card], trials: Option<u32>) -> Equity {
        let trials = trials.unwrap_or_else(|| self.default_trials());
        if trials >= PARALLEL_TRIALS {
            estimate_equity_parallel(hand, board, trials, self.rng.random())
        } else {
            estimate_equity(hand, board, trials, &mut self.rng)
        }
    }

    pub fn dispatch(&mut self, tool: &str, arguments: Value) -> Result<Value, ToolError> {
        let result = match tool {
            "setup" => {
                let args: SetupArgs = parse_args(arguments)?;
                let hero_chips = args
                    .hero_chips
                    .unwrap_or(self.session.config().default_chips);
                serde_json::to_value(self.session.setup(&args.players, hero_chips)?)?
            }
            "capture_cards" => {
                let args: CaptureArgs = parse_args(arguments)?;
                let capture = match args.cards {
                    None => Capture::Signal,
                    Some(tokens) => match Card::parse_many(&tokens)?.as_slice() {
                        &[first, second] => Capture::Cards([first, second]),
                        other => return Err(ToolError::CaptureSize(other.len())),
                    },
                };
                serde_json::to_value(self.session.capture_hole_cards(capture)?)?
            }
            "update" => {
                let update: HandUpdate = parse_args(arguments)?;
                serde_json::to_value(self.session.update(update)?)?
            }
            "commit_read" => {
                let args: CommitArgs = parse_args(arguments)?;
                serde_json::to_value(self.session.commit_read(args.analysis)?)?
            }
            "act" => {
                let args: ActArgs = parse_args(arguments)?;
                json!({ "payload": self.session.act(&args.payload)? })
            }
            "evaluate_hand" => {
                let args: EvaluateArgs = parse_args(arguments)?;
                serde_json::to_value(eval(&Card::parse_many(&args.cards)?))?
            }
            "estimate_equity" => {
                let args: EquityArgs = parse_args(arguments)?;
                let hand = Card::parse_many(&args.hand)?;
                let board = Card::parse_many(&args.board)?;
                serde_json::to_value(self.equity(&hand, &board, args.trials))?
            }
            "pot_odds" => {
                let args: PotOddsArgs = parse_args(arguments)?;
                let odds = pot_odds(args.pot, args.bet);
                match args.hand {
                    None => json!({ "pot_odds": odds }),
                    Some(tokens) => {
                        let hand = Card::parse_many(&tokens)?;
                        let board = Card::parse_many(&args.board)?;
                        let equity = self.equity(&hand, &board, args.trials);
                        // No comparison against a fallback number.
                        let beats_pot_odds =
                            (!equity.is_fallback()).then_some(equity.probability > odds);
                        json!({
                            "pot_odds": odds,
                            "equity": equity,
                            "beats_pot_odds": beats_pot_odds,
                        })
                    }
                }
            }
            "hero_equity" => {
                let args: TrialsArgs = parse_args(arguments)?;
                let trials = args.trials.unwrap_or_else(|| self.default_trials());
                let equity = self
                    .session
                    .hero_equity(trials, &mut self.rng)
                    .ok_or(ToolError::UnknownHoleCards)?;
                serde_json::to_value(equity)?
            }
            "reveal_hole_cards" => {
                let cards = self.session.reveal_hole_cards();
                json!({ "cards": cards })
            }
            "snapshot" => serde_json::to_value(self.session.snapshot()?)?,
            "phase" => json!({
                "phase": self.session.phase(),
                "next_step": self.session.next_step(),
                "hand_number": self.session.data().hand_number(),
            }),
            other => return Err(ToolError::UnknownTool(other.to_string())),
        };
        Ok(result)
    }
}
