//! Shared dimensional types, game-wide constants, and process bootstrap
//! shared by every other `riposte-*` crate.

/// chip amount; i32 gives us headroom over i16 for deep-stacked training runs
pub type Chips = i32;
pub type Equity = f32;
pub type Utility = f32;
pub type Probability = f32;

/// heads-up only, per the Non-goals in spec.md §1
pub const NUM_PLAYERS: usize = 2;

// --- table constants (External Interfaces §6 "Config constants") ---
pub const SMALL_BLIND: Chips = 1;
pub const BIG_BLIND: Chips = 2;
pub const ANTE: Chips = 0;
pub const STARTING_STACK: Chips = 200;
pub const MAX_RAISE_REPEATS: usize = 4;
pub const MAX_HALF_MOVES: usize = 200;

// --- postflop strategy (§4.5) ---
pub const POSTFLOP_MC_SIMULATIONS: usize = 300;

// --- CFR hyperparameters (§6 "Config constants", §4.9/§4.10) ---
pub const CFR_BATCH_SIZE: usize = 256;
pub const CFR_MAX_NODES_PER_ITER: usize = 1 << 16;
pub const CFR_MAX_DEPTH: usize = 200;
pub const CFR_EVAL_FREQUENCY: usize = 1_000;
pub const CFR_SAVE_FREQUENCY: usize = 10_000;

pub const REGRET_MIN: Utility = 0.0; // CFR+ clips regrets at 0, see §4.8
pub const REGRET_MAX: Utility = Utility::MAX;
pub const POLICY_MIN: Probability = Probability::MIN_POSITIVE;
pub const STRATEGY_NORMALIZE_EPSILON: Probability = 1e-8;

// --- Deep-CFR schedule (§4.10) ---
pub const DEEPCFR_ADVANTAGE_TRAIN_EVERY: usize = 100;
pub const DEEPCFR_POLICY_TRAIN_EVERY: usize = 1_000;
pub const DEEPCFR_RESERVOIR_CAPACITY: usize = 2_000_000;
pub const DEEPCFR_GRAD_CLIP_NORM: f32 = 1.0;

/// trait for random generation, mainly (strictly?) for testing and for
/// CFR's `fabricate_random_state` in §4.9.
pub trait Arbitrary {
    fn random() -> Self;
}

/// Recoverable errors raised at the engine boundary. Per §7 ("within the
/// engine, errors are values returned to the caller; the engine never
/// panics on user input") this is a plain enum, not `anyhow::Error` —
/// callers are expected to match on the variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    IllegalAction { reason: String },
    IllegalRaiseSize { minimum: Chips, requested: Chips },
    NotYourTurn,
    HandAlreadyOver,
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IllegalAction { reason } => write!(f, "illegal action: {reason}"),
            Self::IllegalRaiseSize { minimum, requested } => write!(
                f,
                "illegal raise size: minimum raise is {minimum}, got {requested}"
            ),
            Self::NotYourTurn => write!(f, "it is not this player's turn to act"),
            Self::HandAlreadyOver => write!(f, "hand is already over"),
        }
    }
}

impl std::error::Error for EngineError {}

pub type EngineResult<T> = Result<T, EngineError>;

/// progress bar, matches the teacher's `crate::progress()` helper
#[cfg(feature = "native")]
pub fn progress(n: usize) -> indicatif::ProgressBar {
    let tick = std::time::Duration::from_secs(30);
    let style = "{spinner:.cyan} {elapsed} ~ {percent:>3}% {wide_bar:.cyan} {pos}/{len}";
    let style = indicatif::ProgressStyle::with_template(style).unwrap();
    let bar = indicatif::ProgressBar::new(n as u64);
    bar.set_style(style);
    bar.enable_steady_tick(tick);
    bar
}

/// initialize combined term+file logging
#[cfg(feature = "native")]
pub fn init_logging() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{time}.log")).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}
