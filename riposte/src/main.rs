use clap::{Parser, Subcommand};
use riposte::commands::{run_match, run_match_series, run_train, BotKind, TrainMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "riposte", author, version, about = "Heads-up NLHE engine, bot, and CFR trainer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// train a strategy table with tabular outcome-sampling CFR or Deep-CFR
    Train {
        mode: TrainMode,
        #[arg(long)]
        iterations: usize,
        #[arg(long, default_value = "strategy.jsonl")]
        out: PathBuf,
        #[arg(long, default_value = "checkpoint.json")]
        checkpoint: PathBuf,
    },
    /// play a fixed number of hands between two bots
    Match {
        #[arg(long)]
        bot1: BotKind,
        #[arg(long)]
        model1: Option<PathBuf>,
        #[arg(long)]
        bot2: BotKind,
        #[arg(long)]
        model2: Option<PathBuf>,
        #[arg(long)]
        hands: usize,
    },
    /// play several independent matches, each bounded by a max hand count
    #[command(name = "match_series")]
    MatchSeries {
        #[arg(long)]
        bot1: BotKind,
        #[arg(long)]
        model1: Option<PathBuf>,
        #[arg(long)]
        bot2: BotKind,
        #[arg(long)]
        model2: Option<PathBuf>,
        #[arg(long)]
        matches: usize,
        #[arg(long)]
        max_hands: usize,
    },
}

fn main() {
    #[cfg(feature = "native")]
    riposte_core::init_logging();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Train {
            mode,
            iterations,
            out,
            checkpoint,
        } => run_train(mode, iterations, &out, &checkpoint),
        Command::Match {
            bot1,
            model1,
            bot2,
            model2,
            hands,
        } => run_match(bot1, model1, bot2, model2, hands),
        Command::MatchSeries {
            bot1,
            model1,
            bot2,
            model2,
            matches,
            max_hands,
        } => run_match_series(bot1, model1, bot2, model2, matches, max_hands),
    };

    if let Err(err) = result {
        eprintln!("riposte: error: {err:#}");
        std::process::exit(1);
    }
}
