//! Implements the three CLI subcommands on top of the `riposte` library:
//! `train basic|deep`, `match`, and `match_series`. Each is a thin client
//! of `riposte_nlhe`/`riposte_deepcfr`'s trainers and `riposte_persist`'s
//! save/load functions, plus a direct two-`Bot` simulation loop for
//! matches (the `Session` type in the engine-facing API models a single
//! human-vs-bot game, not bot-vs-bot play).

use anyhow::Result;
use clap::ValueEnum;
use riposte_bladework::OpponentModel;
use riposte_core::{Chips, NUM_PLAYERS};
use riposte_deepcfr::{DeepCfrTrainer, PolicyNetwork};
use riposte_engine::GameState;
use riposte_mccfr::InfoSetTable;
use riposte_nlhe::Trainer;
use std::path::{Path, PathBuf};

use crate::session::Bot;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TrainMode {
    Basic,
    Deep,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum BotKind {
    Bladework,
    Cfr,
    Deepcfr,
}

/// mixes the Deep-CFR bot toward its neural policy once a checkpoint has
/// actually been trained; an untrained run still has a working tabular
/// fallback, so this isn't load-bearing for correctness, only strength.
const DEEPCFR_MATCH_MIX_PROBABILITY: f32 = 0.9;

pub fn run_train(mode: TrainMode, iterations: usize, strategy_out: &Path, checkpoint_out: &Path) -> Result<()> {
    match mode {
        TrainMode::Basic => {
            let mut trainer = Trainer::new();
            #[cfg(feature = "native")]
            log::info!("training basic CFR for {iterations} iterations");
            trainer.train(iterations);
            riposte_persist::save_strategy(&trainer.table, strategy_out)?;
            #[cfg(feature = "native")]
            log::info!(
                "wrote {} info sets to {}",
                trainer.table.len(),
                strategy_out.display()
            );
        }
        TrainMode::Deep => {
            let mut trainer = DeepCfrTrainer::new();
            #[cfg(feature = "native")]
            log::info!("training Deep-CFR for {iterations} iterations");
            trainer.train(iterations);
            riposte_persist::save_strategy(&trainer.table, strategy_out)?;
            if let Err(err) = riposte_persist::save_checkpoint(
                trainer.iterations,
                &trainer.advantage_net,
                &trainer.policy_net,
                &riposte_deepcfr::ValueNetwork::new(),
                checkpoint_out,
            ) {
                #[cfg(feature = "native")]
                log::warn!("checkpoint write failed, continuing without it: {err}");
                #[cfg(not(feature = "native"))]
                let _ = err;
            }
            #[cfg(feature = "native")]
            log::info!(
                "wrote {} info sets to {} and a checkpoint to {}",
                trainer.table.len(),
                strategy_out.display(),
                checkpoint_out.display()
            );
        }
    }
    Ok(())
}

fn build_bot(kind: BotKind, model: Option<&PathBuf>) -> Result<Bot> {
    match kind {
        BotKind::Bladework => Ok(Bot::Bladework(OpponentModel::new())),
        BotKind::Cfr => {
            let table = match model {
                Some(path) => riposte_persist::load_strategy(path)?,
                None => InfoSetTable::new(),
            };
            Ok(Bot::Cfr {
                table,
                history: Vec::new(),
            })
        }
        BotKind::Deepcfr => {
            // the checkpoint only carries network weights; the tabular
            // table it was trained alongside isn't addressed by this path,
            // so the bot leans on `neural_mix_probability` toward the
            // network and keeps an empty table as its tabular fallback.
            let policy_net = match model {
                Some(path) => {
                    let (_, _, policy_net, _) = riposte_persist::load_checkpoint(path)?;
                    policy_net
                }
                None => PolicyNetwork::new(),
            };
            Ok(Bot::DeepCfr {
                table: InfoSetTable::new(),
                policy_net,
                neural_mix_probability: DEEPCFR_MATCH_MIX_PROBABILITY,
                history: Vec::new(),
            })
        }
    }
}

/// plays one hand to completion against the two seats' bots, returning
/// each seat's net chip change.
fn play_hand(state: &mut GameState, bots: &mut [Bot; NUM_PLAYERS]) -> [Chips; NUM_PLAYERS] {
    let before = [state.players[0].stack, state.players[1].stack];
    loop {
        if state.is_hand_over() {
            break;
        }
        match state.current_player {
            Some(seat) => {
                let action = bots[seat].decide(state, seat);
                if state.apply(action).is_err() {
                    break;
                }
                bots[seat].record(action);
            }
            None => {
                if state.advance_round().is_err() {
                    break;
                }
            }
        }
    }
    if state.pot > 0 {
        let _ = state.showdown();
    }
    let after = [state.players[0].stack, state.players[1].stack];
    [after[0] - before[0], after[1] - before[1]]
}

pub fn run_match(bot1: BotKind, model1: Option<PathBuf>, bot2: BotKind, model2: Option<PathBuf>, hands: usize) -> Result<()> {
    let mut bots = [build_bot(bot1, model1.as_ref())?, build_bot(bot2, model2.as_ref())?];
    let mut state = GameState::new_game();
    let mut totals = [0 as Chips; NUM_PLAYERS];
    for hand in 0..hands {
        if state.players.iter().any(|p| p.stack == 0) {
            #[cfg(feature = "native")]
            log::info!("match ended early at hand {hand}: a player busted");
            break;
        }
        let delta = play_hand(&mut state, &mut bots);
        totals[0] += delta[0];
        totals[1] += delta[1];
        for bot in bots.iter_mut() {
            bot.reset_hand();
        }
        state.prepare_next_hand();
    }
    #[cfg(feature = "native")]
    log::info!("match complete: player0 {:+} chips, player1 {:+} chips", totals[0], totals[1]);
    report_totals("match", &totals);
    Ok(())
}

fn report_totals(label: &str, totals: &[Chips; NUM_PLAYERS]) {
    #[cfg(feature = "native")]
    {
        use colored::Colorize;
        let color = |n: Chips| if n >= 0 { format!("{n:+}").green() } else { format!("{n:+}").red() };
        println!(
            "{label} complete: player0 {} chips, player1 {} chips",
            color(totals[0]),
            color(totals[1])
        );
    }
    #[cfg(not(feature = "native"))]
    println!("{label} complete: player0 {:+} chips, player1 {:+} chips", totals[0], totals[1]);
}

pub fn run_match_series(
    bot1: BotKind,
    model1: Option<PathBuf>,
    bot2: BotKind,
    model2: Option<PathBuf>,
    matches: usize,
    max_hands: usize,
) -> Result<()> {
    let mut series_totals = [0 as Chips; NUM_PLAYERS];
    for m in 0..matches {
        let mut bots = [build_bot(bot1, model1.as_ref())?, build_bot(bot2, model2.as_ref())?];
        let mut state = GameState::new_game();
        for hand in 0..max_hands {
            if state.players.iter().any(|p| p.stack == 0) {
                #[cfg(feature = "native")]
                log::info!("match {m} ended early at hand {hand}: a player busted");
                break;
            }
            let delta = play_hand(&mut state, &mut bots);
            series_totals[0] += delta[0];
            series_totals[1] += delta[1];
            for bot in bots.iter_mut() {
                bot.reset_hand();
            }
            state.prepare_next_hand();
        }
    }
    #[cfg(feature = "native")]
    log::info!(
        "series complete over {matches} matches: player0 {:+} chips, player1 {:+} chips",
        series_totals[0],
        series_totals[1]
    );
    report_totals(&format!("series of {matches} matches"), &series_totals);
    Ok(())
}
