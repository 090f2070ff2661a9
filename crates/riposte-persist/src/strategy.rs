use anyhow::{bail, Context, Result};
use riposte_abstraction::AbstractAction;
use riposte_mccfr::{InfoKey, InfoSet, InfoSetTable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// one info-set's persisted row: the key as a fixed-width hex string (so
/// files are diffable and the format doesn't depend on `u128`'s in-memory
/// representation), the legal actions by name, and both sum maps. Any
/// round-tripping format is acceptable per the external-interfaces
/// contract; this one is newline-delimited JSON so a training run can be
/// checkpointed by appending rather than rewriting the whole file.
#[derive(Debug, Serialize, Deserialize)]
struct StrategyRow {
    key: String,
    legal: Vec<String>,
    regret_sum: BTreeMap<String, f32>,
    strategy_sum: BTreeMap<String, f32>,
}

fn action_name(action: AbstractAction) -> String {
    action.to_string()
}

fn action_by_name(name: &str) -> Result<AbstractAction> {
    AbstractAction::ALPHABET
        .iter()
        .find(|a| a.to_string() == name)
        .copied()
        .with_context(|| format!("unknown action name '{name}' in strategy file"))
}

fn row_from_entry(key: &InfoKey, info: &InfoSet) -> StrategyRow {
    StrategyRow {
        key: key.to_string(),
        legal: info.legal_actions().iter().map(|&a| action_name(a)).collect(),
        regret_sum: info.regret_sum().iter().map(|(&a, &r)| (action_name(a), r)).collect(),
        strategy_sum: info.strategy_sum().iter().map(|(&a, &s)| (action_name(a), s)).collect(),
    }
}

fn entry_from_row(row: StrategyRow) -> Result<(InfoKey, InfoSet)> {
    let key_value = u128::from_str_radix(&row.key, 16).with_context(|| format!("malformed key '{}'", row.key))?;
    let key = InfoKey::from(key_value);
    let legal = row
        .legal
        .iter()
        .map(|name| action_by_name(name))
        .collect::<Result<Vec<_>>>()?;

    let mut regret_sum = BTreeMap::new();
    for (name, value) in row.regret_sum {
        regret_sum.insert(action_by_name(&name)?, value);
    }
    let mut strategy_sum = BTreeMap::new();
    for (name, value) in row.strategy_sum {
        strategy_sum.insert(action_by_name(&name)?, value);
    }

    Ok((key, InfoSet::from_sums(legal, regret_sum, strategy_sum)))
}

/// writes every info-set in `table` as one JSON row per line, sorted by key
/// so two saves of the same table produce byte-identical output.
pub fn save_strategy(table: &InfoSetTable, path: impl AsRef<Path>) -> Result<()> {
    let mut rows: Vec<StrategyRow> = table.iter().map(|(key, info)| row_from_entry(key, info)).collect();
    rows.sort_by(|a, b| a.key.cmp(&b.key));

    let file = std::fs::File::create(path.as_ref())
        .with_context(|| format!("creating strategy file {}", path.as_ref().display()))?;
    let mut writer = std::io::BufWriter::new(file);
    for row in &rows {
        let line = serde_json::to_string(row)?;
        writeln!(writer, "{line}")?;
    }
    Ok(())
}

/// loads a strategy file back into an `InfoSetTable`. Per testable property
/// #8, a round-tripped table must reproduce bit-identical average
/// strategies; since we store `strategy_sum`/`regret_sum` verbatim and
/// `average_strategy`/`current_strategy` are pure functions of those sums,
/// that property holds as long as the sums themselves survive the
/// JSON float round-trip, which `serde_json` guarantees for finite f32s.
pub fn load_strategy(path: impl AsRef<Path>) -> Result<InfoSetTable> {
    let file = std::fs::File::open(path.as_ref())
        .with_context(|| format!("opening strategy file {}", path.as_ref().display()))?;
    let reader = BufReader::new(file);
    let mut table = InfoSetTable::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let row: StrategyRow = serde_json::from_str(&line).with_context(|| "malformed strategy row")?;
        let (key, info) = entry_from_row(row)?;
        table.insert(key, info);
    }
    Ok(table)
}

pub fn require_config_file(path: impl AsRef<Path>) -> Result<()> {
    if !path.as_ref().exists() {
        bail!("required config file missing: {}", path.as_ref().display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use riposte_abstraction::preflop_bucket_of;
    use riposte_cards::{HandClass, Rank, Street};

    #[test]
    fn a_trained_table_round_trips_through_disk() {
        let mut table = InfoSetTable::new();
        let bucket = preflop_bucket_of(HandClass::Pair(Rank::Ace));
        let key = InfoKey::build(0, Street::Preflop, bucket, "raise_3.0|call", 2);
        let legal = vec![AbstractAction::Fold, AbstractAction::Call, AbstractAction::Raise3_0];
        {
            let info = table.get_or_create(key, &legal);
            let strategy = info.current_strategy();
            let mut utilities = BTreeMap::new();
            utilities.insert(AbstractAction::Fold, 0.0);
            utilities.insert(AbstractAction::Call, 4.0);
            utilities.insert(AbstractAction::Raise3_0, -2.0);
            info.update_regret(&strategy, &utilities, 1.0);
            info.update_average(&strategy, 1.0);
        }

        let dir = std::env::temp_dir();
        let path = dir.join(format!("riposte-strategy-test-{}.jsonl", std::process::id()));
        save_strategy(&table, &path).unwrap();
        let loaded = load_strategy(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let original = table.get(&key).unwrap();
        let restored = loaded.get(&key).unwrap();
        assert_eq!(original.average_strategy(), restored.average_strategy());
        assert_eq!(original.regret_sum(), restored.regret_sum());
    }

    #[test]
    fn missing_config_file_fails_fast() {
        let result = require_config_file("/nonexistent/riposte-config-that-does-not-exist.toml");
        assert!(result.is_err());
    }
}
