// Player-name suggestions for the rename dialog's autocomplete.
//
// Suggestions are fetched off the event loop; a slow or failing provider
// only means the dialog offers fewer names.

use std::collections::HashMap;

use async_trait::async_trait;
use keepscore_core::collection::any;
use keepscore_core::player::normalize_name;
use keepscore_core::saved_game::GameSummary;

use crate::config::SuggestionsConfig;

/// A source of player names to suggest.
#[async_trait]
pub trait NameSuggestions: Send + Sync {
    async fn suggestions(&self) -> anyhow::Result<Vec<String>>;
}

/// A fixed list of names, typically from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticSuggestions {
    names: Vec<String>,
}

impl StaticSuggestions {
    pub fn new(names: Vec<String>) -> Self {
        StaticSuggestions { names }
    }
}

#[async_trait]
impl NameSuggestions for StaticSuggestions {
    async fn suggestions(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.names.clone())
    }
}

/// Names of players from past games, most frequently used first.
///
/// Ties are broken alphabetically. Extra names (e.g. from configuration) are
/// appended when not already present, ignoring case, and the combined list is
/// capped at `limit`.
#[derive(Debug, Clone)]
pub struct HistorySuggestions {
    games: Vec<GameSummary>,
    extra: Vec<String>,
    limit: usize,
}

impl HistorySuggestions {
    pub fn new(games: Vec<GameSummary>, extra: Vec<String>, limit: usize) -> Self {
        HistorySuggestions { games, extra, limit }
    }

    /// Rank `games` with the configured names as extras, capped at the
    /// configured limit.
    pub fn from_config(games: Vec<GameSummary>, config: &SuggestionsConfig) -> Self {
        Self::new(games, config.names.clone(), config.limit)
    }

    fn rank(&self) -> Vec<String> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for name in self
            .games
            .iter()
            .flat_map(|game| game.player_names.iter())
            .filter_map(|name| name.as_deref().and_then(normalize_name))
        {
            *counts.entry(name).or_default() += 1;
        }

        let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
        ranked.sort_by(|(a, a_count), (b, b_count)| b_count.cmp(a_count).then_with(|| a.cmp(b)));
        let mut names: Vec<String> = ranked.into_iter().map(|(name, _)| name).collect();

        for extra in self.extra.iter().filter_map(|name| normalize_name(name)) {
            if !any(&names, |existing| existing.eq_ignore_ascii_case(&extra)) {
                names.push(extra);
            }
        }

        names.truncate(self.limit);
        names
    }
}

#[async_trait]
impl NameSuggestions for HistorySuggestions {
    async fn suggestions(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.rank())
    }
}
