//! Persisted run summary
//!
//! One LocalStorage record accumulated across runs: best score, coin and
//! distance totals, games played.

use serde::{Deserialize, Serialize};

use crate::sim::RunSummary;

/// Cross-run totals, updated once per finished run
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GameData {
    pub high_score: u64,
    pub total_coins: u64,
    pub games_played: u32,
    pub total_distance: f64,
}

impl GameData {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "neon_racer_data";

    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a finished run into the totals. The high score only moves on a
    /// strictly greater score. Returns true when it did.
    pub fn record_run(&mut self, summary: &RunSummary) -> bool {
        self.total_coins += summary.coins as u64;
        self.total_distance += summary.distance as f64;
        self.games_played += 1;

        if summary.score > self.high_score {
            self.high_score = summary.score;
            return true;
        }
        false
    }

    /// Load from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(data) = serde_json::from_str::<GameData>(&json) {
                    log::info!(
                        "Loaded game data (high score {}, {} games)",
                        data.high_score,
                        data.games_played
                    );
                    return data;
                }
                log::warn!("Corrupt game data record, starting fresh");
            }
        }

        Self::new()
    }

    /// Save to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Game data saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(score: u64, coins: u32) -> RunSummary {
        RunSummary {
            score,
            coins,
            distance: 120.5,
            level: 3,
        }
    }

    #[test]
    fn test_record_run_accumulates_totals() {
        let mut data = GameData::new();
        assert!(data.record_run(&summary(900, 12)));
        assert!(data.record_run(&summary(400, 5)));

        assert_eq!(data.high_score, 900);
        assert_eq!(data.total_coins, 17);
        assert_eq!(data.games_played, 2);
        assert!((data.total_distance - 241.0).abs() < 1e-6);
    }

    #[test]
    fn test_high_score_replaced_only_on_strictly_greater() {
        let mut data = GameData::new();
        assert!(data.record_run(&summary(500, 0)));
        // Equal score does not count as a new high score
        assert!(!data.record_run(&summary(500, 0)));
        assert!(data.record_run(&summary(501, 0)));
        assert_eq!(data.high_score, 501);
    }
}
