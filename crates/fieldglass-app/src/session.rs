// Player session: fetches every section for the selected player concurrently
// and keeps the transformed snapshot for the views.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use fieldglass_core::columns::StatKind;
use fieldglass_core::comps::MlbComp;
use fieldglass_core::directory::PlayerSummary;
use fieldglass_core::guard::RequestGuard;
use fieldglass_core::prediction::Prediction;
use fieldglass_core::reconcile::{reconcile_response, PlayerRatings};
use fieldglass_core::season::SeasonRecord;
use fieldglass_core::trend::{history_from_response, RatingHistory};

use crate::source::{PlayerSource, SourceError};

/// Everything known about one player at fetch time. Failed sections are empty
/// or `None`; the snapshot itself is always produced.
#[derive(Debug, Clone)]
pub struct PlayerSnapshot {
    pub player_id: i64,
    pub bio: Option<PlayerSummary>,
    pub batting: Vec<SeasonRecord>,
    pub pitching: Vec<SeasonRecord>,
    pub fielding: Vec<SeasonRecord>,
    pub ratings: Option<PlayerRatings>,
    pub history: RatingHistory,
    pub prediction: Option<Prediction>,
    pub comps: Vec<MlbComp>,
    pub fetched_at: DateTime<Utc>,
}

impl PlayerSnapshot {
    pub fn stats(&self, kind: StatKind) -> &[SeasonRecord] {
        match kind {
            StatKind::Batting => &self.batting,
            StatKind::Pitching => &self.pitching,
            StatKind::Fielding => &self.fielding,
        }
    }

    /// Name for headings; falls back to the id when the bio is missing.
    pub fn display_name(&self) -> String {
        self.bio
            .as_ref()
            .map(|b| b.full_name.clone())
            .unwrap_or_else(|| format!("Player {}", self.player_id))
    }

    /// Fetch all sections for `player_id` concurrently and transform them.
    pub async fn load<S: PlayerSource + ?Sized>(source: &S, player_id: i64) -> Self {
        let (bio, batting, pitching, fielding, ratings, prediction, comps) = tokio::join!(
            source.bio(player_id),
            source.stats(player_id, StatKind::Batting),
            source.stats(player_id, StatKind::Pitching),
            source.stats(player_id, StatKind::Fielding),
            source.ratings(player_id),
            source.prediction(player_id),
            source.comps(player_id),
        );

        let ratings_response = degrade(player_id, "ratings", ratings);
        let snapshot = PlayerSnapshot {
            player_id,
            bio: degrade(player_id, "bio", bio),
            batting: degrade(player_id, "batting", batting).unwrap_or_default(),
            pitching: degrade(player_id, "pitching", pitching).unwrap_or_default(),
            fielding: degrade(player_id, "fielding", fielding).unwrap_or_default(),
            ratings: ratings_response.as_ref().map(reconcile_response),
            history: ratings_response
                .as_ref()
                .map(history_from_response)
                .unwrap_or_default(),
            prediction: degrade(player_id, "prediction", prediction).filter(|p| !p.is_empty()),
            comps: degrade(player_id, "comps", comps).unwrap_or_default(),
            fetched_at: Utc::now(),
        };

        info!(
            player_id,
            batting = snapshot.batting.len(),
            pitching = snapshot.pitching.len(),
            fielding = snapshot.fielding.len(),
            has_ratings = snapshot.ratings.is_some(),
            "player snapshot loaded"
        );
        snapshot
    }
}

fn degrade<T>(player_id: i64, section: &str, result: Result<T, SourceError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(player_id, section, "section unavailable: {e}");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// PlayerSession
// ---------------------------------------------------------------------------

/// Holds the snapshot for the currently selected player. Selecting the
/// player already loaded is a no-op; results for a superseded selection are
/// dropped.
pub struct PlayerSession<S> {
    source: S,
    guard: RequestGuard<i64>,
    current: Option<PlayerSnapshot>,
}

impl<S: PlayerSource> PlayerSession<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            guard: RequestGuard::new(),
            current: None,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn current(&self) -> Option<&PlayerSnapshot> {
        self.current.as_ref()
    }

    /// Select `player_id`, fetching unless it is already the current player.
    pub async fn select(&mut self, player_id: i64) -> Option<&PlayerSnapshot> {
        if let Some(ticket) = self.guard.begin(player_id) {
            let snapshot = PlayerSnapshot::load(&self.source, player_id).await;
            if self.guard.accept(&ticket) {
                self.current = Some(snapshot);
            } else {
                warn!(player_id, "discarding stale player snapshot");
            }
        }
        self.current.as_ref()
    }

    /// Force a refetch of the current player.
    pub async fn refresh(&mut self) -> Option<&PlayerSnapshot> {
        let player_id = *self.guard.current()?;
        self.guard.reset();
        self.select(player_id).await
    }

    /// Drop the selection.
    pub fn clear(&mut self) {
        self.guard.reset();
        self.current = None;
    }
}
