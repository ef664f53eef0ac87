use scorebox_api::{League, Situation};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// How long a cached situation stays fresh before a new fetch is issued.
pub const FRESHNESS_WINDOW: Duration = Duration::from_secs(12);

/// Time-bounded memoization of per-game live situations, keyed by game id.
///
/// Entries are never evicted; the key space is bounded by the game ids a
/// session actually displays. A fetch failure never touches the map, so the
/// previous entry keeps serving until a successful refresh lands. `None`
/// payloads (summary without a situation block) are cached like any other
/// result so a live game without data is not refetched every render.
#[derive(Debug, Default)]
pub struct SituationCache {
    entries: HashMap<String, CachedSituation>,
}

#[derive(Debug)]
struct CachedSituation {
    situation: Option<Situation>,
    fetched_at: Instant,
}

impl SituationCache {
    /// Return the cached situation if an entry exists and is younger than the
    /// freshness window. A stale or missing entry means the caller should
    /// request a fetch (and render without a situation for this pass).
    pub fn fresh(&self, game_id: &str, now: Instant) -> Option<&Option<Situation>> {
        self.entries
            .get(game_id)
            .filter(|e| now.duration_since(e.fetched_at) < FRESHNESS_WINDOW)
            .map(|e| &e.situation)
    }

    pub fn store(&mut self, game_id: String, situation: Option<Situation>, now: Instant) {
        self.entries.insert(
            game_id,
            CachedSituation {
                situation,
                fetched_at: now,
            },
        );
    }
}

/// One cache per league — each only ever holds its own league's variant
/// because the worker normalizes with the league it was asked for.
#[derive(Debug, Default)]
pub struct SituationCaches {
    mlb: SituationCache,
    nfl: SituationCache,
    nba: SituationCache,
}

impl SituationCaches {
    pub fn for_league(&self, league: League) -> &SituationCache {
        match league {
            League::Mlb => &self.mlb,
            League::Nfl => &self.nfl,
            League::Nba => &self.nba,
        }
    }

    pub fn for_league_mut(&mut self, league: League) -> &mut SituationCache {
        match league {
            League::Mlb => &mut self.mlb,
            League::Nfl => &mut self.nfl,
            League::Nba => &mut self.nba,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scorebox_api::{BasketballSituation, Situation};

    fn situation() -> Option<Situation> {
        Some(Situation::Basketball(BasketballSituation {
            period: Some(1),
            clock: Some("10:00".into()),
        }))
    }

    #[test]
    fn lookup_within_window_serves_cached_entry() {
        let mut cache = SituationCache::default();
        let t0 = Instant::now();
        cache.store("g1".into(), situation(), t0);

        let just_under = t0 + FRESHNESS_WINDOW - Duration::from_millis(1);
        assert!(cache.fresh("g1", just_under).is_some());
    }

    #[test]
    fn lookup_after_window_reports_stale() {
        let mut cache = SituationCache::default();
        let t0 = Instant::now();
        cache.store("g1".into(), situation(), t0);

        assert!(cache.fresh("g1", t0 + FRESHNESS_WINDOW).is_none());
    }

    #[test]
    fn unknown_game_id_is_a_miss() {
        let cache = SituationCache::default();
        assert!(cache.fresh("nope", Instant::now()).is_none());
    }

    #[test]
    fn none_payload_is_cached_and_served_fresh() {
        let mut cache = SituationCache::default();
        let t0 = Instant::now();
        cache.store("g1".into(), None, t0);

        // Fresh hit carrying "no situation available" — no refetch needed.
        assert_eq!(cache.fresh("g1", t0 + Duration::from_secs(1)), Some(&None));
    }

    #[test]
    fn refresh_overwrites_without_touching_other_entries() {
        let mut cache = SituationCache::default();
        let t0 = Instant::now();
        cache.store("g1".into(), situation(), t0);
        cache.store("g2".into(), None, t0);

        let t1 = t0 + FRESHNESS_WINDOW * 2;
        cache.store("g1".into(), situation(), t1);
        assert!(cache.fresh("g1", t1).is_some());
        assert!(cache.fresh("g2", t1).is_none()); // still stale, still present
    }

    #[test]
    fn caches_are_independent_per_league() {
        let mut caches = SituationCaches::default();
        let t0 = Instant::now();
        caches
            .for_league_mut(League::Nba)
            .store("g1".into(), situation(), t0);
        assert!(caches.for_league(League::Nba).fresh("g1", t0).is_some());
        assert!(caches.for_league(League::Mlb).fresh("g1", t0).is_none());
    }
}
