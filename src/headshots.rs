use std::collections::HashMap;
use std::sync::Arc;

use crate::api::Player;

/// Player name -> NBA person id, keyed case-insensitively. Built once per session and
/// shared read-only between screens.
#[derive(Debug, Clone, Default)]
pub struct PlayerIdCache {
    ids: HashMap<String, u32>,
}

impl PlayerIdCache {
    pub fn from_players(players: &[Player]) -> Self {
        let ids = players
            .iter()
            .map(|p| (normalize(&p.name), p.id))
            .collect();
        Self { ids }
    }

    pub fn shared(players: &[Player]) -> Arc<Self> {
        Arc::new(Self::from_players(players))
    }

    pub fn get(&self, name: &str) -> Option<u32> {
        self.ids.get(&normalize(name)).copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

pub fn headshot_url(cdn_base: &str, player_id: u32) -> String {
    format!("{}/{player_id}.png", cdn_base.trim_end_matches('/'))
}

/// `None` when the id is unknown; the caller hides the headshot.
pub fn headshot_for(cache: Option<&PlayerIdCache>, cdn_base: &str, name: &str) -> Option<String> {
    let id = cache?.get(name)?;
    Some(headshot_url(cdn_base, id))
}
