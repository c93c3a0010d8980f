use crate::api::{Prediction, RankedPrediction, StatType, TopPicks};

/// Card order on a single player's screen.
pub const STAT_ORDER: [StatType; 6] = [
    StatType::Pts,
    StatType::Reb,
    StatType::Ast,
    StatType::Fg3m,
    StatType::Blk,
    StatType::Stl,
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedRow<'a> {
    pub rank: usize,
    pub pick: &'a RankedPrediction,
}

/// Top picks arrive pre-ranked by the analyzer; rank is the sequence position.
pub fn rank_top_picks(top: &TopPicks) -> Vec<RankedRow<'_>> {
    top.picks
        .iter()
        .enumerate()
        .map(|(idx, pick)| RankedRow {
            rank: idx + 1,
            pick,
        })
        .collect()
}

pub fn top_picks_summary(top: &TopPicks) -> String {
    let mut summary = format!(
        "{} picks · {} players analyzed",
        top.count, top.total_analyzed
    );
    if let Some(age) = top.cache_age_seconds {
        summary.push_str(&format!(" · cached {}m ago", (age / 60.0).round() as i64));
    }
    summary
}

pub fn stat_rank(stat: &StatType) -> usize {
    STAT_ORDER
        .iter()
        .position(|s| s == stat)
        .unwrap_or(STAT_ORDER.len())
}

/// Stable: predictions sharing a stat keep their payload order.
pub fn order_player_predictions(predictions: &[Prediction]) -> Vec<&Prediction> {
    let mut ordered: Vec<&Prediction> = predictions.iter().collect();
    ordered.sort_by_key(|p| stat_rank(&p.stat_type));
    ordered
}
