//! Obsession index: how much listening goes to the top artists.

use serde::Serialize;

use super::aggregate::rank_artists;
use super::round2;
use crate::table::EventTable;

/// Share of listening at one rank cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObsessionLevel {
    pub rank: usize,
    /// 0-100, two decimals
    pub percentage: f64,
}

/// Slice of the top-1/5/10 breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObsessionTier {
    Top1,
    RestOfTop5,
    RestOfTop10,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObsessionSegment {
    pub tier: ObsessionTier,
    pub percentage: f64,
}

/// Percentage of total minutes that went to the top `n` artists.
///
/// Returns `0.0` when the table has no listening time.
pub fn obsession_percentage(table: &EventTable, n: usize) -> f64 {
    let total = table.total_minutes();
    if total <= 0.0 {
        return 0.0;
    }
    let top = rank_artists(table.iter(), n)
        .iter()
        .fold(0.0, |acc, a| acc + a.minutes);
    to_percentage(top, total)
}

/// Obsession percentage at each requested rank, in the order given.
///
/// Ranks the artists once and reads every cutoff off the same ranking, so
/// larger ranks never report a smaller share.
pub fn obsession_multi(table: &EventTable, ranks: &[usize]) -> Vec<ObsessionLevel> {
    let total = table.total_minutes();
    let deepest = ranks.iter().copied().max().unwrap_or(0);
    let ranking = rank_artists(table.iter(), deepest);

    ranks
        .iter()
        .map(|&rank| {
            let percentage = if total <= 0.0 {
                0.0
            } else {
                let top = ranking
                    .iter()
                    .take(rank)
                    .fold(0.0, |acc, a| acc + a.minutes);
                to_percentage(top, total)
            };
            ObsessionLevel { rank, percentage }
        })
        .collect()
}

/// Split listening into top 1, the rest of the top 5, the rest of the top 10
/// and everyone else.
///
/// Negative differences are clamped to zero and zero-sized segments are left
/// out, so an empty table yields an empty breakdown.
pub fn obsession_breakdown(table: &EventTable) -> Vec<ObsessionSegment> {
    let levels = obsession_multi(table, &[1, 5, 10]);
    if table.total_minutes() <= 0.0 {
        return Vec::new();
    }
    let (top1, top5, top10) = (
        levels[0].percentage,
        levels[1].percentage,
        levels[2].percentage,
    );

    [
        (ObsessionTier::Top1, top1),
        (ObsessionTier::RestOfTop5, top5 - top1),
        (ObsessionTier::RestOfTop10, top10 - top5),
        (ObsessionTier::Other, 100.0 - top10),
    ]
    .into_iter()
    .map(|(tier, share)| ObsessionSegment {
        tier,
        percentage: round2(share).max(0.0),
    })
    .filter(|segment| segment.percentage > 0.0)
    .collect()
}

fn to_percentage(part: f64, total: f64) -> f64 {
    round2(part / total * 100.0).clamp(0.0, 100.0)
}
