use super::tables::LeagueTables;
use fpl_api::{GameweekId, SeasonCalendar};

/// Pick the gameweek the dashboard opens on.
///
/// Fallback chain, first hit wins:
/// 1) the calendar's current gameweek,
/// 2) the calendar's latest previous gameweek,
/// 3) the last gameweek where the league scored anything at all,
/// 4) gameweek 1.
///
/// The result is always within `1..=gameweek_count`.
pub fn detect_current(
    calendar: Option<&SeasonCalendar>,
    tables: &LeagueTables,
    gameweek_count: GameweekId,
) -> GameweekId {
    let last = gameweek_count.max(1);

    let signal = calendar.and_then(|cal| cal.current().or_else(|| cal.previous()));
    if let Some(gw) = signal {
        return gw.clamp(1, last);
    }

    tables
        .weekly_totals()
        .into_iter()
        .filter(|&(_, total)| total != 0)
        .map(|(gw, _)| gw)
        .max()
        .unwrap_or(1)
        .clamp(1, last)
}
