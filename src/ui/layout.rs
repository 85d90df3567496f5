use tui::layout::{Constraint, Layout, Rect, Size};

pub const TAB_BAR_HEIGHT: u16 = 3;
pub const LOG_PANE_HEIGHT: u16 = 8;
pub const SCORE_CARD_HEIGHT: u16 = 6;
pub const MATCH_CARD_HEIGHT: u16 = 6;
pub const MATCH_CARD_COLUMNS: usize = 3;
/// Two more rows for the entry links under each card.
pub const MATCH_CARD_LINKS_HEIGHT: u16 = MATCH_CARD_HEIGHT + 2;

pub fn match_card_height(show_links: bool) -> u16 {
    if show_links { MATCH_CARD_LINKS_HEIGHT } else { MATCH_CARD_HEIGHT }
}

/// Pre-computed layout areas for the main draw loop.
pub struct LayoutAreas {
    pub tab_bar: [Rect; 2],
    pub main: Rect,
    pub logs: Option<Rect>,
}

impl LayoutAreas {
    pub fn new(size: Size) -> Self {
        let rect = Rect::new(0, 0, size.width, size.height);
        Self::from_rect(rect, false, false)
    }

    pub fn update(&mut self, area: Rect, full_screen: bool, show_logs: bool) {
        *self = Self::from_rect(area, full_screen, show_logs);
    }

    fn from_rect(area: Rect, full_screen: bool, show_logs: bool) -> Self {
        let (area, logs) = Self::split_logs(area, show_logs);

        if full_screen {
            return LayoutAreas {
                tab_bar: [Rect::ZERO, Rect::ZERO],
                main: area,
                logs,
            };
        }

        let [tab, main] =
            Layout::vertical([Constraint::Length(TAB_BAR_HEIGHT), Constraint::Fill(1)]).areas(area);

        LayoutAreas {
            tab_bar: Self::split_tab_bar(tab),
            main,
            logs,
        }
    }

    fn split_logs(area: Rect, show_logs: bool) -> (Rect, Option<Rect>) {
        if !show_logs || area.height <= LOG_PANE_HEIGHT * 2 {
            return (area, None);
        }
        let [rest, logs] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(LOG_PANE_HEIGHT)]).areas(area);
        (rest, Some(logs))
    }

    fn split_tab_bar(area: Rect) -> [Rect; 2] {
        Layout::horizontal([Constraint::Percentage(85), Constraint::Percentage(15)]).areas(area)
    }
}

/// Areas of the dashboard tab, top to bottom.
pub struct DashboardAreas {
    pub score_cards: [Rect; 2],
    pub leader: Rect,
    pub gameweek: Rect,
    pub matches: Rect,
    pub rankings: Rect,
    pub status: Rect,
}

impl DashboardAreas {
    pub fn new(area: Rect, show_links: bool) -> Self {
        let [cards, leader, gameweek, matches, rankings, status] = Layout::vertical([
            Constraint::Length(SCORE_CARD_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(match_card_height(show_links)),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        Self {
            score_cards: Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(cards),
            leader,
            gameweek,
            matches,
            rankings,
            status,
        }
    }
}

/// Evenly split a row into `n` match card slots.
pub fn match_columns(area: Rect, n: usize) -> Vec<Rect> {
    if n == 0 {
        return Vec::new();
    }
    Layout::horizontal(vec![Constraint::Ratio(1, n as u32); n])
        .split(area)
        .to_vec()
}
