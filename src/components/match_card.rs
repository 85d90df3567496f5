use crate::league::tables::FixtureRow;
use fpl_api::entry_event_url;
use tui::buffer::Buffer;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Widget};

/// Shown instead of scores and winners before anyone has scored.
pub const DASH: &str = "—";

pub const NEUTRAL: Color = Color::Gray;

/// One head-to-head fixture of the selected gameweek.
pub struct MatchCard<'a> {
    pub fixture: &'a FixtureRow,
    pub pre_season: bool,
    /// Accent for the winner line; neutral on a draw.
    pub winner_color: Color,
    pub show_links: bool,
}

impl Widget for MatchCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Match ");
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width < 5 || inner.height == 0 {
            return;
        }

        let f = self.fixture;
        let [left, vs, right] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(4),
            Constraint::Fill(1),
        ])
        .areas(inner);

        let name_style = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
        let score_style = Style::default().fg(Color::White);
        let side = |name: &str, score: i32| {
            vec![
                Line::from(Span::styled(name.to_string(), name_style)),
                Line::from(Span::styled(score_text(score, self.pre_season), score_style)),
            ]
        };

        Paragraph::new(side(&f.left.participant_name, f.left.score)).render(left, buf);
        Paragraph::new("vs")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .render(vs, buf);
        Paragraph::new(side(&f.right.participant_name, f.right.score))
            .alignment(Alignment::Right)
            .render(right, buf);

        let mut footer = Vec::new();
        let winner = winner_text(f, self.pre_season);
        let mut winner_line = vec![
            Span::styled("Winner: ", Style::default().fg(Color::DarkGray)),
            Span::styled(winner, Style::default().fg(self.winner_color).add_modifier(Modifier::BOLD)),
        ];
        if !self.pre_season && !f.winner.is_draw() {
            winner_line.push(Span::raw(" "));
            winner_line.push(Span::styled(
                " WIN ",
                Style::default().fg(Color::Black).bg(self.winner_color),
            ));
        }
        footer.push(Line::from(winner_line));
        if self.show_links {
            for side in [&f.left, &f.right] {
                footer.push(Line::from(Span::styled(
                    entry_event_url(side.participant_id, f.gameweek),
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }

        let footer_height = footer.len() as u16;
        if inner.height > 2 {
            let y = inner.y + inner.height.saturating_sub(footer_height).max(2);
            let footer_area = Rect::new(inner.x, y, inner.width, inner.bottom().saturating_sub(y));
            Paragraph::new(footer).render(footer_area, buf);
        }
    }
}

pub fn score_text(score: i32, pre_season: bool) -> String {
    if pre_season { DASH.to_string() } else { score.to_string() }
}

pub fn winner_text(fixture: &FixtureRow, pre_season: bool) -> String {
    if pre_season {
        DASH.to_string()
    } else {
        fixture.winner.label().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::league::roster::TeamKey;
    use crate::league::tables::{DRAW, FixtureSide, Winner};
    use crate::ui::layout::{MATCH_CARD_HEIGHT, match_card_height};

    fn fixture(left: i32, right: i32) -> FixtureRow {
        let side = |id, name: &str, team, score, match_point| FixtureSide {
            participant_id: id,
            participant_name: name.into(),
            team,
            score,
            match_point,
        };
        let (lmp, rmp, winner) = match left.cmp(&right) {
            std::cmp::Ordering::Greater => (1, 0, Winner::Participant { id: 454394, name: "Frej".into() }),
            std::cmp::Ordering::Less => (0, 1, Winner::Participant { id: 727945, name: "Phil".into() }),
            std::cmp::Ordering::Equal => (0, 0, Winner::Draw),
        };
        FixtureRow {
            gameweek: 3,
            left: side(454394, "Frej", TeamKey::Home, left, lmp),
            right: side(727945, "Phil", TeamKey::Away, right, rmp),
            winner,
        }
    }

    fn rendered(card: MatchCard, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        card.render(area, &mut buf);
        buf.content.iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_pre_season_hides_scores() {
        let f = fixture(0, 0);
        assert_eq!(score_text(f.left.score, true), DASH);
        assert_eq!(winner_text(&f, true), DASH);
        assert_eq!(winner_text(&f, false), DRAW);
    }

    #[test]
    fn test_in_season_shows_numbers() {
        let f = fixture(61, 48);
        assert_eq!(score_text(f.left.score, false), "61");
        assert_eq!(score_text(-4, false), "-4");
        assert_eq!(winner_text(&f, false), "Frej");
    }

    #[test]
    fn test_card_renders_both_sides_and_badge() {
        let f = fixture(44, 70);
        let text = rendered(
            MatchCard { fixture: &f, pre_season: false, winner_color: Color::Blue, show_links: false },
            40,
            MATCH_CARD_HEIGHT,
        );
        assert!(text.contains("Frej"));
        assert!(text.contains("Phil"));
        assert!(text.contains("70"));
        assert!(text.contains("Winner: Phil"));
        assert!(text.contains("WIN"));
    }

    #[test]
    fn test_draw_has_no_badge() {
        let f = fixture(50, 50);
        let text = rendered(
            MatchCard { fixture: &f, pre_season: false, winner_color: NEUTRAL, show_links: false },
            40,
            6,
        );
        assert!(text.contains("Winner: Draw"));
        assert!(!text.contains("WIN "));
    }

    #[test]
    fn test_links_point_at_gameweek() {
        let f = fixture(1, 0);
        let text = rendered(
            MatchCard { fixture: &f, pre_season: false, winner_color: Color::Blue, show_links: true },
            70,
            match_card_height(true),
        );
        assert!(text.contains("Winner: Frej"));
        assert!(text.contains("/entry/454394/event/3"));
        assert!(text.contains("/entry/727945/event/3"));
    }
}
