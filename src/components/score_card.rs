use std::str::FromStr;
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Widget};

/// Big team total on the dashboard. The leading team gets a thick border.
pub struct ScoreCard<'a> {
    pub team_name: &'a str,
    pub match_points: u32,
    pub color: Color,
    pub highlight: bool,
}

impl Widget for ScoreCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_type = if self.highlight { BorderType::Thick } else { BorderType::Rounded };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(border_type)
            .border_style(Style::default().fg(self.color));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let name: String = self.team_name.chars().take(inner.width as usize).collect();
        let points = digits(self.match_points);
        let rows = [
            Line::from(Span::styled(name, Style::default().fg(self.color).add_modifier(Modifier::BOLD))),
            Line::from(Span::styled(
                points,
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled("Match points", Style::default().fg(Color::Gray))),
        ];

        // Vertically centre the three rows when there is room.
        let top = inner.y + inner.height.saturating_sub(rows.len() as u16) / 2;
        for (i, line) in rows.into_iter().enumerate() {
            render_centered(line, inner, top + i as u16, buf);
        }
    }
}

/// Team colours are stored as `#rrggbb`.
pub fn parse_color(hex: &str) -> Color {
    Color::from_str(hex).unwrap_or(Color::Gray)
}

/// Spaced-out digits read better as a headline number in a terminal.
pub fn digits(n: u32) -> String {
    n.to_string()
        .chars()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_centered(line: Line, area: Rect, y: u16, buf: &mut Buffer) {
    if y >= area.y + area.height {
        return;
    }
    let w = line.width() as u16;
    let x = area.x + area.width.saturating_sub(w) / 2;
    buf.set_line(x, y, &line, area.width);
}
