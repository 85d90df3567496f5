use chrono::Local;
use log::error;
use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, Tabs};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::components::match_card::{DASH, MatchCard, NEUTRAL, score_text, winner_text};
use crate::components::score_card::{ScoreCard, parse_color};
use crate::league::tables::Leader;
use crate::league::{LeagueTables, TeamKey};
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::layout::{DashboardAreas, LayoutAreas, MATCH_CARD_COLUMNS, match_columns};

static TABS: &[&str; 3] = &["Dashboard", "All Games", "Teams"];

const LOADING_TEXT: &str = "Loading league data...";

const HELP_TEXT: &str = "\
1 Dashboard   2 All Games   3 Teams   ? Help   Esc close help

h/l or ←/→   previous / next gameweek (Dashboard)
c            jump to the current gameweek
j/k or ↓/↑   scroll tables
r            refresh (cached for 15 minutes)
R            refresh now, bypassing the cache
f            full screen (match cards also show each player's FPL gameweek link)
\"            toggle log pane
q, Ctrl-C    quit";

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
        }

        match app.state.active_tab {
            MenuItem::Dashboard => draw_dashboard(f, layout.main, app),
            MenuItem::AllGames => draw_all_games(f, layout.main, app),
            MenuItem::Teams => draw_teams(f, layout.main, app),
            MenuItem::Help => draw_placeholder(f, layout.main, HELP_TEXT),
        }

        if let Some(logs) = layout.logs {
            draw_logs(f, logs);
        }

        draw_loading_spinner(f, f.area(), app, loading);
    });

    if let Err(e) = result {
        error!("failed to draw frame: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Dashboard => 0,
        MenuItem::AllGames => 1,
        MenuItem::Teams => 2,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type)
                .title(format!(" {} ", app.league.name)),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

fn team_color(app: &App, key: TeamKey) -> Color {
    parse_color(&app.league.roster.team(key).color)
}

fn team_name(app: &App, key: TeamKey) -> &str {
    &app.league.roster.team(key).name
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

fn draw_dashboard(f: &mut Frame, area: Rect, app: &App) {
    let Some(tables) = app.state.league.tables.as_ref() else {
        draw_placeholder(f, area, LOADING_TEXT);
        return;
    };

    let areas = DashboardAreas::new(area, app.settings.full_screen);
    let leader = tables.leader();
    let pre_season = app.state.league.pre_season;

    for (key, card_area) in TeamKey::ALL.into_iter().zip(areas.score_cards) {
        f.render_widget(
            ScoreCard {
                team_name: team_name(app, key),
                match_points: tables.standing(key),
                color: team_color(app, key),
                highlight: !pre_season && matches!(leader, Leader::Team { team, .. } if team == key),
            },
            card_area,
        );
    }

    f.render_widget(
        Paragraph::new(leader_line(app, leader, pre_season)).alignment(Alignment::Center),
        areas.leader,
    );
    f.render_widget(
        Paragraph::new(gameweek_lines(app)).alignment(Alignment::Center),
        areas.gameweek,
    );

    draw_match_cards(f, areas.matches, app, tables);
    draw_rankings(f, areas.rankings, app, tables);
    draw_status(f, areas.status, app);
}

fn leader_line(app: &App, leader: Leader, pre_season: bool) -> Line<'static> {
    if pre_season {
        return Line::from(Span::styled(
            "Season has not started",
            Style::default().fg(Color::DarkGray),
        ));
    }
    match leader {
        Leader::Team { team, margin } => Line::from(vec![
            Span::styled(
                team_name(app, team).to_string(),
                Style::default().fg(team_color(app, team)).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" lead by {margin}")),
        ]),
        Leader::Tied { match_points } => Line::from(format!("All square on {match_points}")),
    }
}

fn gameweek_lines(app: &App) -> Vec<Line<'static>> {
    let league = &app.state.league;
    let gw = league.selected_gameweek;
    let mut title = vec![
        Span::styled("◀ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Gameweek {gw} of {}", league.gameweek_count),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ▶", Style::default().fg(Color::DarkGray)),
    ];
    if gw == league.current_gameweek {
        title.push(Span::styled("  current", Style::default().fg(Color::Green)));
    }

    let deadline = league
        .calendar
        .as_ref()
        .and_then(|c| c.deadline(gw))
        .map(|d| format!("Deadline {}", d.with_timezone(&Local).format("%a %d %b %H:%M")))
        .unwrap_or_default();

    let mut detail = Vec::new();
    if let Some(tables) = league.tables.as_ref().filter(|_| !league.pre_season) {
        let week: Vec<String> = tables
            .team_weekly_for(gw)
            .map(|t| format!("{} {}", team_name(app, t.team), t.points))
            .collect();
        detail.push(Span::styled(week.join("  v  "), Style::default().fg(Color::Gray)));
    }
    if !deadline.is_empty() {
        if !detail.is_empty() {
            detail.push(Span::raw("   "));
        }
        detail.push(Span::styled(deadline, Style::default().fg(Color::DarkGray)));
    }

    vec![Line::from(title), Line::from(detail)]
}

fn draw_match_cards(f: &mut Frame, area: Rect, app: &App, tables: &LeagueTables) {
    let fixtures: Vec<_> = tables.fixtures_for(app.state.league.selected_gameweek).collect();
    if fixtures.is_empty() {
        draw_placeholder(f, area, "No matches this gameweek");
        return;
    }

    let columns = match_columns(area, fixtures.len().min(MATCH_CARD_COLUMNS));
    for (fixture, slot) in fixtures.into_iter().zip(columns) {
        let winner_color = fixture
            .winner_team()
            .map(|team| team_color(app, team))
            .unwrap_or(NEUTRAL);
        f.render_widget(
            MatchCard {
                fixture,
                pre_season: app.state.league.pre_season,
                winner_color,
                show_links: app.settings.full_screen,
            },
            slot,
        );
    }
}

fn draw_rankings(f: &mut Frame, area: Rect, app: &App, tables: &LeagueTables) {
    let pre_season = app.state.league.pre_season;
    let header = Row::new(vec!["#", "Player", "Team", "Wins", "Points"])
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));

    let rows = tables.participant_summary.iter().enumerate().map(|(i, p)| {
        let (wins, points) = if pre_season {
            (DASH.to_string(), DASH.to_string())
        } else {
            (p.wins.to_string(), p.total_points.to_string())
        };
        Row::new(vec![
            Cell::from((i + 1).to_string()),
            Cell::from(p.participant_name.clone()),
            Cell::from(team_name(app, p.team).to_string())
                .style(Style::default().fg(team_color(app, p.team))),
            Cell::from(wins),
            Cell::from(points),
        ])
    });

    let widths = [
        Constraint::Length(3),
        Constraint::Min(10),
        Constraint::Min(12),
        Constraint::Length(6),
        Constraint::Length(8),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(default_border(Color::White).title(" Player Rankings "));
    f.render_widget(table, area);
}

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = Vec::new();
    if let Some(updated) = app.state.league.last_updated.as_deref() {
        spans.push(Span::styled(
            format!("Updated {updated}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    if let Some(err) = app.state.last_error.as_deref() {
        if !spans.is_empty() {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(err.to_string(), Style::default().fg(Color::Red)));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

// ---------------------------------------------------------------------------
// All games
// ---------------------------------------------------------------------------

fn draw_all_games(f: &mut Frame, area: Rect, app: &App) {
    let Some(tables) = app.state.league.tables.as_ref() else {
        draw_placeholder(f, area, LOADING_TEXT);
        return;
    };
    let pre_season = app.state.league.pre_season;
    let current = app.state.league.current_gameweek;

    let header = Row::new(vec![
        Cell::from("GW"),
        Cell::from(team_name(app, TeamKey::Home).to_string()),
        Cell::from(""),
        Cell::from(""),
        Cell::from(team_name(app, TeamKey::Away).to_string()),
        Cell::from("Winner"),
    ])
    .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));

    let rows = tables
        .fixtures
        .iter()
        .skip(app.state.games_scroll as usize)
        .map(|fixture| {
            let winner_style = fixture
                .winner_team()
                .filter(|_| !pre_season)
                .map(|team| Style::default().fg(team_color(app, team)))
                .unwrap_or_default();
            let row = Row::new(vec![
                Cell::from(fixture.gameweek.to_string()),
                Cell::from(fixture.left.participant_name.clone()),
                Cell::from(score_text(fixture.left.score, pre_season)),
                Cell::from(score_text(fixture.right.score, pre_season)),
                Cell::from(fixture.right.participant_name.clone()),
                Cell::from(winner_text(fixture, pre_season)).style(winner_style),
            ]);
            if fixture.gameweek == current {
                row.style(Style::default().add_modifier(Modifier::BOLD))
            } else {
                row
            }
        });

    let widths = [
        Constraint::Length(4),
        Constraint::Min(10),
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Min(10),
        Constraint::Min(10),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(default_border(Color::White).title(" All Games (j/k to scroll) "));
    f.render_widget(table, area);
}

// ---------------------------------------------------------------------------
// Teams
// ---------------------------------------------------------------------------

fn draw_teams(f: &mut Frame, area: Rect, app: &App) {
    let Some(tables) = app.state.league.tables.as_ref() else {
        draw_placeholder(f, area, LOADING_TEXT);
        return;
    };
    let pre_season = app.state.league.pre_season;

    let [totals_area, table_area] =
        Layout::vertical([Constraint::Length(TeamKey::ALL.len() as u16 + 2), Constraint::Fill(1)])
            .areas(area);

    let totals: Vec<Line> = TeamKey::ALL
        .into_iter()
        .map(|key| {
            Line::from(vec![
                Span::styled(
                    format!("{:<24}", team_name(app, key)),
                    Style::default().fg(team_color(app, key)).add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("{:<18}", format!("{} match points", tables.standing(key)))),
                Span::styled(
                    app.league
                        .roster
                        .members(key)
                        .map(|p| p.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", "),
                    Style::default().fg(Color::Gray),
                ),
            ])
        })
        .collect();
    f.render_widget(
        Paragraph::new(totals).block(default_border(Color::White).title(" Scoreboard ")),
        totals_area,
    );

    let header = Row::new(vec!["GW", "Team", "Points", "Match pts"])
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));
    let rows = tables
        .team_weekly
        .iter()
        .skip(app.state.teams_scroll as usize)
        .map(|t| {
            let points = if pre_season { DASH.to_string() } else { t.points.to_string() };
            Row::new(vec![
                Cell::from(t.gameweek.to_string()),
                Cell::from(team_name(app, t.team).to_string())
                    .style(Style::default().fg(team_color(app, t.team))),
                Cell::from(points),
                Cell::from(t.match_points.to_string()),
            ])
        });
    let widths = [
        Constraint::Length(4),
        Constraint::Min(16),
        Constraint::Length(8),
        Constraint::Length(10),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(default_border(Color::White).title(" Team Performance by Gameweek "));
    f.render_widget(table, table_area);
}

// ---------------------------------------------------------------------------
// Shared
// ---------------------------------------------------------------------------

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    let block = default_border(Color::DarkGray);
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        inner,
    );
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let logs = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Gray));
    f.render_widget(logs, area);
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::league::{PointsByParticipant, builtin};
    use crate::state::app_settings::AppSettings;
    use fpl_api::GameweekPoints;
    use tui::backend::TestBackend;

    fn app() -> App {
        App::new(builtin::fpl_geese_vs_bbbsas().unwrap(), AppSettings::default())
    }

    fn screen(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        draw(&mut terminal, app, LoadingState::default());
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn dashboard_before_first_load_shows_loading() {
        let mut app = app();
        let text = screen(&mut app, 120, 40);
        assert!(text.contains("Loading league data..."));
    }

    #[test]
    fn dashboard_pre_season_uses_dashes() {
        let mut app = app();
        app.on_league_loaded(PointsByParticipant::new(), None, vec![]);
        let text = screen(&mut app, 150, 40);
        assert!(text.contains("Gameweek 1 of 18"));
        assert!(text.contains("Season has not started"));
        assert!(text.contains("Winner: —"));
        assert!(text.contains("Player Rankings"));
    }

    #[test]
    fn dashboard_in_season_shows_leader() {
        let mut app = app();
        let points: PointsByParticipant = [(454394, GameweekPoints::from([(1, 80)]))]
            .into_iter()
            .collect();
        app.on_league_loaded(points, None, vec![]);
        let text = screen(&mut app, 150, 40);
        assert!(text.contains("Appreciation Society lead by 1"));
        assert!(text.contains("Winner: Frej"));
    }

    #[test]
    fn full_screen_dashboard_links_both_sides() {
        let mut app = app();
        let points: PointsByParticipant = [(454394, GameweekPoints::from([(1, 80)]))]
            .into_iter()
            .collect();
        app.on_league_loaded(points, None, vec![]);
        app.toggle_full_screen();
        let text = screen(&mut app, 200, 40);
        let gw1 = app.state.league.tables.as_ref().unwrap().fixtures_for(1).count();
        assert_eq!(text.matches("/event/1").count(), gw1 * 2);
    }

    #[test]
    fn failed_entries_show_on_the_status_line() {
        let mut app = app();
        app.on_league_loaded(PointsByParticipant::new(), None, vec![727945]);
        let text = screen(&mut app, 150, 40);
        assert!(text.contains("No data for Phil (counted as 0)"));
    }

    #[test]
    fn other_tabs_render() {
        let mut app = app();
        app.on_league_loaded(PointsByParticipant::new(), None, vec![]);

        app.update_tab(MenuItem::AllGames);
        assert!(screen(&mut app, 120, 30).contains("All Games"));

        app.update_tab(MenuItem::Teams);
        assert!(screen(&mut app, 120, 30).contains("Team Performance by Gameweek"));

        app.update_tab(MenuItem::Help);
        let help = screen(&mut app, 120, 30);
        assert!(help.contains("jump to the current gameweek"));
        assert!(help.contains("FPL gameweek link"));
    }

    #[test]
    fn tiny_terminal_is_skipped() {
        let mut app = app();
        screen(&mut app, 8, 8);
    }
}
