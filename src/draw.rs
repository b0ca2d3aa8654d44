use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs, Wrap};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::state::network::{ERROR_CHAR, LoadingState};
use fantasy_api::{FreeAgent, LeagueInfo, Standing, Team};

static TABS: &[&str; 3] = &["Standings", "Teams", "Free Agents"];

const TAB_BAR_HEIGHT: u16 = 3;
/// Roster rows shown per team before collapsing the rest into a count.
const ROSTER_DISPLAY_LIMIT: usize = 5;

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    terminal
        .draw(|f| {
            let (tab_bar, main) = split_frame(f.area(), app.settings.full_screen);

            if !app.settings.full_screen {
                draw_tabs(f, tab_bar, app);
            }

            match app.state.active_tab {
                MenuItem::Standings | MenuItem::Teams | MenuItem::FreeAgents => {
                    draw_dashboard(f, main, app);
                }
                MenuItem::Help => draw_placeholder(
                    f,
                    main,
                    "Help: q=quit  1=Standings  2=Teams  3=Free Agents  r=reload  j/k=scroll  f=fullscreen  \"=logs",
                ),
            }

            if app.state.show_logs {
                draw_logs_overlay(f, f.area());
            }
            draw_loading_spinner(f, f.area(), app, loading);
        })
        .unwrap();
}

/// Tab bar on top, content below; full-screen mode gives the content
/// everything.
fn split_frame(area: Rect, full_screen: bool) -> ([Rect; 2], Rect) {
    if full_screen {
        return ([Rect::ZERO, Rect::ZERO], area);
    }
    let [tab, main] =
        Layout::vertical([Constraint::Length(TAB_BAR_HEIGHT), Constraint::Fill(1)]).areas(area);
    let tab_bar =
        Layout::horizontal([Constraint::Percentage(85), Constraint::Percentage(15)]).areas(tab);
    (tab_bar, main)
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
        MenuItem::Standings => 0,
        MenuItem::Teams => 1,
        MenuItem::FreeAgents => 2,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
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

/// The three data tabs share one load surface: a single loading and error
/// state regardless of which sub-fetch failed, data only when all succeeded.
fn draw_dashboard(f: &mut Frame, area: Rect, app: &App) {
    if app.state.dashboard.is_loading() {
        draw_loading(f, area);
    } else if let Some(message) = app.state.dashboard.error() {
        draw_error(f, area, message);
    } else {
        draw_ready(f, area, app);
    }
}

fn draw_loading(f: &mut Frame, area: Rect) {
    let block = default_border(Color::DarkGray);
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new("Loading your league data...")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        inner,
    );
}

fn draw_error(f: &mut Frame, area: Rect, message: &str) {
    let block = default_border(Color::Red).title(" Error ");
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(format!("{message}\n\nPress r to retry."))
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        inner,
    );
}

fn draw_ready(f: &mut Frame, area: Rect, app: &App) {
    let Some(data) = app.state.dashboard.data() else {
        return;
    };

    let title = match app.state.active_tab {
        MenuItem::Teams => " Teams ",
        MenuItem::FreeAgents => " Free Agents ",
        _ => " Standings ",
    };
    let block = default_border(Color::White).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [header, content] =
        Layout::vertical([Constraint::Length(3), Constraint::Fill(1)]).areas(inner);
    draw_league_header(f, header, app, &data.league);

    let lines = match app.state.active_tab {
        MenuItem::Teams => team_lines(&data.teams),
        MenuItem::FreeAgents => free_agent_lines(&data.free_agents),
        _ => standings_lines(&data.standings),
    };
    f.render_widget(
        Paragraph::new(lines.join("\n")).scroll((app.state.scroll_offset, 0)),
        content,
    );
}

fn draw_league_header(f: &mut Frame, area: Rect, app: &App, league: &LeagueInfo) {
    let name = if league.name.is_empty() {
        "Fantasy League Dashboard"
    } else {
        league.name.as_str()
    };
    let mut summary = format!(
        "{} Season • Week {} • {} Teams",
        league.year, league.current_week, league.size
    );
    if let Some(at) = app.state.last_loaded_at.as_deref() {
        summary.push_str(&format!("  (updated {at})"));
    }

    let lines = vec![
        Line::from(Span::styled(
            name.to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(summary, Style::default().fg(Color::DarkGray))),
        Line::from(""),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

// ---------------------------------------------------------------------------
// Tab content — plain text rows, service order throughout
// ---------------------------------------------------------------------------

/// Rows follow the fetched rank order; the service's ranking is
/// authoritative and is never re-sorted here.
fn standings_lines(standings: &[Standing]) -> Vec<String> {
    let mut lines = Vec::with_capacity(standings.len() + 1);
    lines.push(format!(
        "{:>4}  {:<24} {:<18} {:>7} {:>9} {:>9}",
        "Rank", "Team", "Owner", "Record", "PF", "PA"
    ));
    for standing in standings {
        lines.push(format!(
            "{:>4}  {:<24} {:<18} {:>7} {:>9} {:>9}",
            standing.rank,
            clip(&standing.team_name, 24),
            clip(standing.primary_owner(), 18),
            format!("{}-{}", standing.wins, standing.losses),
            fmt_points_1(standing.points_for),
            fmt_points_1(standing.points_against),
        ));
    }
    lines
}

fn team_lines(teams: &[Team]) -> Vec<String> {
    let mut lines = Vec::new();
    for team in teams {
        lines.push(team.name.clone());
        lines.push(format!("{} • {}-{}", team.primary_owner(), team.wins, team.losses));
        for player in team.roster.iter().take(ROSTER_DISPLAY_LIMIT) {
            let injury = if player.injured { " INJ" } else { "" };
            lines.push(format!(
                "  {}{injury}  {} - {}",
                player.name, player.position, player.pro_team
            ));
        }
        if team.roster.len() > ROSTER_DISPLAY_LIMIT {
            lines.push(format!(
                "  +{} more players",
                team.roster.len() - ROSTER_DISPLAY_LIMIT
            ));
        }
        lines.push(String::new());
    }
    lines
}

fn free_agent_lines(free_agents: &[FreeAgent]) -> Vec<String> {
    let mut lines = Vec::with_capacity(free_agents.len() + 1);
    lines.push(format!(
        "{:<24} {:<5} {:<5} {:>10} {:>8}",
        "Player", "Pos", "Team", "Avg Pts", "Total"
    ));
    for player in free_agents {
        lines.push(format!(
            "{:<24} {:<5} {:<5} {:>10} {:>8}",
            clip(&player.name, 24),
            player.position,
            player.pro_team,
            fmt_points_2(player.avg_points),
            fmt_points_1(player.total_points),
        ));
    }
    lines
}

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

fn draw_logs_overlay(f: &mut Frame, area: Rect) {
    let [_, bottom] = Layout::vertical([Constraint::Fill(1), Constraint::Length(12)]).areas(area);
    f.render_widget(Clear, bottom);
    f.render_widget(
        TuiLoggerWidget::default().block(default_border(Color::DarkGray).title(" Logs ")),
        bottom,
    );
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

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// One-decimal display used for points-for/against and total points.
/// Half-way values round away from zero.
fn fmt_points_1(value: f64) -> String {
    format!("{:.1}", round_to(value, 10.0))
}

/// Two-decimal display used for free-agent per-game averages.
fn fmt_points_2(value: f64) -> String {
    format!("{:.2}", round_to(value, 100.0))
}

fn round_to(value: f64, scale: f64) -> f64 {
    (value * scale).round() / scale
}

fn clip(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fantasy_api::{Owner, Player};

    fn player(name: &str) -> Player {
        Player {
            name: name.into(),
            position: "PG".into(),
            pro_team: "BOS".into(),
            injured: false,
        }
    }

    #[test]
    fn one_decimal_rounds_half_away_from_zero() {
        assert_eq!(fmt_points_1(102.567), "102.6");
        assert_eq!(fmt_points_1(98.0), "98.0");
        // 0.25 is exactly representable, so the tie is real.
        assert_eq!(fmt_points_1(0.25), "0.3");
    }

    #[test]
    fn two_decimal_rounds_half_away_from_zero() {
        assert_eq!(fmt_points_2(18.044), "18.04");
        assert_eq!(fmt_points_2(18.046), "18.05");
        assert_eq!(fmt_points_2(7.5), "7.50");
        // 0.125 is exactly representable, so the tie is real.
        assert_eq!(fmt_points_2(0.125), "0.13");
    }

    #[test]
    fn roster_shows_five_players_and_a_remainder_count() {
        let team = Team {
            name: "Ballers".into(),
            roster: (0..8).map(|i| player(&format!("Player {i}"))).collect(),
            ..Default::default()
        };
        let lines = team_lines(std::slice::from_ref(&team));

        let roster_rows = lines
            .iter()
            .filter(|l| l.starts_with("  ") && !l.contains("more players"))
            .count();
        assert_eq!(roster_rows, 5);
        assert!(lines.iter().any(|l| l.trim() == "+3 more players"));
        // Truncation is display-only.
        assert_eq!(team.roster.len(), 8);
    }

    #[test]
    fn short_roster_has_no_remainder_line() {
        let team = Team {
            roster: (0..3).map(|i| player(&format!("Player {i}"))).collect(),
            ..Default::default()
        };
        let lines = team_lines(std::slice::from_ref(&team));
        assert!(!lines.iter().any(|l| l.contains("more players")));
    }

    #[test]
    fn injured_players_are_flagged() {
        let team = Team {
            roster: vec![Player { injured: true, ..player("J. Embiid") }],
            ..Default::default()
        };
        let lines = team_lines(std::slice::from_ref(&team));
        assert!(lines.iter().any(|l| l.contains("J. Embiid INJ")));
    }

    #[test]
    fn standings_rows_follow_fetched_order() {
        // Service order is authoritative even when it disagrees with rank.
        let standings = vec![
            Standing { rank: 2, team_name: "Dunkers".into(), ..Default::default() },
            Standing { rank: 1, team_name: "Ballers".into(), ..Default::default() },
        ];
        let lines = standings_lines(&standings);
        assert!(lines[1].contains("Dunkers"));
        assert!(lines[2].contains("Ballers"));
    }

    #[test]
    fn standings_row_formats_points_to_one_decimal() {
        let standings = vec![Standing {
            rank: 1,
            team_name: "Ballers".into(),
            owners: vec![Owner { display_name: "Alex".into(), ..Default::default() }],
            wins: 5,
            losses: 2,
            points_for: 102.567,
            points_against: 650.04,
        }];
        let lines = standings_lines(&standings);
        assert!(lines[1].contains("102.6"));
        assert!(lines[1].contains("650.0"));
        assert!(lines[1].contains("Alex"));
        assert!(lines[1].contains("5-2"));
    }

    #[test]
    fn missing_owner_renders_unknown() {
        let standings = vec![Standing { rank: 1, ..Default::default() }];
        assert!(standings_lines(&standings)[1].contains("Unknown"));
    }

    #[test]
    fn free_agent_rows_preserve_service_order_and_precision() {
        let agents = vec![
            FreeAgent {
                name: "B. Lopez".into(),
                position: "C".into(),
                pro_team: "MIL".into(),
                avg_points: 28.35,
                total_points: 411.5,
            },
            FreeAgent { name: "T. Herro".into(), avg_points: 18.046, ..Default::default() },
        ];
        let lines = free_agent_lines(&agents);
        assert_eq!(lines.len(), 3, "header plus one row per agent");
        assert!(lines[1].contains("B. Lopez"));
        assert!(lines[1].contains("28.35"));
        assert!(lines[1].contains("411.5"));
        assert!(lines[2].contains("18.05"));
    }

    #[test]
    fn a_full_page_of_ten_agents_renders_ten_rows() {
        let agents: Vec<FreeAgent> = (0..10)
            .map(|i| FreeAgent { name: format!("Agent {i}"), ..Default::default() })
            .collect();
        let lines = free_agent_lines(&agents);
        assert_eq!(lines.len(), 11);
        assert!(lines[1].contains("Agent 0"));
        assert!(lines[10].contains("Agent 9"));
    }
}
