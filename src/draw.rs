use std::time::Instant;

use tui::backend::Backend;
use tui::{Frame, Terminal};
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Tabs};

use crate::app::App;
use crate::state::network::LoadingState;
use crate::ui::layout::LayoutAreas;
use chrono::Local;
use scorebox_api::{
    BaseballSituation, BasketballSituation, FootballSituation, Game, GameStatus, League, Situation,
};

pub fn draw<B>(terminal: &mut Terminal<B>, app: &App, loading: LoadingState, now: Instant)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 6 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    terminal
        .draw(|f| {
            layout.update(f.area());

            draw_header(f, layout.header, app, loading);

            if app.state.show_logs {
                draw_logs(f, layout.main);
            } else {
                draw_game(f, layout.main, app, now);
            }

            draw_ticker(f, layout.ticker, app);
        })
        .unwrap();
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_header(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    let [tabs_area, meta_area] =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).areas(area);

    let selected = League::ALL
        .iter()
        .position(|l| *l == app.state.scoreboard.league)
        .unwrap_or(0);
    let titles: Vec<Line> = League::ALL.iter().map(|l| Line::from(l.code())).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(BorderType::Rounded),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED | Modifier::BOLD))
        .select(selected)
        .style(Style::default().fg(Color::White));
    f.render_widget(tabs, tabs_area);

    let rotate = if app.settings.autorotate { "auto" } else { "manual" };
    let busy = if loading.is_loading { '…' } else { loading.indicator };
    let meta = Paragraph::new(format!("{} | {rotate} {busy}", app.state.scoreboard.date))
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(BorderType::Rounded),
        )
        .style(Style::default().fg(Color::White));
    f.render_widget(meta, meta_area);
}

fn draw_ticker(f: &mut Frame, area: Rect, app: &App) {
    let sb = &app.state.scoreboard;
    let text = if sb.games.is_empty() {
        "←/→=game  1/2/3=league  [ ]=date  t=today  a=rotate  r=reload  q=quit".to_owned()
    } else {
        ticker_line(sb.league, sb.date, sb.games.len(), sb.index)
    };
    f.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn draw_game(f: &mut Frame, area: Rect, app: &App, now: Instant) {
    let sb = &app.state.scoreboard;
    let block = default_border(Color::White).title(format!(" {} ", sb.league.code()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if let Some(err) = sb.last_error.as_deref() {
        f.render_widget(
            Paragraph::new(format!("Error loading scores.\n{err}"))
                .style(Style::default().fg(Color::Red))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let Some(game) = sb.current() else {
        f.render_widget(
            Paragraph::new(empty_message(sb.league, sb.date))
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    };

    let mut lines: Vec<Line> = Vec::new();

    let status_style = if game.is_live() {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    lines.push(Line::from(Span::styled(status_label(game), status_style)));

    let mut meta_parts: Vec<String> = Vec::new();
    if !game.venue.is_empty() {
        meta_parts.push(game.venue.clone());
    }
    if let Some(start) = game.start {
        meta_parts.push(start.with_timezone(&Local).format("%-I:%M %p").to_string());
    }
    if !meta_parts.is_empty() {
        lines.push(Line::from(Span::styled(
            meta_parts.join(" • "),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::default());

    lines.push(team_line(&game.away));
    lines.push(team_line(&game.home));
    lines.push(Line::default());

    // Live situation — only for in-progress games, only when the cache holds
    // a fresh entry; otherwise the area simply stays empty for this pass.
    if let Some(situation) = app.displayed_situation(now) {
        let badges = situation_badges(game, situation);
        if !badges.is_empty() {
            lines.push(Line::from(Span::styled(
                badges.join("  |  "),
                Style::default().fg(Color::Yellow),
            )));
            lines.push(Line::default());
        }
    }

    if let Some(rows) = linescore_rows(game) {
        for row in rows {
            lines.push(Line::from(Span::styled(row, Style::default().fg(Color::Gray))));
        }
    }

    f.render_widget(Paragraph::new(lines), inner);
}

fn team_line(team: &scorebox_api::Team) -> Line<'static> {
    let record = if team.record.is_empty() {
        String::new()
    } else {
        format!(" ({})", team.record)
    };
    Line::from(vec![
        Span::styled(
            format!("{:<5}", team.short_label()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("{}{record}", team.name)),
        Span::styled(
            format!("  {:>3}", team.score),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ])
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let widget = tui_logger::TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style(Style::default().fg(Color::Gray));
    f.render_widget(widget, area);
}

// ---------------------------------------------------------------------------
// Formatting helpers — pure, unit tested
// ---------------------------------------------------------------------------

pub fn ticker_line(league: League, date: chrono::NaiveDate, count: usize, index: usize) -> String {
    let plural = if count == 1 { "game" } else { "games" };
    format!(
        "{} • {date} • {count} {plural} • Showing {}/{count}",
        league.code(),
        index + 1
    )
}

pub fn empty_message(league: League, date: chrono::NaiveDate) -> String {
    format!("No {} games on {date}.", league.code())
}

pub fn status_label(game: &Game) -> String {
    match game.status {
        GameStatus::Scheduled => match game.start {
            Some(start) => format!(
                "Scheduled • {}",
                start.with_timezone(&Local).format("%-I:%M %p")
            ),
            None => "Scheduled".to_owned(),
        },
        GameStatus::InProgress => {
            if game.status_detail.is_empty() {
                "LIVE".to_owned()
            } else {
                format!("LIVE • {}", game.status_detail)
            }
        }
        GameStatus::Final => "Final".to_owned(),
        GameStatus::Other => {
            if game.status_detail.is_empty() {
                "—".to_owned()
            } else {
                game.status_detail.clone()
            }
        }
    }
}

pub fn ordinal(n: u8) -> String {
    let suffix = match n % 100 {
        11..=13 => "th",
        _ => match n % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    };
    format!("{n}{suffix}")
}

/// Resolve a possession team id to the matching side's abbreviation (or name);
/// empty when neither side matches.
pub fn possession_label(game: &Game, possession_id: &str) -> String {
    if !game.home.id.is_empty() && game.home.id == possession_id {
        game.home.short_label().to_owned()
    } else if !game.away.id.is_empty() && game.away.id == possession_id {
        game.away.short_label().to_owned()
    } else {
        String::new()
    }
}

pub fn situation_badges(game: &Game, situation: &Situation) -> Vec<String> {
    match situation {
        Situation::Baseball(s) => baseball_badges(s),
        Situation::Football(s) => football_badges(game, s),
        Situation::Basketball(s) => basketball_badges(s),
    }
}

fn baseball_badges(s: &BaseballSituation) -> Vec<String> {
    let base = |on: bool| if on { '◆' } else { '◇' };
    vec![
        format!("Count {}–{}", s.balls, s.strikes),
        format!("{} out{}", s.outs, if s.outs == 1 { "" } else { "s" }),
        format!(
            "Bases {}{}{}",
            base(s.on_first),
            base(s.on_second),
            base(s.on_third)
        ),
    ]
}

fn football_badges(game: &Game, s: &FootballSituation) -> Vec<String> {
    let mut badges = Vec::new();
    if let Some(period) = s.period {
        badges.push(format!("Q{period}"));
    }
    if let Some(clock) = s.clock.as_deref().filter(|c| !c.is_empty()) {
        badges.push(clock.to_owned());
    }
    if let (Some(down), Some(distance)) = (s.down, s.distance)
        && down > 0
        && distance > 0
    {
        badges.push(format!("{} & {distance}", ordinal(down)));
    }
    if let Some(yard_line) = s.yard_line {
        badges.push(format!("{yard_line} yd line"));
    }
    if s.is_red_zone {
        badges.push("RED ZONE".to_owned());
    }
    if let Some(possession) = s.possession.as_deref() {
        let label = possession_label(game, possession);
        if !label.is_empty() {
            badges.push(format!("Poss: {label}"));
        }
    }
    badges
}

fn basketball_badges(s: &BasketballSituation) -> Vec<String> {
    let mut badges = Vec::new();
    if let Some(period) = s.period {
        badges.push(format!("Q{period}"));
    }
    if let Some(clock) = s.clock.as_deref().filter(|c| !c.is_empty()) {
        badges.push(clock.to_owned());
    }
    badges
}

/// Linescore table rows: header, away, home. The shorter side is padded with
/// blanks to the longer side's length here, at render time only — the stored
/// vectors are never touched. None when neither side has periods yet.
pub fn linescore_rows(game: &Game) -> Option<Vec<String>> {
    let away = &game.linescores_away;
    let home = &game.linescores_home;
    if away.is_empty() && home.is_empty() {
        return None;
    }
    let len = away.len().max(home.len());

    let cell = |s: &str| format!("{s:>3}");
    let row = |label: &str, scores: &[String], total: u32| -> String {
        let mut out = format!("{label:<5}");
        for i in 0..len {
            out.push_str(&cell(scores.get(i).map(String::as_str).unwrap_or("")));
        }
        out.push_str(&format!("  {total:>3}"));
        out
    };

    let mut header = format!("{:<5}", "");
    for i in 1..=len {
        header.push_str(&cell(&i.to_string()));
    }
    header.push_str(&format!("  {:>3}", "T"));

    Some(vec![
        header,
        row(game.away.short_label(), away, game.away.score),
        row(game.home.short_label(), home, game.home.score),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use scorebox_api::Team;

    fn game_with_status(status: GameStatus, detail: &str) -> Game {
        Game {
            status,
            status_detail: detail.to_owned(),
            ..Game::default()
        }
    }

    #[test]
    fn ordinal_formatting() {
        // Scenario D.
        assert_eq!(ordinal(3), "3rd");
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(1), "1st");
        assert_eq!(ordinal(2), "2nd");
        assert_eq!(ordinal(4), "4th");
        assert_eq!(ordinal(12), "12th");
        assert_eq!(ordinal(13), "13th");
        assert_eq!(ordinal(21), "21st");
    }

    #[test]
    fn down_and_distance_badge() {
        let s = FootballSituation {
            down: Some(3),
            distance: Some(7),
            ..FootballSituation::default()
        };
        let badges = football_badges(&Game::default(), &s);
        assert!(badges.contains(&"3rd & 7".to_owned()));
    }

    #[test]
    fn status_labels() {
        assert_eq!(
            status_label(&game_with_status(GameStatus::InProgress, "Top 5th")),
            "LIVE • Top 5th"
        );
        assert_eq!(status_label(&game_with_status(GameStatus::Final, "Final")), "Final");
        assert_eq!(
            status_label(&game_with_status(GameStatus::Other, "Postponed")),
            "Postponed"
        );
        assert_eq!(status_label(&game_with_status(GameStatus::Other, "")), "—");
        // Scheduled without a start time still labels cleanly.
        assert_eq!(
            status_label(&game_with_status(GameStatus::Scheduled, "")),
            "Scheduled"
        );
    }

    #[test]
    fn ticker_counts_and_position() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(
            ticker_line(League::Mlb, date, 3, 0),
            "MLB • 2024-01-01 • 3 games • Showing 1/3"
        );
        assert_eq!(
            ticker_line(League::Nba, date, 1, 0),
            "NBA • 2024-01-01 • 1 game • Showing 1/1"
        );
    }

    #[test]
    fn empty_message_names_league_and_date() {
        // Scenario A's display text.
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(empty_message(League::Mlb, date), "No MLB games on 2024-01-01.");
    }

    fn game_with_teams() -> Game {
        Game {
            away: Team {
                id: "2".into(),
                name: "Boston Red Sox".into(),
                abbr: "BOS".into(),
                score: 5,
                ..Team::default()
            },
            home: Team {
                id: "10".into(),
                name: "New York Yankees".into(),
                abbr: "NYY".into(),
                score: 3,
                ..Team::default()
            },
            ..Game::default()
        }
    }

    #[test]
    fn possession_resolves_to_matching_side_or_empty() {
        let game = game_with_teams();
        assert_eq!(possession_label(&game, "10"), "NYY");
        assert_eq!(possession_label(&game, "2"), "BOS");
        assert_eq!(possession_label(&game, "99"), "");
    }

    #[test]
    fn linescore_rows_pad_shorter_side_without_mutating_game() {
        let mut game = game_with_teams();
        game.linescores_away = vec!["0".into(), "3".into(), "1".into()];
        game.linescores_home = vec!["2".into()];

        let rows = linescore_rows(&game).unwrap();
        assert_eq!(rows.len(), 3);
        // All rows padded to the same width.
        assert_eq!(rows[1].len(), rows[2].len());
        assert!(rows[1].contains("BOS"));
        assert!(rows[2].contains("NYY"));

        // Stored vectors keep their original, differing lengths.
        assert_eq!(game.linescores_away.len(), 3);
        assert_eq!(game.linescores_home.len(), 1);
    }

    #[test]
    fn linescore_rows_absent_when_no_periods() {
        assert!(linescore_rows(&game_with_teams()).is_none());
    }

    #[test]
    fn baseball_badges_cover_count_outs_bases() {
        let s = BaseballSituation {
            balls: 3,
            strikes: 2,
            outs: 1,
            on_first: true,
            on_third: true,
            ..BaseballSituation::default()
        };
        let badges = baseball_badges(&s);
        assert_eq!(badges[0], "Count 3–2");
        assert_eq!(badges[1], "1 out");
        assert_eq!(badges[2], "Bases ◆◇◆");
    }

    #[test]
    fn basketball_badges_skip_missing_fields() {
        let badges = basketball_badges(&BasketballSituation::default());
        assert!(badges.is_empty());
        let badges = basketball_badges(&BasketballSituation {
            period: Some(4),
            clock: Some("2:30".into()),
        });
        assert_eq!(badges, vec!["Q4", "2:30"]);
    }
}
