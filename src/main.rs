mod app;
mod catalog;
mod config;
mod engine;
mod event;
mod journal;
mod store;
mod ui;

use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use app::{App, AppScreen, ChallengeTab};
use config::Config;
use engine::badges;
use engine::leveling::level_title;
use event::{AppEvent, EventHandler};
use store::json_store::JsonStore;
use store::schema::ExportData;
use ui::components::badge_grid::BadgeGrid;
use ui::components::challenge_list::ChallengeList;
use ui::components::dashboard::Dashboard;
use ui::components::pack_list::PackList;
use ui::components::progress_bar::ProgressBar;
use ui::components::stats_panel::{AreasPanel, JournalPanel, OverviewPanel};

#[derive(Parser)]
#[command(
    name = "ascend",
    version,
    about = "Terminal personal-growth companion with daily challenges, XP, and streaks"
)]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "Data directory override")]
    data_dir: Option<PathBuf>,

    #[arg(
        long,
        value_name = "FILE",
        help = "Export profile, journal, and config to FILE and exit"
    )]
    export: Option<PathBuf>,

    #[arg(
        long,
        value_name = "FILE",
        help = "Import a previously exported FILE and exit"
    )]
    import: Option<PathBuf>,
}

fn open_store(data_dir: &Option<PathBuf>) -> Result<JsonStore> {
    match data_dir {
        Some(dir) => JsonStore::with_base_dir(dir.clone()),
        None => JsonStore::new(),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Export/import are headless: no terminal takeover, just do it and exit.
    if let Some(path) = cli.export {
        let store = open_store(&cli.data_dir)?;
        let config = Config::load().unwrap_or_default();
        let export = store.export_all(&config);
        fs::write(&path, serde_json::to_string_pretty(&export)?)?;
        println!("Exported to {}", path.display());
        return Ok(());
    }
    if let Some(path) = cli.import {
        let store = open_store(&cli.data_dir)?;
        let content = fs::read_to_string(&path)?;
        let data: ExportData = serde_json::from_str(&content)?;
        store.import_all(&data)?;
        data.config.save()?;
        println!("Imported from {}", path.display());
        return Ok(());
    }

    let mut app = App::new(cli.data_dir);

    if let Some(theme_name) = cli.theme {
        if let Some(theme) = ui::theme::Theme::load(&theme_name) {
            let theme: &'static ui::theme::Theme = Box::leak(Box::new(theme));
            app.theme = theme;
            app.menu.theme = theme;
        }
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(250));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick | AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

// --- Key handling ---

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Menu => handle_menu_key(app, key),
        AppScreen::Challenges => handle_challenges_key(app, key),
        AppScreen::CompletionSummary => handle_summary_key(app, key),
        AppScreen::Packs => handle_packs_key(app, key),
        AppScreen::Badges => handle_badges_key(app, key),
        AppScreen::Stats => handle_stats_key(app, key),
        AppScreen::Settings => handle_settings_key(app, key),
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('t') => app.open_challenges(ChallengeTab::Today),
        KeyCode::Char('b') => app.open_challenges(ChallengeTab::Browse),
        KeyCode::Char('p') => app.go_to_packs(),
        KeyCode::Char('a') => app.go_to_badges(),
        KeyCode::Char('s') => app.go_to_stats(),
        KeyCode::Char('c') => app.go_to_settings(),
        KeyCode::Up | KeyCode::Char('k') => app.menu.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.menu.next(),
        KeyCode::Enter => match app.menu.selected {
            0 => app.open_challenges(ChallengeTab::Today),
            1 => app.open_challenges(ChallengeTab::Browse),
            2 => app.go_to_packs(),
            3 => app.go_to_badges(),
            4 => app.go_to_stats(),
            5 => app.go_to_settings(),
            6 => app.should_quit = true,
            _ => {}
        },
        _ => {}
    }
}

fn handle_challenges_key(app: &mut App, key: KeyEvent) {
    let count = app.visible_challenges().len();
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.go_to_menu(),
        KeyCode::Tab => {
            let tab = match app.challenge_tab {
                ChallengeTab::Today => ChallengeTab::Browse,
                ChallengeTab::Browse => ChallengeTab::Today,
            };
            app.open_challenges(tab);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if count > 0 {
                app.challenge_selected = (app.challenge_selected + 1).min(count - 1);
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.challenge_selected = app.challenge_selected.saturating_sub(1);
        }
        KeyCode::Enter => {
            app.complete_selected();
            // The today list drains after a completion; keep the cursor valid.
            let remaining = app.visible_challenges().len();
            if remaining > 0 {
                app.challenge_selected = app.challenge_selected.min(remaining - 1);
            } else {
                app.challenge_selected = 0;
            }
        }
        _ => {}
    }
}

fn handle_summary_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => {
            app.screen = AppScreen::Challenges;
        }
        KeyCode::Char('m') => app.go_to_menu(),
        _ => {}
    }
}

fn handle_packs_key(app: &mut App, key: KeyEvent) {
    let count = app.catalog.packs().len();
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.go_to_menu(),
        KeyCode::Down | KeyCode::Char('j') => {
            if count > 0 {
                app.pack_selected = (app.pack_selected + 1).min(count - 1);
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.pack_selected = app.pack_selected.saturating_sub(1);
        }
        KeyCode::Enter => app.join_selected_pack(),
        _ => {}
    }
}

fn handle_badges_key(app: &mut App, key: KeyEvent) {
    if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
        app.go_to_menu();
    }
}

fn handle_stats_key(app: &mut App, key: KeyEvent) {
    // Confirmation dialog takes priority.
    if app.journal_confirm_delete {
        match key.code {
            KeyCode::Char('y') => {
                app.delete_journal_entry();
                app.journal_confirm_delete = false;
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                app.journal_confirm_delete = false;
            }
            _ => {}
        }
        return;
    }

    // Journal tab has row navigation and delete.
    if app.stats_tab == 1 {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => app.go_to_menu(),
            KeyCode::Down | KeyCode::Char('j') => {
                if !app.journal.is_empty() {
                    let max_visible = app.journal.len().min(20) - 1;
                    app.journal_selected = (app.journal_selected + 1).min(max_visible);
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.journal_selected = app.journal_selected.saturating_sub(1);
            }
            KeyCode::Char('x') | KeyCode::Delete => {
                if !app.journal.is_empty() {
                    app.journal_confirm_delete = true;
                }
            }
            KeyCode::Char('1') => app.stats_tab = 0,
            KeyCode::Char('3') => app.stats_tab = 2,
            KeyCode::Tab => app.stats_tab = (app.stats_tab + 1) % 3,
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.go_to_menu(),
        KeyCode::Char('1') => app.stats_tab = 0,
        KeyCode::Char('2') => app.stats_tab = 1,
        KeyCode::Char('3') => app.stats_tab = 2,
        KeyCode::Tab => app.stats_tab = (app.stats_tab + 1) % 3,
        _ => {}
    }
}

fn handle_settings_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            app.config.normalize();
            let _ = app.config.save();
            app.go_to_menu();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.settings_selected = app.settings_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.settings_selected = (app.settings_selected + 1).min(App::settings_row_count() - 1);
        }
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => app.settings_cycle(true),
        KeyCode::Left | KeyCode::Char('h') => app.settings_cycle(false),
        _ => {}
    }
}

// --- Rendering ---

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Menu => render_menu(frame, app),
        AppScreen::Challenges => render_challenges(frame, app),
        AppScreen::CompletionSummary => render_summary(frame, app),
        AppScreen::Packs => render_packs(frame, app),
        AppScreen::Badges => render_badges(frame, app),
        AppScreen::Stats => render_stats(frame, app),
        AppScreen::Settings => render_settings(frame, app),
    }
}

fn header_and_footer(
    frame: &mut ratatui::Frame,
    app: &App,
    footer_hint: &str,
) -> ratatui::layout::Rect {
    let area = frame.area();
    let colors = &app.theme.colors;

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let state = app.level_state();
    let streak_text = if app.profile.streak_days > 0 {
        format!(" | {} day streak", app.profile.streak_days)
    } else {
        String::new()
    };
    let header_info = format!(
        " Level {} {} | {} XP{}",
        state.level,
        level_title(state.level),
        app.profile.total_xp,
        streak_text,
    );
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " ascend ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            header_info,
            Style::default().fg(colors.text_dim()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, layout[0]);

    let footer = Paragraph::new(footer_hint.to_string()).style(Style::default().fg(colors.text_dim()));
    frame.render_widget(footer, layout[2]);

    layout[1]
}

fn render_menu(frame: &mut ratatui::Frame, app: &App) {
    let footer = if app.recovered_backup_files {
        " recovered leftover backup files from an interrupted import · j/k move · Enter select · q quit"
    } else {
        " j/k move · Enter select · q quit"
    };
    let body = header_and_footer(frame, app, footer);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(0)])
        .split(body);

    let menu_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(columns[0])[1];
    frame.render_widget(&app.menu, menu_area);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Length(3), Constraint::Min(0)])
        .split(columns[1]);

    let state = app.level_state();
    frame.render_widget(
        Dashboard {
            state,
            streak_days: app.profile.streak_days,
            best_streak: app.profile.best_streak,
            completed_today: app.completed_today_count(),
            daily_goal: app.config.daily_goal,
            theme: app.theme,
        },
        right[0],
    );
    frame.render_widget(
        ProgressBar::new(
            &format!("Level {} -> {}", state.level, state.level + 1),
            &format!("{} / {} XP", state.xp_into_level, state.xp_to_next_level),
            state.fraction,
            app.theme,
        ),
        right[1],
    );
}

fn render_challenges(frame: &mut ratatui::Frame, app: &App) {
    let body = header_and_footer(
        frame,
        app,
        " Enter complete · Tab switch list · j/k move · Esc back",
    );

    let title = match app.challenge_tab {
        ChallengeTab::Today => format!(
            "Today · {} of {} done",
            app.completed_today_count(),
            app.config.daily_goal
        ),
        ChallengeTab::Browse => "All Challenges".to_string(),
    };
    let completed = app.completed_today();
    frame.render_widget(
        ChallengeList {
            title,
            challenges: app.visible_challenges(),
            selected: app.challenge_selected,
            completed_today: &completed,
            theme: app.theme,
        },
        body,
    );
}

fn render_summary(frame: &mut ratatui::Frame, app: &App) {
    let body = header_and_footer(frame, app, " Enter continue · m menu");
    let colors = &app.theme.colors;

    let Some(award) = &app.last_award else {
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            "Challenge complete!",
            Style::default()
                .fg(colors.success())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            award.entry.title.clone(),
            Style::default().fg(colors.fg()),
        )),
        Line::from(Span::styled(
            format!("+{} XP", award.entry.xp_awarded),
            Style::default().fg(colors.accent()),
        )),
    ];

    if !award.packs_completed.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(
                "Pack finished: {}  (+{} XP bonus)",
                award.packs_completed.join(", "),
                award.pack_bonus
            ),
            Style::default().fg(colors.warning()),
        )));
    }

    if award.level_after > award.level_before {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(
                "Level up! {} -> {}  ·  {}",
                award.level_before,
                award.level_after,
                level_title(award.level_after)
            ),
            Style::default()
                .fg(colors.warning())
                .add_modifier(Modifier::BOLD),
        )));
    }

    for badge_id in &award.new_badges {
        let def = badges::definition(*badge_id);
        lines.push(Line::from(Span::styled(
            format!("★ New badge: {} · {}", def.name, def.blurb),
            Style::default().fg(colors.warning()),
        )));
    }

    let block = Block::bordered()
        .title(" Well done ")
        .border_style(Style::default().fg(colors.border_focused()));
    let paragraph = Paragraph::new(lines).block(block);

    let centered = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(12),
            Constraint::Min(1),
        ])
        .split(body)[1];
    frame.render_widget(paragraph, centered);
}

fn render_packs(frame: &mut ratatui::Frame, app: &App) {
    let body = header_and_footer(frame, app, " Enter join · j/k move · Esc back");
    frame.render_widget(
        PackList {
            packs: app.catalog.packs(),
            progress: &app.profile.packs,
            selected: app.pack_selected,
            theme: app.theme,
        },
        body,
    );
}

fn render_badges(frame: &mut ratatui::Frame, app: &App) {
    let body = header_and_footer(frame, app, " Esc back");
    frame.render_widget(
        BadgeGrid {
            earned: &app.profile.badges,
            theme: app.theme,
        },
        body,
    );
}

fn render_stats(frame: &mut ratatui::Frame, app: &App) {
    let body = header_and_footer(frame, app, " 1 overview · 2 journal · 3 areas · Esc back");
    let colors = &app.theme.colors;

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(body);

    let tabs = ["Overview", "Journal", "Areas"];
    let tab_line: Vec<Span> = tabs
        .iter()
        .enumerate()
        .flat_map(|(i, name)| {
            let style = if i == app.stats_tab {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.text_dim())
            };
            vec![Span::styled(format!(" {name} "), style), Span::raw(" ")]
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(tab_line)), layout[0]);

    match app.stats_tab {
        0 => {
            frame.render_widget(
                OverviewPanel {
                    state: app.level_state(),
                    total_xp: app.profile.total_xp,
                    total_completions: app.profile.total_completions,
                    streak_days: app.profile.streak_days,
                    best_streak: app.profile.best_streak,
                    theme: app.theme,
                },
                layout[1],
            );
        }
        1 => {
            frame.render_widget(
                JournalPanel {
                    entries: &app.journal,
                    selected: app.journal_selected,
                    confirm_delete: app.journal_confirm_delete,
                    theme: app.theme,
                },
                layout[1],
            );
        }
        _ => {
            let counts = app.area_counts();
            frame.render_widget(
                AreasPanel {
                    counts: &counts,
                    theme: app.theme,
                },
                layout[1],
            );
        }
    }
}

fn render_settings(frame: &mut ratatui::Frame, app: &App) {
    let body = header_and_footer(frame, app, " h/l change · j/k move · Esc save and back");
    let colors = &app.theme.colors;

    let mut rows: Vec<(String, String)> = vec![
        ("Theme".to_string(), app.config.theme.clone()),
        ("Daily goal".to_string(), app.config.daily_goal.to_string()),
        (
            "Suggestions per day".to_string(),
            app.config.suggestion_count.to_string(),
        ),
    ];
    for area in catalog::GrowthArea::all() {
        let on = app.config.focus_areas.iter().any(|k| k == area.to_key());
        rows.push((
            format!("Focus: {}", area.label()),
            if on { "on".to_string() } else { "off".to_string() },
        ));
    }

    let lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .map(|(i, (name, value))| {
            let style = if i == app.settings_selected {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };
            let marker = if i == app.settings_selected { "▸" } else { " " };
            Line::from(Span::styled(
                format!("{marker} {name:<24} {value}"),
                style,
            ))
        })
        .collect();

    let block = Block::bordered()
        .title(" Settings ")
        .border_style(Style::default().fg(colors.border_focused()));
    frame.render_widget(Paragraph::new(lines).block(block), body);
}
