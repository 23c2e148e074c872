use std::collections::HashMap;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Widget};

use crate::catalog::GrowthArea;
use crate::engine::leveling::{LevelState, level_title};
use crate::journal::entry::CompletionEntry;
use crate::ui::theme::Theme;

/// Overview tab: headline numbers.
pub struct OverviewPanel<'a> {
    pub state: LevelState,
    pub total_xp: i64,
    pub total_completions: u32,
    pub streak_days: u32,
    pub best_streak: u32,
    pub theme: &'a Theme,
}

impl Widget for OverviewPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Overview ")
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        let lines = [
            format!(
                "Level {} ({}) · {} XP total",
                self.state.level,
                level_title(self.state.level),
                self.total_xp
            ),
            format!(
                "{} / {} XP to level {}",
                self.state.xp_into_level,
                self.state.xp_to_next_level,
                self.state.level + 1
            ),
            format!("{} challenges completed", self.total_completions),
            format!(
                "Streak: {} days (best {})",
                self.streak_days, self.best_streak
            ),
        ];
        for (i, line) in lines.iter().enumerate() {
            let y = inner.y + i as u16;
            if y >= inner.y + inner.height {
                break;
            }
            let style = if i == 0 {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };
            buf.set_string(inner.x + 1, y, line, style);
        }
    }
}

/// Journal tab: recent completions, newest first, with row selection.
pub struct JournalPanel<'a> {
    pub entries: &'a [CompletionEntry],
    pub selected: usize,
    pub confirm_delete: bool,
    pub theme: &'a Theme,
}

pub const JOURNAL_VISIBLE_ROWS: usize = 20;

impl Widget for JournalPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let title = if self.confirm_delete {
            " Journal · delete this entry and rebuild? (y/n) "
        } else {
            " Journal · x deletes an entry "
        };
        let block = Block::bordered()
            .title(title)
            .border_style(Style::default().fg(if self.confirm_delete {
                colors.error()
            } else {
                colors.border()
            }));
        let inner = block.inner(area);
        block.render(area, buf);

        let visible = (inner.height as usize).min(JOURNAL_VISIBLE_ROWS);
        for (row, entry) in self.entries.iter().rev().take(visible).enumerate() {
            let y = inner.y + row as u16;
            let line = format!(
                "{}  {:<34} {:<12} +{} XP",
                entry.timestamp.format("%Y-%m-%d %H:%M"),
                truncate(&entry.title, 34),
                entry.area.label(),
                entry.xp_awarded
            );
            let style = if row == self.selected {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };
            buf.set_string(inner.x + 1, y, truncate(&line, (inner.width as usize).saturating_sub(2)), style);
        }
    }
}

/// Areas tab: completion counts per growth area as mini bars.
pub struct AreasPanel<'a> {
    pub counts: &'a HashMap<GrowthArea, u32>,
    pub theme: &'a Theme,
}

impl Widget for AreasPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Growth Areas ")
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        let max = self.counts.values().copied().max().unwrap_or(0).max(1);
        for (i, &growth_area) in GrowthArea::all().iter().enumerate() {
            let y = inner.y + i as u16;
            if y >= inner.y + inner.height {
                break;
            }
            let count = self.counts.get(&growth_area).copied().unwrap_or(0);
            let bar_width = ((count as f64 / max as f64) * 24.0).round() as usize;
            let line = format!(
                "{:<12} {:>4}  {}",
                growth_area.label(),
                count,
                "▦".repeat(bar_width)
            );
            let style = if count > 0 {
                Style::default().fg(colors.accent())
            } else {
                Style::default().fg(colors.text_dim())
            };
            buf.set_string(inner.x + 1, y, line, style);
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
