use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Widget};

use crate::engine::leveling::{LevelState, level_title};
use crate::ui::theme::Theme;

/// Level card on the menu screen: level, title, streak, today's count.
pub struct Dashboard<'a> {
    pub state: LevelState,
    pub streak_days: u32,
    pub best_streak: u32,
    pub completed_today: u32,
    pub daily_goal: u32,
    pub theme: &'a Theme,
}

impl Widget for Dashboard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Progress ")
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let line = format!(
            "Level {}  ·  {}",
            self.state.level,
            level_title(self.state.level)
        );
        buf.set_string(
            inner.x + 1,
            inner.y,
            line,
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        );

        if inner.height > 1 {
            let xp_line = format!(
                "{} / {} XP into this level",
                self.state.xp_into_level, self.state.xp_to_next_level
            );
            buf.set_string(inner.x + 1, inner.y + 1, xp_line, Style::default().fg(colors.fg()));
        }

        if inner.height > 2 {
            let streak_line = if self.streak_days > 0 {
                format!(
                    "🔥 {} day streak (best {})",
                    self.streak_days, self.best_streak
                )
            } else {
                "No active streak · complete a challenge to start one".to_string()
            };
            let style = if self.streak_days > 0 {
                Style::default().fg(colors.warning())
            } else {
                Style::default().fg(colors.text_dim())
            };
            buf.set_string(inner.x + 1, inner.y + 2, streak_line, style);
        }

        if inner.height > 3 {
            let goal_met = self.completed_today >= self.daily_goal;
            let today_line = format!(
                "Today: {} of {} challenges{}",
                self.completed_today,
                self.daily_goal,
                if goal_met { "  ✓ goal met" } else { "" }
            );
            let style = if goal_met {
                Style::default().fg(colors.success())
            } else {
                Style::default().fg(colors.fg())
            };
            buf.set_string(inner.x + 1, inner.y + 3, today_line, style);
        }
    }
}
