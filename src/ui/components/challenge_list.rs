use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Widget};

use crate::catalog::Challenge;
use crate::ui::theme::Theme;

/// Scrolling challenge list. Rows show area and difficulty; the selected
/// row's prompt is rendered underneath the list.
pub struct ChallengeList<'a> {
    pub title: String,
    pub challenges: Vec<&'a Challenge>,
    pub selected: usize,
    pub completed_today: &'a std::collections::HashSet<String>,
    pub theme: &'a Theme,
}

impl Widget for ChallengeList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", self.title))
            .border_style(Style::default().fg(colors.border_focused()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height < 3 {
            return;
        }

        // Bottom two rows are reserved for the selected prompt.
        let list_height = (inner.height - 2) as usize;
        let scroll = self.selected.saturating_sub(list_height.saturating_sub(1));

        for (row, (i, challenge)) in self
            .challenges
            .iter()
            .enumerate()
            .skip(scroll)
            .take(list_height)
            .enumerate()
        {
            let y = inner.y + row as u16;
            let done = self.completed_today.contains(&challenge.id);
            let marker = if done { "✓" } else { " " };
            let line = format!(
                "{marker} {:<34} {:<12} {}",
                truncate(&challenge.title, 34),
                challenge.area.label(),
                challenge.difficulty.label()
            );

            let style = if i == self.selected {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else if done {
                Style::default().fg(colors.success())
            } else {
                Style::default().fg(colors.fg())
            };
            buf.set_string(inner.x + 1, y, truncate(&line, (inner.width as usize).saturating_sub(2)), style);
        }

        if let Some(challenge) = self.challenges.get(self.selected) {
            let y = inner.y + inner.height - 1;
            buf.set_string(
                inner.x + 1,
                y,
                truncate(&challenge.prompt, (inner.width as usize).saturating_sub(2)),
                Style::default().fg(colors.text_dim()),
            );
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
