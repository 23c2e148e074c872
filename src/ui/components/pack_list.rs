use std::collections::HashMap;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Widget};

use crate::catalog::pack::{Pack, PackProgress, PackStatus};
use crate::ui::theme::Theme;

pub struct PackList<'a> {
    pub packs: &'a [Pack],
    pub progress: &'a HashMap<String, PackProgress>,
    pub selected: usize,
    pub theme: &'a Theme,
}

impl Widget for PackList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Challenge Packs ")
            .border_style(Style::default().fg(colors.border_focused()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        for (i, pack) in self.packs.iter().enumerate() {
            let y = inner.y + i as u16 * 3;
            if y + 1 >= inner.y + inner.height {
                break;
            }

            let default_progress = PackProgress::default();
            let progress = self.progress.get(&pack.id).unwrap_or(&default_progress);
            let (status_text, status_style) = match progress.status {
                PackStatus::Locked => (
                    format!("locked · reach level {}", pack.min_level),
                    Style::default().fg(colors.text_dim()),
                ),
                PackStatus::Available => (
                    "available · press Enter to join".to_string(),
                    Style::default().fg(colors.accent()),
                ),
                PackStatus::InProgress => (
                    format!(
                        "{} of {} done",
                        progress.completed.len(),
                        pack.challenge_ids.len()
                    ),
                    Style::default().fg(colors.warning()),
                ),
                PackStatus::Complete => (
                    format!("complete · +{} XP earned", pack.bonus_xp),
                    Style::default().fg(colors.success()),
                ),
            };

            let name_style = if i == self.selected {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };
            let marker = if i == self.selected { "▸ " } else { "  " };
            buf.set_string(inner.x + 1, y, format!("{marker}{}", pack.name), name_style);
            buf.set_string(inner.x + 3, y + 1, &status_text, status_style);
            let desc_x = inner.x + 3 + status_text.chars().count() as u16 + 3;
            if desc_x < inner.x + inner.width {
                buf.set_string(
                    desc_x,
                    y + 1,
                    &pack.description,
                    Style::default().fg(colors.text_dim()),
                );
            }
        }
    }
}
