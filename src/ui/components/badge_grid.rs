use std::collections::HashMap;

use chrono::{DateTime, Utc};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Widget};

use crate::engine::badges::ALL_BADGES;
use crate::ui::theme::Theme;

pub struct BadgeGrid<'a> {
    pub earned: &'a HashMap<String, DateTime<Utc>>,
    pub theme: &'a Theme,
}

impl Widget for BadgeGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let earned_count = ALL_BADGES
            .iter()
            .filter(|b| self.earned.contains_key(b.id.to_key()))
            .count();
        let block = Block::bordered()
            .title(format!(" Badges ({earned_count}/{}) ", ALL_BADGES.len()))
            .border_style(Style::default().fg(colors.border_focused()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        for (i, badge) in ALL_BADGES.iter().enumerate() {
            let y = inner.y + i as u16;
            if y >= inner.y + inner.height {
                break;
            }

            let earned_at = self.earned.get(badge.id.to_key());
            let (marker, name_style) = match earned_at {
                Some(_) => (
                    "★",
                    Style::default()
                        .fg(colors.warning())
                        .add_modifier(Modifier::BOLD),
                ),
                None => ("☆", Style::default().fg(colors.text_dim())),
            };

            let suffix = match earned_at {
                Some(at) => format!("earned {}", at.format("%Y-%m-%d")),
                None => badge.blurb.to_string(),
            };
            buf.set_string(
                inner.x + 1,
                y,
                format!("{marker} {:<16} {suffix}", badge.name),
                name_style,
            );
        }
    }
}
