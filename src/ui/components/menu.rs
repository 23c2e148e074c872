use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;

use crate::ui::theme::Theme;

pub const MENU_ITEMS: &[(&str, &str)] = &[
    ("Today", "Suggested challenges for today"),
    ("Browse", "All challenges by growth area"),
    ("Packs", "Challenge packs"),
    ("Badges", "What you've earned"),
    ("Stats", "Progress, journal, and areas"),
    ("Settings", "Theme, goal, focus areas"),
    ("Quit", "Save and exit"),
];

pub struct Menu<'a> {
    pub selected: usize,
    pub theme: &'a Theme,
}

impl<'a> Menu<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { selected: 0, theme }
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % MENU_ITEMS.len();
    }

    pub fn prev(&mut self) {
        self.selected = if self.selected == 0 {
            MENU_ITEMS.len() - 1
        } else {
            self.selected - 1
        };
    }
}

impl Widget for &Menu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        for (i, (name, hint)) in MENU_ITEMS.iter().enumerate() {
            let y = area.y + i as u16 * 2;
            if y >= area.y + area.height {
                break;
            }

            let (marker, style) = if i == self.selected {
                (
                    "▸ ",
                    Style::default()
                        .fg(colors.accent())
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                ("  ", Style::default().fg(colors.fg()))
            };
            buf.set_string(area.x, y, format!("{marker}{name}"), style);

            if i == self.selected {
                let hint_x = area.x + 14;
                if hint_x < area.x + area.width {
                    buf.set_string(hint_x, y, *hint, Style::default().fg(colors.text_dim()));
                }
            }
        }
    }
}
