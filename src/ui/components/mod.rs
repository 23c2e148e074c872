pub mod badge_grid;
pub mod challenge_list;
pub mod dashboard;
pub mod menu;
pub mod pack_list;
pub mod progress_bar;
pub mod stats_panel;
