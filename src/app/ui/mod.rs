mod controls;
mod loading;
mod narrative;
mod panels;
mod search;
mod stats;
mod terminal;

pub(super) use self::loading::LoadingScreen;
pub(super) use self::panels::{apply_terminal_style, show_navigation_shell};
pub(super) use self::search::SearchState;
pub(super) use self::stats::show_stats_box;
pub(super) use self::terminal::TerminalLog;
