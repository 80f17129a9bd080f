use crate::consts;
use ratatui::layout::{Flex, Layout, Rect, Size};
use std::path::PathBuf;

/// Name of the directories in which configuration & data files are stored
const APP_DIR: &str = "gridsnake";

pub(crate) fn get_display_area(buffer_area: Rect) -> Rect {
    center_rect(buffer_area, consts::DISPLAY_SIZE)
}

/// Return a `Rect` of the given size centered within `area`.  If `size` is
/// larger than `area`, the layout solver shrinks it to fit.
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let [area] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(area);
    area
}

/// Return the default configuration file path
pub(crate) fn config_file_path() -> Option<PathBuf> {
    dirs::config_local_dir().map(|p| p.join(APP_DIR).join("config.toml"))
}

/// Return the default high scores file path
pub(crate) fn high_scores_file_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join(APP_DIR).join("highscores.json"))
}
