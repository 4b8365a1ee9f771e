use std::path::{Path, PathBuf};

pub const STORAGE_DIR: &str = ".gemini_chat";
pub const HISTORY_FILE_NAME: &str = "chat_history.json";

#[must_use]
pub fn storage_root(base: &Path) -> PathBuf {
    base.join(STORAGE_DIR)
}

#[must_use]
pub fn history_file(root: &Path) -> PathBuf {
    root.join(HISTORY_FILE_NAME)
}
