mod error;
mod export;
mod paths;
mod schema;
mod store;

pub use error::ChatLogError;
pub use paths::{history_file, storage_root, HISTORY_FILE_NAME, STORAGE_DIR};
pub use schema::{Message, Sender};
pub use store::ChatLog;
