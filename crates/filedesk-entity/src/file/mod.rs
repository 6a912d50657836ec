//! File domain entities.

pub mod history;
pub mod model;
pub mod selected;

pub use history::HistoryEntry;
pub use model::{FileRecord, UploadReceipt};
pub use selected::SelectedFile;
