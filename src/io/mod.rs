pub mod fs;
pub mod history;
pub mod reader;
pub mod writer;

pub use fs::{check_source_dir, copy_dir, copy_dir_except, list_entries, prepare_destination};
pub use history::GitHistory;
pub use reader::FrontMatterReader;
pub use writer::{FrontMatterWriter, WriterConfig};
