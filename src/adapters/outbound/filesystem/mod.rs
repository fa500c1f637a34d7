/// Filesystem adapters for report input
mod file_reader;

pub use file_reader::FileSystemReader;
