pub mod watcher3;

pub use watcher3::{SourceApi, SourceError, SourceResponse, WatcherClient};
