pub mod movie;
pub mod root_folder;
pub mod watcher3;

pub use movie::MovieRecord;
pub use root_folder::RootFolderRecord;
