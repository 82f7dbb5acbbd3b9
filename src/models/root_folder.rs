use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RootFolderRecord {
    pub path: String,
    pub accessible: bool,
    pub free_space: u64,
    pub id: i32,
}

impl RootFolderRecord {
    /// Watcher3 has a single mover target, so there is only ever root folder 1.
    #[must_use]
    pub fn new(path: impl Into<String>, free_space: u64) -> Self {
        Self {
            path: path.into(),
            accessible: true,
            free_space,
            id: 1,
        }
    }
}
