//! Backend commands queued from UI to backend worker.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    LoadPostsAndAuthors,
    /// Raw route id; the delete is logged, never sent to the remote source.
    ConfirmDelete {
        id: String,
    },
    Shutdown,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::LoadPostsAndAuthors => "load_posts_and_authors",
            BackendCommand::ConfirmDelete { .. } => "confirm_delete",
            BackendCommand::Shutdown => "shutdown",
        }
    }
}
