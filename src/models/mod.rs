pub mod credential;
pub mod export;
pub mod session;
pub mod stage;

pub use credential::ApiKey;
pub use export::{ExportedManuscript, DOCX_MIME_TYPE, MANUSCRIPT_FILE_NAME};
pub use session::SessionState;
pub use stage::Stage;
