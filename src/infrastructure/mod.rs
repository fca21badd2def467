pub mod docx;
pub mod editor;
pub mod terminal;

pub use docx::DocumentBuilder;
pub use editor::TextEditor;
pub use terminal::Prompter;
