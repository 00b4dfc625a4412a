//! Input processing module
//! Reads resumes and job descriptions from TXT, Markdown, PDF files or stdin

pub mod file_detector;
pub mod text_extractor;
pub mod manager;

pub use manager::InputManager;
