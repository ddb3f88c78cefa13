pub mod document;
pub mod url;
