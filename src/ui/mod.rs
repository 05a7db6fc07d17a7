pub mod content;
pub mod search_box;
pub mod sidebar;
pub mod toc;

pub use content::ContentState;
pub use search_box::SearchBoxState;
