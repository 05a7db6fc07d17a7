pub mod copy;
pub mod debounce;
pub mod lazy_images;
pub mod nav;
pub mod panels;
pub mod scroll_spy;
pub mod search;
pub mod theme;

pub use copy::{CopyButton, CopyState};
pub use debounce::Debouncer;
pub use lazy_images::LazyImages;
pub use nav::{MobileMenu, NavState};
pub use panels::{Accordion, TabGroup};
pub use scroll_spy::{IntersectionEvent, ScrollSpy, ScrollSpyConfig};
pub use search::SearchWidget;
pub use theme::Theme;
