mod chrome;
mod layout;
mod overlay;
mod verse;

pub use chrome::{ChromeSnapshot, draw_chrome};
pub use layout::{UiLayout, split_layout};
pub use overlay::{draw_loading_overlay, draw_palette_overlay};
pub use verse::draw_verse;
