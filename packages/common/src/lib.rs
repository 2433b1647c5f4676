pub mod flash;
pub mod render;
pub mod session;
pub mod upload;

pub use flash::{Flash, FlashLevel};
