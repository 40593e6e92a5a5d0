pub mod block_quote;
pub mod code_fence;
pub mod container;
pub mod heading;
pub mod html_block;
pub mod list_item;
pub mod table;
pub mod thematic_break;

pub use block_quote::BlockQuote;
pub use code_fence::{CodeFence, FenceKind, FenceOpen};
pub use container::{ContainerFence, CustomContainer};
pub use heading::AtxHeading;
pub use html_block::HtmlStart;
pub use list_item::{ListItem, ListMarker};
pub use table::{Alignment, Table};
pub use thematic_break::ThematicBreak;
