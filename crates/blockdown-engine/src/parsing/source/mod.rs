pub mod lines;
pub mod slice;
pub mod span;
pub mod view;

pub use lines::{LineIndex, LineRef, line_bounds, lines_with_spans};
pub use slice::preview;
pub use span::{Position, SourceMap, TextSpan};
pub use view::SourceView;
