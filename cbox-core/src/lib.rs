//! # cbox-core
//!
//! Draws plain text as a comment box and finds, strips and redraws such boxes
//! inside larger documents.
//!
//! Module layout, leaves first:
//!
//!     width        display width and token padding
//!     lines        input text -> content lines
//!     render       content lines -> box
//!     matching     row patterns of a style
//!     discovery    line range -> annotated box rows
//!     reconstruct  annotated rows -> plain text or a redrawn box
//!     document     the above over a whole document
//!
//! Every operation takes a fully resolved [`BoxStyle`]; building one from
//! configuration files is the job of `cbox-config`.
//!
//! For assertions over discovery results see the [testing module](testing).

pub mod annotated;
pub mod discovery;
pub mod document;
pub mod error;
pub mod lines;
pub mod matching;
pub mod reconstruct;
pub mod render;
pub mod style;
pub mod testing;
pub mod width;

pub use annotated::{AnnotatedLine, AnnotatedSelection, CommentLine, RowKind};
pub use discovery::find_box;
pub use document::TextDocument;
pub use error::BoxError;
pub use reconstruct::{remove_styled_comment_box, update_styled_comment_box};
pub use render::convert_to_comment_box;
pub use style::{BoxStyle, TextAlignment, WordWrap};

pub use reconstruct::remove_styled_comment_box as strip;
pub use reconstruct::update_styled_comment_box as refresh;
pub use render::convert_to_comment_box as render;
