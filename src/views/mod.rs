//! Views
//!
//! Pure view models derived from a [`Cart`](crate::cart::Cart). Bindings render
//! these; nothing here touches a page or a terminal except
//! [`CartTableView::write_to`].

pub mod preview;
pub mod table;

pub use preview::{PreviewLine, PreviewView};
pub use table::{CartTableView, TableRow, ViewError};
