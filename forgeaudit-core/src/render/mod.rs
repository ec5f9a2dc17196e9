//! Report rendering
//!
//! Both renderers consume the same data model and the same table layout,
//! so ordering, numbering, and textual fallbacks cannot drift between
//! the on-screen preview and the exported document.

pub mod docx;
pub mod layout;
pub mod preview;
pub mod template;

pub use docx::export_docx;
pub use layout::{layout_findings, TableRowSpec};
pub use preview::render_preview;
