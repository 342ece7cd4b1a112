//! # Row Kinds
//!
//! Types that own the transcription's inline syntax.
//!
//! - **`PageMarker`**: `<p12>` page of the base edition, optionally followed by text
//! - **`FolioMarker`**: `[f.12b]` manuscript folio, anywhere in a row
//! - **`LegacyLineNumber`**: a leading all-digit token left over from numbered sources
//!
//! The classifier calls these; it never hardcodes `<p` or `[f.`.

pub mod folio_marker;
pub mod line_number;
pub mod page_marker;

pub use folio_marker::{FolioHit, FolioMarker};
pub use line_number::LegacyLineNumber;
pub use page_marker::PageMarker;
