pub mod annotate;
pub mod content;
pub mod directives;
pub mod io;
pub mod parsing;
pub mod tei;


// Re-export key types for easier usage
pub use annotate::{Annotator, Report, SkipReason, SkippedDirective};
pub use content::{ContentNode, ContentTree, Element, Span};
pub use directives::{DirectiveKind, DirectiveList, MalformedDirective};
pub use io::*;
pub use parsing::{Document, LineId, NumeralStyle, ParseOptions, TextMode, parse_document};
pub use tei::{TeiError, TeiOptions, to_tei_string};
