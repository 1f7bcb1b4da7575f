//! Reader and writer for the tessera layout markup.
//!
//! ```text
//! <layout active="true">
//!     <name>menu</name>
//!     <sX>0.25</sX><sY>0.25</sY><eX>0.75</eX><eY>0.75</eY>
//!     <box>
//!         <vec2><x>1</x><y>2</y></vec2>
//!         <vec2><x>3</x><y>4</y></vec2>
//!         <vec3><x>255</x><y>0</y><z>0</z></vec3>
//!     </box>
//!     <layout> ... </layout>
//! </layout>
//! ```
//!
//! Whitespace is insignificant and the `vec` wrappers are optional; a shape
//! reads its `<x>`, `<y>` and `<z>` leaves in document order.

mod error;
mod lexer;
mod parser;
mod writer;

pub use error::MarkupError;
pub use lexer::{Attrs, Token, TokenKind, tokenize};
pub use parser::{Diagnostic, Document, parse, parse_file};
pub use writer::{write, write_file};
