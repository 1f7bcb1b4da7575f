use std::path::PathBuf;
use tessera_core::LayoutError;
use thiserror::Error;

/// Failures that stop a document from producing a tree at all.
///
/// Recoverable problems (bad numbers, unknown tags) never surface here; they
/// end up in [`Document::diagnostics`](crate::Document::diagnostics).
#[derive(Debug, Error)]
pub enum MarkupError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no <layout> element found")]
    MissingRoot,

    #[error("<{tag}> opened at byte {offset} is never closed")]
    Unclosed { tag: String, offset: usize },

    #[error("expected </{expected}> but found </{found}> at byte {offset}")]
    Mismatched {
        expected: String,
        found: String,
        offset: usize,
    },

    #[error(transparent)]
    Layout(#[from] LayoutError),
}

impl MarkupError {
    pub(crate) fn unclosed(tag: &str, offset: usize) -> Self {
        MarkupError::Unclosed {
            tag: tag.to_owned(),
            offset,
        }
    }

    pub(crate) fn mismatched(expected: &str, found: &str, offset: usize) -> Self {
        MarkupError::Mismatched {
            expected: expected.to_owned(),
            found: found.to_owned(),
            offset,
        }
    }
}
