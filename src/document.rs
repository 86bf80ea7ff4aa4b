//! The one-shot pipeline: text to a processed, indexed, constant-resolved tree.

use std::path::Path;

use tracing::debug;

use crate::{
    constants::resolve_constants, encoding::decode_script, error::ParserError, parser::parse,
    process::process, tree::Node,
};

/// Options for [`parse_document`].
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Run the constant resolver on the finished tree
    pub resolve_constants: bool,
    /// Legacy code page for input that is not UTF-8; `None` means
    /// [`crate::encoding::DEFAULT_LEGACY_ENCODING`]
    pub encoding: Option<String>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            resolve_constants: true,
            encoding: None,
        }
    }
}

/// The final component of `file_path`, used as the root node's key and in
/// error reports.
pub fn logical_name(file_path: &str) -> &str {
    Path::new(file_path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(file_path)
}

/// Parse, process and optionally resolve constants.
///
/// A failure never yields a partial tree. Processing errors keep their
/// position; they are reported through the same [`ParserError`] as syntax
/// errors.
///
/// # Examples
///
/// ```
/// use paradox_script::{parse_document, ParseOptions};
///
/// let text = "@pi = 3.14\nshape = { radius_factor = @pi }";
/// let root = parse_document("common/shapes.txt", text, &ParseOptions::default()).unwrap();
///
/// assert_eq!(root.key(), "shapes.txt");
/// let radius = root.child("shape").and_then(|n| n.leaf("radius_factor")).unwrap();
/// assert_eq!(radius.value_text(), "3.14");
/// ```
pub fn parse_document(
    file_path: &str,
    text: &str,
    options: &ParseOptions,
) -> Result<Node, ParserError> {
    let file_name = logical_name(file_path);
    debug!(file_path, resolve_constants = options.resolve_constants, "parsing document");

    let statements = parse(file_name, text)?;
    let mut root = process(file_name, file_path, statements)
        .map_err(|e| e.into_parser_error(file_name))?;

    if options.resolve_constants {
        resolve_constants(&mut root);
    }
    Ok(root)
}

/// Like [`parse_document`], decoding `bytes` first. Decoding failures have no
/// source position and are reported at 0:0.
pub fn parse_document_bytes(
    file_path: &str,
    bytes: &[u8],
    options: &ParseOptions,
) -> Result<Node, ParserError> {
    let text = decode_script(bytes, options.encoding.as_deref())
        .map_err(|e| ParserError::fault(logical_name(file_path), e.to_string()))?;
    parse_document(file_path, &text, options)
}
