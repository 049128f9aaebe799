//! Output formats for token streams
//!
//! This module contains the serializers that hand classified tokens to
//! whatever renders them:
//! - `tag`: one line per token, for inspection and tests
//! - `json` / `yaml`: structured dumps of `{text, category, offset}`
//! - `html`: a `<pre>` block with one CSS-classed span per token

pub mod html;
pub mod registry;
pub mod structured;
pub mod tag;

pub use html::{escape_html, HtmlFormatter};
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use structured::{JsonFormatter, YamlFormatter};
pub use tag::{to_tag_str, TagFormatter};
