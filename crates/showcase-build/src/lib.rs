//! Build matrix primitives for the showcase site.
//!
//! A [`BuildTask`] describes one (sample, language) build. The external engine
//! build tool is reached through the [`BuildTool`] trait and writes into one
//! shared output directory, which callers borrow through an [`OutputSlot`].

pub mod highlight;
pub mod shell;
pub mod slot;
pub mod task;
pub mod tool;
pub mod traits;

pub use highlight::{HighlightError, Highlighter, SyntectHighlighter};
pub use shell::ShellFile;
pub use slot::{OutputLease, OutputSlot};
pub use task::{BuildTask, LanguageSwitch};
pub use tool::{ExternalTool, ToolConfig};
pub use traits::{BuildTool, ToolError, ToolInvocation};
