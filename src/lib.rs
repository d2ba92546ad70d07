//! howdoi: instant coding answers via the command line.
//!
//! A question typed at the terminal is searched on Google or Bing, scoped
//! to a Q&A site, and the top answer of the best matching question is
//! printed:
//! Query → Search page → Question links → Question page → Answer
//!
//! # Architecture
//!
//! - **Search and extraction**: the `howdoi-search` crate fetches and
//!   parses the pages
//! - **Settings**: environment variables select the engine, site, cache
//!   and transport security
//! - **Highlighting**: code answers are colored with `syntect` on request
//! - **Runner**: assembles one or more answers and turns network failures
//!   into printed messages

pub mod cli;
pub mod error;
pub mod highlight;
pub mod runner;
pub mod settings;

pub use cli::Cli;
pub use error::{HowdoiError, Result};
pub use highlight::TerminalHighlighter;
pub use runner::{Request, howdoi, run};
pub use settings::Settings;
