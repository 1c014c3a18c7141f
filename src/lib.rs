//! htmlpress — shrink HTML and re-wrap it under a per-line byte budget.
//!
//! Some delivery pipelines ("MA tools" and friends) reject any line longer
//! than a fixed byte count, commonly 800 bytes. This crate provides the
//! text-transformation engine for preparing HTML for such pipelines:
//!
//! - [`compress`]: a family of whitespace/comment-stripping modes at
//!   different aggressiveness levels, selected by [`Mode`].
//! - [`reformat`]: rebuilds consistent nested indentation from the flat tag
//!   stream.
//! - [`wrap`]: cuts a document into lines that each fit a byte budget,
//!   preferring tag boundaries outside quoted attribute values and falling
//!   back to forced code-point-boundary cuts only when it must.
//! - [`stats`] / [`find_violations`]: size deltas and a defensive re-check
//!   for lines still over budget.
//!
//! All entry points are pure, synchronous functions over `&str`; there is no
//! I/O, no shared state, and no DOM. Markup is treated as a token stream of
//! tags and text runs — enough for safe splitting and re-indentation, not
//! for semantic validation.

mod compress;
mod error;
mod reformat;
mod stats;
mod token;
mod wrap;

pub use compress::{compress, Mode};
pub use error::Error;
pub use reformat::reformat;
pub use stats::{byte_length, find_violations, stats, Stats, Violation};
pub use token::{tokenize, Token, TokenKind, VOID_ELEMENTS};
pub use wrap::{wrap, WrapStrategy};
