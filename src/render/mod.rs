//! This module contains the renderers that write an
//! [`AnalysisReport`](crate::report::AnalysisReport) out for people and for
//! other tools.
//!
//! Every renderer writes to any [`std::io::Write`], so reports can be sent to
//! the console, to files or into memory alike. None of them buffer, so
//! callers writing to files should wrap them in a [`std::io::BufWriter`].

pub mod csv;
pub mod json;
pub mod simple;
pub mod text;
