//! Server-rendered HTML pages.

pub mod welcome;
