//! # Snapshot Testing Support
//!
//! Utilities for testing the parser via snapshot assertions and invariant checks.
//!
//! ## Modules
//!
//! - **`outline`**: Renders a document as an indented text outline (kind, source
//!   map, text preview) for `insta` snapshots and the CLI
//! - **`invariants`**: Runtime checks for parser correctness (spans in bounds,
//!   children nested in parents, siblings ordered, text leaves extract)
//!
//! ## Testing Strategy
//!
//! Parsing behavior is pinned by fixture snapshots rather than a formal
//! grammar. Outlines show block kinds, line/column ranges and the key
//! sub-spans (code info strings, container info strings).

pub mod invariants;
pub mod outline;

pub use invariants::check as invariants;
pub use outline::outline;
