//! Pipeline stages for turning a provider response into a laid-out report.
//!
//! Each submodule implements exactly one transformation step, and every
//! step is a pure function: no I/O, no shared state, no failure path. The
//! only fallible work (fetching the response) lives in [`crate::generate`].
//!
//! ## Data Flow
//!
//! ```text
//! response ──▶ extract ──▶ normalize ──▶ recover ──▶ layout
//!  (JSON)      (text)      (cleanup)     (record)    (3 pages)
//! ```
//!
//! 1. [`extract`]: walk the response tree and concatenate model-authored text
//! 2. [`normalize`]: strip fences, invisible characters and typographic
//!    quotes; collapse whitespace
//! 3. [`recover`]: locate the JSON object, repair it if needed and coerce
//!    it into a bounded record, falling back to a safe default
//! 4. [`layout`]: wrap and place the record onto exactly three pages

pub mod extract;
pub mod layout;
pub mod normalize;
pub mod recover;
