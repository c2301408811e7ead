#![forbid(unsafe_code)]

//! The incremental roster search core.
//!
//! Filtering a roster of students and staff by free text or grade-code
//! tags, built from small pure pieces:
//!
//! - [`mod@normalize`]: lowercase + diacritic strip, so "alicia" finds
//!   "Alícia".
//! - [`debounce`]: the quiescence timer between keystrokes and
//!   recomputation.
//! - [`grade`]: the reserved grade-code token format ("5A") that
//!   bypasses name search.
//! - [`mod@suggest`]: the min-chars → grade-gate → containment filter
//!   pipeline, roster order preserved.
//! - [`input`]: grapheme-aware single-line editing.
//! - [`mod@highlight`]: raw-query emphasis inside suggestion labels
//!   (note the deliberate asymmetry with the normalized filter).
//! - [`search_box`]: the composed widget with the keyboard navigation
//!   state machine; emits [`SearchAction`]s for the owner to apply.
//! - [`tags`]: the removable-chip row for committed tags.
//!
//! Nothing here performs I/O or touches shared state; the owning
//! controller feeds events in and applies the actions that come out.

pub mod debounce;
pub mod grade;
pub mod highlight;
pub mod input;
pub mod normalize;
pub mod search_box;
pub mod suggest;
pub mod tags;

pub use debounce::{DEBOUNCE_DELAY, Debouncer};
pub use grade::{DEFAULT_GRADE_PATTERN, GradePattern};
pub use highlight::highlight;
pub use input::EditBuffer;
pub use normalize::normalize;
pub use search_box::{EventOutcome, SearchAction, SearchBox, SearchBoxStyle, SearchConfig};
pub use suggest::{DisplayNameFn, SuggestConfig, suggest};
pub use tags::{TagRow, TagRowStyle};
