#![forbid(unsafe_code)]

//! Domain model and application state for the aula dashboard.
//!
//! Everything here is host-agnostic: no terminal types, no rendering.
//!
//! - [`user`]: the roster record sum type (students and staff).
//! - [`tag`]: committed search filter tokens.
//! - [`attendance`]: the attendance summary matrix and the
//!   group/average/sort distribution used by the attendance panel.
//! - [`breadcrumbs`]: pure path-to-trail resolution.
//! - [`session`]: explicit application session state (user, theme,
//!   notices) mutated only through methods; no ambient singletons.
//! - [`cache`]: the injected TTL key-value cache with memory and file
//!   backends.

pub mod attendance;
pub mod breadcrumbs;
pub mod cache;
pub mod session;
pub mod tag;
pub mod user;

pub use cache::{CacheError, CacheResult, CacheStore, FileCache, MemoryCache};
pub use session::{Notice, Role, Session, SessionUser, Theme};
pub use tag::{SearchTag, TagKind};
pub use user::{Staff, Student, UserKind, UserRecord};
