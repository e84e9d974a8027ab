//! # Form builder engine
//!
//! Shared model and editing engine for the form builder. A user authors a
//! *template* (a named, ordered tree of sections holding typed fields), saves
//! it, and later fills it out to produce a *submission*.
//!
//! - [`model`]: templates, sections, field descriptors and submissions.
//! - [`editor`]: the edit session that mediates every change to a template,
//!   tracks whether it is dirty, and runs the save/discard/cancel exit flow.
//! - [`validation`]: per-field validation of a filled-out form.
//! - [`repository`]: the bounded template collection and the append-only
//!   submission log, written through to a [`storage::BlobStore`].
//! - [`state`]: the application state object tying the repositories together.

pub mod editor;
pub mod error;
pub mod model;
pub mod repository;
pub mod requests;
pub mod state;
pub mod storage;
pub mod validation;

pub use error::{FieldSpecError, FormError, OptionsError, PersistenceError, StorageError};
pub use state::{FormsState, SubmitOutcome};
