//! Research domain module
//!
//! Entities the tool handlers exchange with the knowledge-management
//! backend and the external web / academic services.

pub mod entities;

pub use entities::{
    CitationDirection, Collection, ItemType, LibraryItem, Membership, Note, NoteDraft,
    NoteEditMode, OcrStatus, PageRange, Paper, WebHit, WebPage,
};
