//! Knowledge-base adapters.
//!
//! [`InMemoryKnowledgeBase`] keeps a library in process memory, seeded from
//! a JSON [`LibrarySnapshot`] file, and [`SimulatedOcr`] converts the page
//! text stored in that snapshot through the same submit / poll cycle a
//! remote OCR service uses.

mod memory;
mod ocr;
mod snapshot;

pub use memory::InMemoryKnowledgeBase;
pub use ocr::SimulatedOcr;
pub use snapshot::{LibrarySnapshot, SnapshotError};
