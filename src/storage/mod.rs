//!  Storage is organized through [document_storage::JsonFileStorage].
//!  The basic idea is:
//!   - All items live in one JSON document inside the application directory.
//!   - The document is read once on startup.
//!   - Every change rewrites the whole file.

pub mod document_storage;
pub mod entities;
