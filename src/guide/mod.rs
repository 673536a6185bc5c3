//! Program guide construction
//!
//! Turns feed records into programs and programs into an XMLTV document.

pub mod categories;
pub mod channel_id;
mod mapper;
mod xmltv;

// Re-export public types
pub use mapper::ProgramMapper;
pub use xmltv::XmltvDocument;
