mod object;
pub use object::{Dictionary, Object, ObjectId, Stream};

mod document;
pub use document::Document;

mod assembler;
pub use assembler::{RasterImage, assemble_pdf};

mod content;
pub use content::{Content, Operation, page_program};

mod layout;
pub use layout::{PageLayout, Placement, fit};

mod error;
pub use error::{Error, Result};

mod writer;
pub use writer::Writer;

mod xref;
