//! Level files: the document layer, the native codec, legacy import and
//! the on-disk level library

pub mod codec;
pub mod document;
pub mod legacy;
pub mod library;

pub use codec::{decode, encode, LevelFile};
pub use legacy::import_legacy;
pub use library::{LevelEntry, LevelLibrary};
