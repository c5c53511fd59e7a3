//! I/O layer: decoding uploaded templates, encoding photocards, the manifest
//! sidecar, and delivery ports that receive batches.
pub mod decode;
pub use decode::{decode_composite, open_composite};

pub mod delivery;
pub use delivery::{DeliveryPort, DirectoryPort, MemoryPort, NO_PHOTOCARDS_MESSAGE};

pub mod writers;
pub use writers::{EncodedPhoto, encode_photo, photo_file_name};
