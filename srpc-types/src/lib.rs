//! Runtime vocabulary shared by generated message types and the `srpc`
//! wire/dispatch core: the [`SrpcMessage`] capability, [`StatusCode`],
//! [`Request`]/[`Response`] envelopes, the byte [`Buffer`] cursor, and the
//! [`Packer`]/[`Unpacker`] pair that packs/unpacks values over it.

mod buffer;
mod codec;
mod envelope;
mod error;
mod message;
pub mod registry;
mod status;

pub use buffer::Buffer;
pub use codec::{Packer, Unpacker};
pub use envelope::{Request, Response};
pub use error::{BufferError, CodecError};
pub use message::{MessageFactory, SrpcMessage};
pub use status::StatusCode;
