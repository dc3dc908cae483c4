use std::fmt::Debug;

use crate::codec::{Packer, Unpacker};
use crate::error::CodecError;

/// Capability set implemented by every message type the emitter generates.
///
/// Corresponds to the original reference's `message_base` / `SrpcMessage`
/// concept (`has a constant canonical name`, `has an ordered field list`,
/// `can unpack itself from a buffer`). Expressed here as a trait object
/// rather than a base class, since Rust has no implementation inheritance.
pub trait SrpcMessage: Debug {
    /// The message's canonical wire name, used as the type-name header.
    fn name(&self) -> &'static str;

    /// Field names in declaration order, the canonical wire order.
    fn fields(&self) -> &'static [&'static str];

    /// Writes this value's fields, in declaration order, into `packer`.
    fn pack(&self, packer: &mut Packer);

    /// Reads this value's fields, in declaration order, from `unpacker`.
    fn unpack(&mut self, unpacker: &mut Unpacker) -> Result<(), CodecError>;
}

/// Constructs a fresh, default-valued instance of a specific message type.
///
/// Entries in the process-wide [`crate::registry`] are values of this type.
pub type MessageFactory = fn() -> Box<dyn SrpcMessage + Send>;
