//! `srpc`: an IDL-driven RPC toolkit.
//!
//! The IDL front-end ([`lexer`], [`parser`], [`ir`]) reduces a `.srpc`
//! contract to a typed [`ir::ContractTable`]; [`emitter`] turns that table
//! into Rust source for message structs, client stubs, and server
//! skeletons. At runtime, [`server`] dispatches decoded requests by method
//! name over a [`transport`] built on length-prefixed TCP frames. The wire
//! codec itself — [`srpc_types::Packer`]/[`srpc_types::Unpacker`], the
//! message registry, [`srpc_types::SrpcMessage`] — lives in the
//! `srpc-types` crate and is re-exported here for convenience.

pub mod emitter;
pub mod error;
pub mod ir;
pub mod lexer;
pub mod parser;
pub mod server;
pub mod token;
pub mod transport;

pub use srpc_types;
