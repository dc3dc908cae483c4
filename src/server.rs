//! Dispatch server: a per-server method registry plus a blocking TCP accept
//! loop that bridges raw buffers to typed handlers (C7).

use std::collections::HashMap;
use std::net::TcpListener;

use log::{error, warn};
use srpc_types::{CodecError, Packer, Request, Response, SrpcMessage, StatusCode, Unpacker};

use crate::error::DispatchError;
use crate::transport::{recv_frame, send_frame};

pub type Adapter = Box<dyn Fn(&mut Unpacker, &mut Packer) -> Result<(), DispatchError> + Send + Sync>;

/// Per-server mapping from fully-qualified method name to a uniform
/// `(buffer_in, buffer_out) -> ()` adapter. Mutated only during
/// registration; read-only once serving begins.
#[derive(Default)]
pub struct Server {
    functions: HashMap<String, Adapter>,
}

impl Server {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a single method. `handler` operates on the already-decoded
    /// typed input and returns the typed output; the adapter captures the
    /// decode/encode glue so the registry stays type-erased.
    pub fn register_method<In, Out, F>(&mut self, name: impl Into<String>, handler: F)
    where
        In: SrpcMessage + Default + Send + 'static,
        Out: SrpcMessage + Send + 'static,
        F: Fn(In) -> Result<Out, DispatchError> + Send + Sync + 'static,
    {
        let adapter: Adapter = Box::new(move |unpacker, packer| {
            let request: Request<In> = unpacker.unpack_request_body(String::new())?;
            let output = handler(request.value)?;
            packer.pack_response(&Response::success(output));
            Ok(())
        });
        self.functions.insert(name.into(), adapter);
    }

    /// Direct registry invocation, bypassing the socket — a full request
    /// payload (method-name header ‖ type-name header ‖ packed input) in.
    ///
    /// `None` means the connection must be closed without a response:
    /// spec.md §7 only allows `FunctionNotRegistered` to be synthesized
    /// when the method-name header itself can't be read, or when the
    /// method is found but its input type-name header doesn't resolve in
    /// the message registry. Any other decode failure on a *found* method
    /// (truncated/malformed payload past the type-name header) must close
    /// the connection, not fabricate a response for a method that may have
    /// partially run.
    pub fn call(&self, raw_request: &[u8]) -> Option<Vec<u8>> {
        let mut unpacker = Unpacker::new(raw_request.to_vec());
        let mut packer = Packer::new();

        let method_name = match unpacker.read_method_name() {
            Ok(name) => name,
            Err(_) => return Some(Self::not_registered_response()),
        };

        match self.functions.get(&method_name) {
            Some(adapter) => match adapter(&mut unpacker, &mut packer) {
                Ok(()) => Some(packer.into_bytes()),
                Err(DispatchError::Codec(CodecError::UnknownMessageName(type_name))) => {
                    warn!("{method_name}: unknown input type name {type_name}");
                    Some(Self::not_registered_response())
                }
                Err(err) => {
                    warn!("{method_name}: decode failed, closing connection: {err}");
                    None
                }
            },
            None => {
                warn!("unregistered method: {method_name}");
                Some(Self::not_registered_response())
            }
        }
    }

    fn not_registered_response() -> Vec<u8> {
        let mut packer = Packer::new();
        packer.write_status(StatusCode::FunctionNotRegistered);
        packer.into_bytes()
    }

    /// Binds a listening socket on `port` and serves forever: accept, one
    /// request, one response, close, repeat. Accept failures are logged and
    /// do not terminate the loop.
    pub fn serve(&self, port: u16) -> std::io::Result<()> {
        let listener = TcpListener::bind(("0.0.0.0", port))?;
        self.serve_on(&listener)
    }

    pub fn serve_on(&self, listener: &TcpListener) -> std::io::Result<()> {
        loop {
            let (stream, _addr) = match listener.accept() {
                Ok(conn) => conn,
                Err(err) => {
                    error!("accept failed: {err}");
                    continue;
                }
            };
            self.serve_one(stream);
        }
    }

    fn serve_one(&self, stream: std::net::TcpStream) {
        let request = match recv_frame(&stream) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!("failed to receive request frame: {err}");
                return;
            }
        };

        let Some(response) = self.call(&request) else {
            return;
        };

        if let Err(err) = send_frame(&stream, &response) {
            warn!("failed to send response frame: {err}");
        }
    }
}
