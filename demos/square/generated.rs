//! Hand-authored worked example of what `srpc::emitter::emit_contract` would
//! produce for:
//!
//! ```text
//! message number { int64 num; }
//! service calculate { method square(number) returns (number); }
//! ```
//!
//! Checked in directly rather than produced by a build step, since driving
//! a contract file through a CLI front-end is outside this crate's scope.

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Number {
    pub num: i64,
}

impl srpc_types::SrpcMessage for Number {
    fn name(&self) -> &'static str {
        "number"
    }

    fn fields(&self) -> &'static [&'static str] {
        &["num"]
    }

    fn pack(&self, packer: &mut srpc_types::Packer) {
        packer.write_i64(self.num);
    }

    fn unpack(&mut self, unpacker: &mut srpc_types::Unpacker) -> Result<(), srpc_types::CodecError> {
        self.num = unpacker.read_i64()?;
        Ok(())
    }
}

pub struct CalculateStub {
    stream: std::net::TcpStream,
}

impl CalculateStub {
    /// One-shot install of this service's message dependencies, then a
    /// fresh client connection.
    pub fn connect(host: &str, port: u16) -> std::io::Result<Self> {
        static INSTALL: std::sync::Once = std::sync::Once::new();
        INSTALL.call_once(|| {
            srpc_types::registry::register("number", || Box::new(Number::default()));
        });
        let stream = srpc::transport::create_client_socket(host, port)?;
        Ok(Self { stream })
    }

    pub fn square(&mut self, input: Number) -> Result<Number, srpc::error::DispatchError> {
        let request = srpc_types::Request::new("calculate_servicer::square", input);
        let mut packer = srpc_types::Packer::new();
        packer.pack_request(&request);
        srpc::transport::send_frame(&self.stream, &packer.into_bytes())?;
        let bytes = srpc::transport::recv_frame(&self.stream)?;
        let mut unpacker = srpc_types::Unpacker::new(bytes);
        let response: srpc_types::Response<Number> = unpacker.unpack_response()?;
        Ok(response.value)
    }
}

pub trait CalculateServicer: Send + Sync + 'static {
    fn square(&self, _input: Number) -> Result<Number, srpc::error::DispatchError> {
        Err(srpc::error::DispatchError::MethodNotImplemented("square".to_string()))
    }
}

/// Installs every method of a `CalculateServicer` implementation into
/// `server`, matching the ordered method table above.
pub fn register_calculate_servicer<T: CalculateServicer>(
    server: &mut srpc::server::Server,
    servicer: std::sync::Arc<T>,
) {
    let svc = servicer.clone();
    server.register_method("calculate_servicer::square", move |input| svc.square(input));
}
