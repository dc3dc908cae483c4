//! Typed packing/unpacking over a [`Buffer`], and request/response framing.
//!
//! Mirrors the original reference's `packer` class, split into a
//! write-only `Packer` and a read-only `Unpacker` — Rust has no
//! `operator<<`/`operator>>` overloading, so the two directions get their
//! own primitive methods instead of one class dispatching on a template
//! parameter.

use crate::buffer::Buffer;
use crate::envelope::{Request, Response};
use crate::error::CodecError;
use crate::message::SrpcMessage;
use crate::registry;
use crate::status::StatusCode;

/// Write-only cursor. Every `write_*` method appends to the end of the
/// underlying buffer; there is no read cursor to manage.
#[derive(Clone, Debug, Default)]
pub struct Packer {
    buf: Buffer,
}

impl Packer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_bool(&mut self, v: bool) {
        self.buf.append(&[v as u8]);
    }

    pub fn write_i8(&mut self, v: i8) {
        self.buf.append(&v.to_ne_bytes());
    }

    pub fn write_i16(&mut self, v: i16) {
        self.buf.append(&v.to_ne_bytes());
    }

    pub fn write_i32(&mut self, v: i32) {
        self.buf.append(&v.to_ne_bytes());
    }

    pub fn write_i64(&mut self, v: i64) {
        self.buf.append(&v.to_ne_bytes());
    }

    /// The IDL's `char` keyword is a single byte, truncated from `char`'s
    /// leading UTF-8 byte (ASCII contracts only — see spec non-goals).
    pub fn write_char(&mut self, v: char) {
        self.buf.append(&[v as u8]);
    }

    pub fn write_string(&mut self, v: &str) {
        let len = v.len() as u64;
        self.buf.append(&len.to_ne_bytes());
        self.buf.append(v.as_bytes());
    }

    pub fn write_status(&mut self, v: StatusCode) {
        self.buf.append(&[v.to_byte()]);
    }

    /// Writes a nested message's fields in declaration order, with no
    /// added framing (spec §4.3).
    pub fn write_message(&mut self, v: &dyn SrpcMessage) {
        v.pack(self);
    }

    /// Method name ‖ input type name ‖ packed input.
    pub fn pack_request<T: SrpcMessage>(&mut self, req: &Request<T>) {
        self.write_string(&req.method_name);
        self.write_string(req.value.name());
        req.value.pack(self);
    }

    /// Status ‖ output type name ‖ packed output.
    pub fn pack_response<T: SrpcMessage>(&mut self, resp: &Response<T>) {
        self.write_status(resp.code);
        self.write_string(resp.value.name());
        resp.value.pack(self);
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf.into_bytes()
    }

    pub fn as_slice(&self) -> &[u8] {
        self.buf.as_slice()
    }
}

/// Read-only cursor over a byte slice already received off the wire.
#[derive(Clone, Debug)]
pub struct Unpacker {
    buf: Buffer,
}

impl Unpacker {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            buf: Buffer::from_bytes(bytes),
        }
    }

    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    fn read_fixed<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let bytes = self.buf.advance(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    pub fn read_bool(&mut self) -> Result<bool, CodecError> {
        Ok(self.read_fixed::<1>()?[0] != 0)
    }

    pub fn read_i8(&mut self) -> Result<i8, CodecError> {
        Ok(i8::from_ne_bytes(self.read_fixed::<1>()?))
    }

    pub fn read_i16(&mut self) -> Result<i16, CodecError> {
        Ok(i16::from_ne_bytes(self.read_fixed::<2>()?))
    }

    pub fn read_i32(&mut self) -> Result<i32, CodecError> {
        Ok(i32::from_ne_bytes(self.read_fixed::<4>()?))
    }

    pub fn read_i64(&mut self) -> Result<i64, CodecError> {
        Ok(i64::from_ne_bytes(self.read_fixed::<8>()?))
    }

    pub fn read_char(&mut self) -> Result<char, CodecError> {
        Ok(self.read_fixed::<1>()?[0] as char)
    }

    pub fn read_string(&mut self) -> Result<String, CodecError> {
        let len = u64::from_ne_bytes(self.read_fixed::<8>()?);
        if len as usize > self.buf.remaining() {
            return Err(CodecError::LengthOverflow {
                declared: len,
                remaining: self.buf.remaining(),
            });
        }
        let bytes = self.buf.advance(len as usize)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    pub fn read_status(&mut self) -> Result<StatusCode, CodecError> {
        let byte = self.read_fixed::<1>()?[0];
        Ok(StatusCode::from_byte(byte).unwrap_or(StatusCode::FunctionNotRegistered))
    }

    /// Reads a nested message's fields in declaration order.
    pub fn read_message(&mut self, v: &mut dyn SrpcMessage) -> Result<(), CodecError> {
        v.unpack(self)
    }

    /// Reads the method-name header only, leaving the remainder (type-name
    /// header + payload) for a subsequent `unpack_request`. Used by the
    /// dispatch server, which must see the method name before it knows
    /// which concrete input type to decode.
    pub fn read_method_name(&mut self) -> Result<String, CodecError> {
        self.read_string()
    }

    /// Reads a request whose method-name header has already been consumed
    /// by the dispatcher (see [`Self::read_method_name`]).
    pub fn unpack_request_body<T: SrpcMessage + Default>(
        &mut self,
        method_name: String,
    ) -> Result<Request<T>, CodecError> {
        let message_name = self.read_string()?;
        if !registry::contains(&message_name) {
            return Err(CodecError::UnknownMessageName(message_name));
        }
        let mut value = T::default();
        value.unpack(self)?;
        Ok(Request {
            method_name,
            value,
        })
    }

    /// Reads a full request, including its method-name header.
    pub fn unpack_request<T: SrpcMessage + Default>(&mut self) -> Result<Request<T>, CodecError> {
        let method_name = self.read_method_name()?;
        self.unpack_request_body(method_name)
    }

    pub fn unpack_response<T: SrpcMessage + Default>(&mut self) -> Result<Response<T>, CodecError> {
        let code = self.read_status()?;
        let message_name = self.read_string()?;
        if !registry::contains(&message_name) {
            return Err(CodecError::UnknownMessageName(message_name));
        }
        let mut value = T::default();
        value.unpack(self)?;
        Ok(Response { code, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BufferError;

    #[derive(Clone, Debug, Default, Eq, PartialEq)]
    struct SinglePrimitive {
        arg1: i8,
    }

    impl SrpcMessage for SinglePrimitive {
        fn name(&self) -> &'static str {
            "single_primitive"
        }

        fn fields(&self) -> &'static [&'static str] {
            &["arg1"]
        }

        fn pack(&self, packer: &mut Packer) {
            packer.write_i8(self.arg1);
        }

        fn unpack(&mut self, unpacker: &mut Unpacker) -> Result<(), CodecError> {
            self.arg1 = unpacker.read_i8()?;
            Ok(())
        }
    }

    #[derive(Clone, Debug, Default, Eq, PartialEq)]
    struct MultiplePrimitives {
        a: i8,
        b: char,
        c: i64,
        d: String,
    }

    impl SrpcMessage for MultiplePrimitives {
        fn name(&self) -> &'static str {
            "multiple_primitives"
        }

        fn fields(&self) -> &'static [&'static str] {
            &["a", "b", "c", "d"]
        }

        fn pack(&self, packer: &mut Packer) {
            packer.write_i8(self.a);
            packer.write_char(self.b);
            packer.write_i64(self.c);
            packer.write_string(&self.d);
        }

        fn unpack(&mut self, unpacker: &mut Unpacker) -> Result<(), CodecError> {
            self.a = unpacker.read_i8()?;
            self.b = unpacker.read_char()?;
            self.c = unpacker.read_i64()?;
            self.d = unpacker.read_string()?;
            Ok(())
        }
    }

    #[derive(Clone, Debug, Default, Eq, PartialEq)]
    struct NestedMessage {
        n: i64,
        s: SinglePrimitive,
        m: MultiplePrimitives,
    }

    impl SrpcMessage for NestedMessage {
        fn name(&self) -> &'static str {
            "nested_message"
        }

        fn fields(&self) -> &'static [&'static str] {
            &["n", "s", "m"]
        }

        fn pack(&self, packer: &mut Packer) {
            packer.write_i64(self.n);
            packer.write_message(&self.s);
            packer.write_message(&self.m);
        }

        fn unpack(&mut self, unpacker: &mut Unpacker) -> Result<(), CodecError> {
            self.n = unpacker.read_i64()?;
            unpacker.read_message(&mut self.s)?;
            unpacker.read_message(&mut self.m)?;
            Ok(())
        }
    }

    fn register_test_types() {
        registry::register("single_primitive", || {
            Box::new(SinglePrimitive::default())
        });
        registry::register("multiple_primitives", || {
            Box::new(MultiplePrimitives::default())
        });
        registry::register("nested_message", || Box::new(NestedMessage::default()));
    }

    /// Spec §8 scenario 1: pack a single-int8 message as a request payload.
    #[test]
    fn scenario_1_pack_single_primitive_request() {
        register_test_types();
        let req = Request::new("test", SinglePrimitive { arg1: 5 });

        let mut packer = Packer::new();
        packer.pack_request(&req);
        let bytes = packer.into_bytes();

        let mut expected = Vec::new();
        expected.extend_from_slice(&4u64.to_ne_bytes());
        expected.extend_from_slice(b"test");
        expected.extend_from_slice(&16u64.to_ne_bytes());
        expected.extend_from_slice(b"single_primitive");
        expected.push(5);

        assert_eq!(bytes, expected);
    }

    /// Spec §8 scenario 2: pack a multi-field message as a response payload
    /// with a non-success status.
    #[test]
    fn scenario_2_pack_multiple_primitives_response() {
        register_test_types();
        let resp = Response::new(
            StatusCode::RecvTimeout,
            MultiplePrimitives {
                a: 22,
                b: 'z',
                c: i64::MAX,
                d: "testing_string".to_string(),
            },
        );

        let mut packer = Packer::new();
        packer.pack_response(&resp);
        let bytes = packer.into_bytes();

        let mut expected = Vec::new();
        expected.push(2);
        expected.extend_from_slice(&19u64.to_ne_bytes());
        expected.extend_from_slice(b"multiple_primitives");
        expected.push(22);
        expected.push(b'z');
        expected.extend_from_slice(&i64::MAX.to_ne_bytes());
        expected.extend_from_slice(&14u64.to_ne_bytes());
        expected.extend_from_slice(b"testing_string");

        assert_eq!(bytes, expected);
    }

    /// Spec §8 scenario 3: a nested message packs as the plain
    /// concatenation of its fields, with no extra framing in between.
    #[test]
    fn scenario_3_nested_message_round_trips() {
        register_test_types();
        let original = NestedMessage {
            n: 7,
            s: SinglePrimitive { arg1: -3 },
            m: MultiplePrimitives {
                a: 1,
                b: 'x',
                c: 42,
                d: "hi".to_string(),
            },
        };

        let mut packer = Packer::new();
        packer.write_message(&original);
        let bytes = packer.into_bytes();

        let mut unpacker = Unpacker::new(bytes);
        let mut decoded = NestedMessage::default();
        unpacker.read_message(&mut decoded).unwrap();

        assert_eq!(decoded, original);
        assert_eq!(unpacker.remaining(), 0);
    }

    #[test]
    fn request_round_trips_through_pack_and_unpack() {
        register_test_types();
        let req = Request::new("calculate_servicer::square", SinglePrimitive { arg1: 9 });

        let mut packer = Packer::new();
        packer.pack_request(&req);

        let mut unpacker = Unpacker::new(packer.into_bytes());
        let decoded: Request<SinglePrimitive> = unpacker.unpack_request().unwrap();

        assert_eq!(decoded, req);
        assert_eq!(unpacker.remaining(), 0);
    }

    #[test]
    fn response_round_trips_through_pack_and_unpack() {
        register_test_types();
        let resp = Response::success(SinglePrimitive { arg1: 25 });

        let mut packer = Packer::new();
        packer.pack_response(&resp);

        let mut unpacker = Unpacker::new(packer.into_bytes());
        let decoded: Response<SinglePrimitive> = unpacker.unpack_response().unwrap();

        assert_eq!(decoded, resp);
        assert_eq!(unpacker.remaining(), 0);
    }

    #[test]
    fn truncated_buffer_is_rejected_not_panicked() {
        let mut unpacker = Unpacker::new(vec![1, 2]);
        assert_eq!(unpacker.read_i64(), Err(CodecError::Truncated(BufferError::OutOfBounds)));
    }

    #[test]
    fn string_length_overflow_is_rejected() {
        let mut bytes = 1000u64.to_ne_bytes().to_vec();
        bytes.extend_from_slice(b"short");
        let mut unpacker = Unpacker::new(bytes);
        assert!(matches!(
            unpacker.read_string(),
            Err(CodecError::LengthOverflow { .. })
        ));
    }
}
