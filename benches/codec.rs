use criterion::{black_box, criterion_group, criterion_main, Criterion};
use srpc_types::{CodecError, Packer, SrpcMessage, Unpacker};

#[derive(Clone, Debug, Default, PartialEq)]
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

#[derive(Clone, Debug, Default, PartialEq)]
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

#[derive(Clone, Debug, Default, PartialEq)]
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

fn sample() -> NestedMessage {
    NestedMessage {
        n: 7,
        s: SinglePrimitive { arg1: -3 },
        m: MultiplePrimitives {
            a: 1,
            b: 'x',
            c: 42,
            d: "testing_string".to_string(),
        },
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    let value = sample();

    c.bench_function("pack_nested_message", |b| {
        b.iter(|| {
            let mut packer = Packer::new();
            packer.write_message(black_box(&value));
            black_box(packer.into_bytes())
        })
    });

    let mut packer = Packer::new();
    packer.write_message(&value);
    let bytes = packer.into_bytes();

    c.bench_function("unpack_nested_message", |b| {
        b.iter(|| {
            let mut unpacker = Unpacker::new(black_box(bytes.clone()));
            let mut decoded = NestedMessage::default();
            unpacker.read_message(&mut decoded).unwrap();
            black_box(decoded)
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
