//! Contract IR → Rust source for message structs, client stubs, and server
//! skeletons (C6). `emit_contract` is a pure function; what the caller does
//! with the returned `String` — writing it to `<basename>_srpc.rs` — is the
//! out-of-scope CLI's job.

use crate::ir::{ContractElement, ContractTable, MessageDef, ServiceDef};

/// Emits Rust source for every element of `table`, in declaration order, so
/// that referenced types are always emitted before the elements that
/// reference them.
pub fn emit_contract(table: &ContractTable) -> String {
    let mut out = String::new();
    for element in table.elements() {
        match element {
            ContractElement::Message(m) => emit_message(m, &mut out),
            ContractElement::Service(s) => emit_service(s, &mut out),
        }
        out.push('\n');
    }
    out
}

fn rust_type(type_name: &str) -> String {
    match type_name {
        "bool" => "bool".to_string(),
        "int8" => "i8".to_string(),
        "int16" => "i16".to_string(),
        "int32" => "i32".to_string(),
        "int64" => "i64".to_string(),
        "char" => "char".to_string(),
        "string" => "String".to_string(),
        other => pascal_case(other),
    }
}

fn pascal_case(name: &str) -> String {
    name.split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(c) => c.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

fn write_primitive_field(type_name: &str, field: &str, out: &mut String) {
    match type_name {
        "bool" => out.push_str(&format!("packer.write_bool(self.{field});\n")),
        "int8" => out.push_str(&format!("packer.write_i8(self.{field});\n")),
        "int16" => out.push_str(&format!("packer.write_i16(self.{field});\n")),
        "int32" => out.push_str(&format!("packer.write_i32(self.{field});\n")),
        "int64" => out.push_str(&format!("packer.write_i64(self.{field});\n")),
        "char" => out.push_str(&format!("packer.write_char(self.{field});\n")),
        "string" => out.push_str(&format!("packer.write_string(&self.{field});\n")),
        _ => out.push_str(&format!("packer.write_message(&self.{field});\n")),
    }
}

fn read_primitive_field(type_name: &str, field: &str, out: &mut String) {
    match type_name {
        "bool" => out.push_str(&format!("self.{field} = unpacker.read_bool()?;\n")),
        "int8" => out.push_str(&format!("self.{field} = unpacker.read_i8()?;\n")),
        "int16" => out.push_str(&format!("self.{field} = unpacker.read_i16()?;\n")),
        "int32" => out.push_str(&format!("self.{field} = unpacker.read_i32()?;\n")),
        "int64" => out.push_str(&format!("self.{field} = unpacker.read_i64()?;\n")),
        "char" => out.push_str(&format!("self.{field} = unpacker.read_char()?;\n")),
        "string" => out.push_str(&format!("self.{field} = unpacker.read_string()?;\n")),
        _ => out.push_str(&format!("unpacker.read_message(&mut self.{field})?;\n")),
    }
}

fn emit_message(def: &MessageDef, out: &mut String) {
    let struct_name = pascal_case(&def.name);

    out.push_str("#[derive(Clone, Debug, Default, PartialEq)]\n");
    out.push_str(&format!("pub struct {struct_name} {{\n"));
    for field in &def.fields {
        out.push_str(&format!("    pub {}: {},\n", field.name, rust_type(&field.type_name)));
    }
    out.push_str("}\n\n");

    let field_list = def
        .fields
        .iter()
        .map(|f| format!("\"{}\"", f.name))
        .collect::<Vec<_>>()
        .join(", ");

    out.push_str(&format!("impl srpc_types::SrpcMessage for {struct_name} {{\n"));
    out.push_str(&format!("    fn name(&self) -> &'static str {{ \"{}\" }}\n\n", def.name));
    out.push_str(&format!("    fn fields(&self) -> &'static [&'static str] {{ &[{field_list}] }}\n\n"));

    out.push_str("    fn pack(&self, packer: &mut srpc_types::Packer) {\n");
    for field in &def.fields {
        out.push_str("        ");
        write_primitive_field(&field.type_name, &field.name, out);
    }
    out.push_str("    }\n\n");

    out.push_str("    fn unpack(&mut self, unpacker: &mut srpc_types::Unpacker) -> Result<(), srpc_types::CodecError> {\n");
    for field in &def.fields {
        out.push_str("        ");
        read_primitive_field(&field.type_name, &field.name, out);
    }
    out.push_str("        Ok(())\n");
    out.push_str("    }\n");
    out.push_str("}\n");
}

fn emit_service(def: &ServiceDef, out: &mut String) {
    let stub_name = format!("{}Stub", pascal_case(&def.name));
    let servicer_trait = format!("{}Servicer", pascal_case(&def.name));

    out.push_str(&format!("pub struct {stub_name} {{\n"));
    out.push_str("    stream: std::net::TcpStream,\n");
    out.push_str("}\n\n");

    out.push_str(&format!("impl {stub_name} {{\n"));
    out.push_str("    /// One-shot install of this service's message dependencies, then a\n");
    out.push_str("    /// fresh client connection.\n");
    out.push_str("    pub fn connect(host: &str, port: u16) -> std::io::Result<Self> {\n");
    out.push_str("        static INSTALL: std::sync::Once = std::sync::Once::new();\n");
    out.push_str("        INSTALL.call_once(|| {\n");
    for dep in &def.message_dependencies {
        let struct_name = pascal_case(dep);
        out.push_str(&format!(
            "            srpc_types::registry::register(\"{dep}\", || Box::new({struct_name}::default()));\n"
        ));
    }
    out.push_str("        });\n");
    out.push_str("        let stream = srpc::transport::create_client_socket(host, port)?;\n");
    out.push_str("        Ok(Self { stream })\n");
    out.push_str("    }\n\n");

    for method in &def.methods {
        let input = pascal_case(&method.input_type);
        let output = pascal_case(&method.output_type);
        out.push_str(&format!(
            "    pub fn {}(&mut self, input: {input}) -> Result<{output}, srpc::error::DispatchError> {{\n",
            method.name
        ));
        out.push_str(&format!(
            "        let request = srpc_types::Request::new(\"{}_servicer::{}\", input);\n",
            def.name, method.name
        ));
        out.push_str("        let mut packer = srpc_types::Packer::new();\n");
        out.push_str("        packer.pack_request(&request);\n");
        out.push_str("        srpc::transport::send_frame(&self.stream, &packer.into_bytes())?;\n");
        out.push_str("        let bytes = srpc::transport::recv_frame(&self.stream)?;\n");
        out.push_str("        let mut unpacker = srpc_types::Unpacker::new(bytes);\n");
        out.push_str(&format!(
            "        let response: srpc_types::Response<{output}> = unpacker.unpack_response()?;\n"
        ));
        out.push_str("        Ok(response.value)\n");
        out.push_str("    }\n\n");
    }
    out.push_str("}\n\n");

    out.push_str(&format!("pub trait {servicer_trait}: Send + Sync + 'static {{\n"));
    for method in &def.methods {
        let input = pascal_case(&method.input_type);
        let output = pascal_case(&method.output_type);
        out.push_str(&format!(
            "    fn {}(&self, _input: {input}) -> Result<{output}, srpc::error::DispatchError> {{\n",
            method.name
        ));
        out.push_str(&format!(
            "        Err(srpc::error::DispatchError::MethodNotImplemented(\"{}\".to_string()))\n",
            method.name
        ));
        out.push_str("    }\n");
    }
    out.push_str("}\n\n");

    out.push_str(&format!(
        "/// Installs every method of a `{servicer_trait}` implementation into `server`,\n"
    ));
    out.push_str("/// matching the ordered method table above.\n");
    out.push_str(&format!(
        "pub fn register_{}_servicer<T: {servicer_trait}>(server: &mut srpc::server::Server, servicer: std::sync::Arc<T>) {{\n",
        def.name
    ));
    for method in &def.methods {
        out.push_str("    let svc = servicer.clone();\n");
        out.push_str(&format!(
            "    server.register_method(\"{}_servicer::{}\", move |input| svc.{}(input));\n",
            def.name, method.name, method.name
        ));
    }
    out.push_str("}\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;

    #[test]
    fn emits_a_message_struct_and_srpc_message_impl() {
        let table = Parser::parse("message number { int64 num; }").unwrap();
        let source = emit_contract(&table);

        assert!(source.contains("pub struct Number"));
        assert!(source.contains("pub num: i64"));
        assert!(source.contains("fn name(&self) -> &'static str { \"number\" }"));
        assert!(source.contains("packer.write_i64(self.num);"));
    }

    #[test]
    fn emits_a_stub_and_servicer_for_a_service() {
        let table = Parser::parse(
            "message number { int64 num; } service calculate { method square(number) returns (number); }",
        )
        .unwrap();
        let source = emit_contract(&table);

        assert!(source.contains("pub struct CalculateStub"));
        assert!(source.contains("pub trait CalculateServicer"));
        assert!(source.contains("calculate_servicer::square"));
        assert!(source.contains("pub fn register_calculate_servicer"));
    }

    #[test]
    fn nested_message_field_packs_via_write_message() {
        let table = Parser::parse(
            "message single_primitive { int8 arg1; } message wrapper { single_primitive inner; }",
        )
        .unwrap();
        let source = emit_contract(&table);
        assert!(source.contains("packer.write_message(&self.inner);"));
    }
}
