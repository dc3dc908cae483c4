//! Contract IR: the typed shape a parsed `.srpc` file is reduced to.

use std::collections::HashMap;

/// One field of a `message`. `type_name` is the IDL spelling verbatim —
/// either a primitive keyword or the name of another message.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldDef {
    pub is_primitive: bool,
    pub name: String,
    pub type_name: String,
    /// The `= N` suffix, parsed but ignored on the wire (open question 1).
    pub field_number: u32,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MessageDef {
    pub name: String,
    pub fields: Vec<FieldDef>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MethodDef {
    pub name: String,
    pub input_type: String,
    pub output_type: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServiceDef {
    pub name: String,
    pub methods: Vec<MethodDef>,
    /// Input/output type names across `methods`, first-seen order,
    /// deduplicated — drives registry bootstrap in the emitted stub.
    pub message_dependencies: Vec<String>,
}

impl ServiceDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
            message_dependencies: Vec::new(),
        }
    }

    /// Appends `method`, folding its input/output types into
    /// `message_dependencies` in first-seen order.
    pub fn add_method(&mut self, method: MethodDef) {
        for type_name in [&method.input_type, &method.output_type] {
            if !self.message_dependencies.contains(type_name) {
                self.message_dependencies.push(type_name.clone());
            }
        }
        self.methods.push(method);
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ContractElement {
    Message(MessageDef),
    Service(ServiceDef),
}

impl ContractElement {
    pub fn name(&self) -> &str {
        match self {
            ContractElement::Message(m) => &m.name,
            ContractElement::Service(s) => &s.name,
        }
    }
}

/// The ordered element table a parsed contract reduces to. Declaration
/// order is preserved so the emitter can topologically emit types before
/// the elements that reference them.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ContractTable {
    elements: Vec<ContractElement>,
    index_of: HashMap<String, usize>,
}

impl ContractTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `element`, failing if its name already exists. On success,
    /// `index_of[name] == position in elements` holds by construction.
    pub fn insert(&mut self, element: ContractElement) -> Result<(), String> {
        let name = element.name().to_string();
        if self.index_of.contains_key(&name) {
            return Err(format!("duplicate element name {name}"));
        }
        self.index_of.insert(name, self.elements.len());
        self.elements.push(element);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&ContractElement> {
        self.index_of.get(name).map(|&i| &self.elements[i])
    }

    pub fn elements(&self) -> &[ContractElement] {
        &self.elements
    }

    pub fn messages(&self) -> impl Iterator<Item = &MessageDef> {
        self.elements.iter().filter_map(|e| match e {
            ContractElement::Message(m) => Some(m),
            ContractElement::Service(_) => None,
        })
    }

    pub fn services(&self) -> impl Iterator<Item = &ServiceDef> {
        self.elements.iter().filter_map(|e| match e {
            ContractElement::Service(s) => Some(s),
            ContractElement::Message(_) => None,
        })
    }
}
