use crate::status::StatusCode;

/// A client-to-server call: the fully-qualified method name plus the typed
/// input value. Corresponds to the original reference's `request_t<T>`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Request<T> {
    pub method_name: String,
    pub value: T,
}

impl<T> Request<T> {
    pub fn new(method_name: impl Into<String>, value: T) -> Self {
        Self {
            method_name: method_name.into(),
            value,
        }
    }
}

/// A server-to-client reply: a status plus the typed output value.
/// Corresponds to the original reference's `response_t<T>`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Response<T> {
    pub code: StatusCode,
    pub value: T,
}

impl<T> Response<T> {
    pub fn new(code: StatusCode, value: T) -> Self {
        Self { code, value }
    }

    pub fn success(value: T) -> Self {
        Self::new(StatusCode::Success, value)
    }
}
