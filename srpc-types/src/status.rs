/// Single-octet response status, part of the wire contract (spec §6).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum StatusCode {
    Success = 0,
    FunctionNotRegistered = 1,
    RecvTimeout = 2,
}

impl StatusCode {
    pub fn to_byte(self) -> u8 {
        self as u8
    }

    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Success),
            1 => Some(Self::FunctionNotRegistered),
            2 => Some(Self::RecvTimeout),
            _ => None,
        }
    }
}
