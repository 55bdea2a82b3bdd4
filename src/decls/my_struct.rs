use crate::decls::buffer_text;
use crate::utils::error::{MiddleError, Result};
use std::ffi::c_char;

/// Size of the inline payload buffer, in bytes.
pub const PAYLOAD_LEN: usize = 80;

/// A record with an id and an inline 80-byte character payload.
///
/// Nothing guarantees the payload is NUL-terminated; callers writing through
/// [`my_payload`] must terminate it themselves if they want text semantics.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MyStruct {
    pub id: i32,
    pub payload: [c_char; PAYLOAD_LEN],
}

pub type MyStructT = MyStruct;

impl MyStruct {
    pub fn new(id: i32) -> Self {
        Self {
            id,
            payload: [0; PAYLOAD_LEN],
        }
    }

    /// Copies `text` into the payload and NUL-pads the remainder.
    pub fn set_payload_text(&mut self, text: &str) -> Result<()> {
        if text.len() >= PAYLOAD_LEN || text.as_bytes().contains(&0) {
            return Err(MiddleError::InvalidArgument { arg: "text" });
        }

        self.payload = [0; PAYLOAD_LEN];
        for (dst, src) in self.payload.iter_mut().zip(text.bytes()) {
            *dst = src as c_char;
        }
        Ok(())
    }

    pub fn payload_text(&self) -> Option<&str> {
        buffer_text(&self.payload)
    }
}

impl Default for MyStruct {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Returns the record's own payload storage; no copy is made.
pub fn my_payload(rec: &mut MyStruct) -> &mut [c_char; PAYLOAD_LEN] {
    &mut rec.payload
}
