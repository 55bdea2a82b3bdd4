use std::ffi::{c_char, c_int, CStr};
use std::marker::PhantomData;
use std::ptr;

/// Status returned by [`init_rec`] on success.
pub const REC_OK: c_int = 0;

/// Adds two integers with two's-complement wraparound.
pub fn sum(a: i32, b: i32) -> i32 {
    a.wrapping_add(b)
}

/// Like [`sum`], but `None` on overflow.
pub fn checked_sum(a: i32, b: i32) -> Option<i32> {
    a.checked_add(b)
}

/// A record with a borrowed name and an integer value.
///
/// `name` is a non-owning view of character data managed elsewhere. The
/// record never frees it, and `'a` keeps the record from outliving it.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct MyRec<'a> {
    name: *const c_char,
    pub value: c_int,
    _name: PhantomData<&'a CStr>,
}

impl<'a> MyRec<'a> {
    pub fn new(name: Option<&'a CStr>, value: c_int) -> Self {
        Self {
            name: name.map_or(ptr::null(), CStr::as_ptr),
            value,
            _name: PhantomData,
        }
    }

    pub fn name(&self) -> Option<&'a CStr> {
        if self.name.is_null() {
            None
        } else {
            // Only set from a `&'a CStr` or by C code that upholds the same
            // contract through the FFI.
            Some(unsafe { CStr::from_ptr(self.name) })
        }
    }

    pub fn set_name(&mut self, name: Option<&'a CStr>) {
        self.name = name.map_or(ptr::null(), CStr::as_ptr);
    }

    /// Adds the byte length of `name` (0 when unset) to `value`, wrapping.
    pub fn do_something_to_this(&mut self) {
        let len = self.name().map_or(0, |n| n.to_bytes().len());
        self.value = self.value.wrapping_add(len as c_int);
    }
}

impl Default for MyRec<'_> {
    fn default() -> Self {
        Self::new(None, 0)
    }
}

/// Resets `rec` to no name and a zero value. Always returns [`REC_OK`].
pub fn init_rec(rec: &mut MyRec<'_>) -> c_int {
    rec.name = ptr::null();
    rec.value = 0;
    REC_OK
}
