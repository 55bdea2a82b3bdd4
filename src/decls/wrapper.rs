/// A container holding exactly one value of its instantiation type.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TypeWrapper<T> {
    pub my_type: T,
}

impl<T> TypeWrapper<T> {
    pub fn new(my_type: T) -> Self {
        Self { my_type }
    }

    pub fn into_inner(self) -> T {
        self.my_type
    }
}

/// Increments the wrapped integer by one, wrapping at `i32::MAX`.
pub fn tw_fun(wrapped: &mut TypeWrapper<i32>) {
    wrapped.my_type = wrapped.my_type.wrapping_add(1);
}
