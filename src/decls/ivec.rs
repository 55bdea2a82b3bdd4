/// Ordered, resizable sequence of signed 32-bit integers.
pub type Ivec = Vec<i32>;

/// Sum of every element, with two's-complement wraparound.
///
/// The result is a data value; an empty sequence sums to 0.
pub fn vector_fun(iv: &Ivec) -> i32 {
    iv.iter().fold(0i32, |acc, v| acc.wrapping_add(*v))
}
