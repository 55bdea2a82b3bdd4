use serde_json::{json, Value};

/// Scalar C types with a direct JSON Schema counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Float,
    Double,
    Char,
}

impl Primitive {
    pub fn spelling(self) -> &'static str {
        match self {
            Primitive::Bool => "bool",
            Primitive::Int8 => "signed char",
            Primitive::Int16 => "short",
            Primitive::Int32 => "int",
            Primitive::Int64 => "long long",
            Primitive::Float => "float",
            Primitive::Double => "double",
            Primitive::Char => "char",
        }
    }

    pub fn to_schema(self) -> Value {
        match self {
            Primitive::Bool => json!({ "type": "boolean" }),
            Primitive::Int8 => json!({ "type": "integer", "format": "int8" }),
            Primitive::Int16 => json!({ "type": "integer", "format": "int16" }),
            Primitive::Int32 => json!({ "type": "integer", "format": "int32" }),
            Primitive::Int64 => json!({ "type": "integer", "format": "int64" }),
            Primitive::Float => json!({ "type": "number", "format": "float" }),
            Primitive::Double => json!({ "type": "number", "format": "double" }),
            Primitive::Char => json!({ "type": "string" }),
        }
    }
}

/// Rust scalars that stand in for a [`Primitive`].
pub trait DescribePrimitive {
    const PRIMITIVE: Primitive;
}

macro_rules! describe_primitive {
    ($($ty:ty => $prim:ident),* $(,)?) => {
        $(impl DescribePrimitive for $ty {
            const PRIMITIVE: Primitive = Primitive::$prim;
        })*
    };
}

describe_primitive! {
    bool => Bool,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    f32 => Float,
    f64 => Double,
}

/// The type of a record field, function argument or function result.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    Primitive(Primitive),
    /// `char *`
    CString,
    /// `char[N]`
    CharArray(usize),
    /// Any sequence of a mappable element type.
    Array(Box<FieldType>),
    /// `T[N]` for non-char `T`. `long long[1]` is a timestamp.
    FixedArray(Box<FieldType>, usize),
    /// A record declared in the same catalog, by name or alias.
    Record(String),
    Pointer(Box<FieldType>),
    /// A type known only by name, with no visible layout.
    Opaque(String),
    /// A type with no JSON Schema mapping, kept with its C spelling.
    Unsupported(String),
}

impl FieldType {
    pub fn record(name: &str) -> Self {
        FieldType::Record(name.to_string())
    }

    pub fn pointer(inner: FieldType) -> Self {
        FieldType::Pointer(Box::new(inner))
    }

    pub fn array(elem: FieldType) -> Self {
        FieldType::Array(Box::new(elem))
    }

    pub fn fixed_array(elem: FieldType, len: usize) -> Self {
        FieldType::FixedArray(Box::new(elem), len)
    }

    pub fn spelling(&self) -> String {
        match self {
            FieldType::Primitive(p) => p.spelling().to_string(),
            FieldType::CString => "char *".to_string(),
            FieldType::CharArray(n) => format!("char[{}]", n),
            FieldType::Array(elem) => format!("std::vector<{}>", elem.spelling()),
            FieldType::FixedArray(elem, n) => format!("{}[{}]", elem.spelling(), n),
            FieldType::Record(name) | FieldType::Opaque(name) | FieldType::Unsupported(name) => {
                name.clone()
            }
            FieldType::Pointer(inner) => format!("{} *", inner.spelling()),
        }
    }
}

impl From<Primitive> for FieldType {
    fn from(p: Primitive) -> Self {
        FieldType::Primitive(p)
    }
}

/// `snake_case`, `SCREAMING_CASE` and `mixedCase` spellings to `camelCase`.
pub fn camel_case(spelling: &str) -> String {
    let mut out = String::new();
    for (i, word) in split_words(spelling).iter().enumerate() {
        let lower = word.to_lowercase();
        if i == 0 {
            out.push_str(&lower);
        } else {
            out.push_str(&upper_first(&lower));
        }
    }
    out
}

pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn split_words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_ascii_lowercase() && i > 0 && chars[i - 1].is_ascii_digit() {
            // "x1y" -> "x1" + "y"
            words.push(std::mem::take(&mut current));
        } else if c.is_ascii_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            // "modelName" and the "HTTPServer" -> "HTTP" + "Server" split
            if prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("modelName"), "modelName");
        assert_eq!(camel_case("model_name"), "modelName");
        assert_eq!(camel_case("MY_STRUCT"), "myStruct");
        assert_eq!(camel_case("typeWrapper<int>"), "typeWrapperInt");
        assert_eq!(camel_case("HTTPServer"), "httpServer");
        assert_eq!(camel_case("id"), "id");
        assert_eq!(camel_case("x1y"), "x1Y");
        assert_eq!(camel_case("axle2_front"), "axle2Front");
        assert_eq!(camel_case("int64"), "int64");
    }

    #[test]
    fn test_primitive_schema() {
        assert_eq!(
            Primitive::Int32.to_schema(),
            json!({ "type": "integer", "format": "int32" })
        );
        assert_eq!(Primitive::Bool.to_schema(), json!({ "type": "boolean" }));
        assert_eq!(<f64 as DescribePrimitive>::PRIMITIVE, Primitive::Double);
    }

    #[test]
    fn test_spelling() {
        assert_eq!(
            FieldType::pointer(FieldType::record("car")).spelling(),
            "car *"
        );
        assert_eq!(
            FieldType::array(Primitive::Int32.into()).spelling(),
            "std::vector<int>"
        );
        assert_eq!(FieldType::CharArray(80).spelling(), "char[80]");
        assert_eq!(
            FieldType::fixed_array(Primitive::Int32.into(), 4).spelling(),
            "int[4]"
        );
    }
}
