use crate::decls::{Car, MyRec, MyStruct, TypeWrapper, PAYLOAD_LEN};
use crate::decls::car::MODEL_NAME_LEN;
use crate::schema::types::{DescribePrimitive, FieldType, Primitive};

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub ty: FieldType,
}

impl FieldDescriptor {
    pub fn new(name: &str, ty: impl Into<FieldType>) -> Self {
        Self {
            name: name.to_string(),
            ty: ty.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordDescriptor {
    /// C spelling, without namespace.
    pub name: String,
    pub namespace: Option<String>,
    /// typedef names that refer to this record.
    pub aliases: Vec<String>,
    pub fields: Vec<FieldDescriptor>,
}

impl RecordDescriptor {
    pub fn new(name: &str, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            name: name.to_string(),
            namespace: None,
            aliases: Vec::new(),
            fields,
        }
    }

    pub fn in_namespace(mut self, namespace: &str) -> Self {
        self.namespace = Some(namespace.to_string());
        self
    }

    pub fn with_alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_string());
        self
    }

    pub fn answers_to(&self, name: &str) -> bool {
        self.name == name || self.aliases.iter().any(|a| a == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDescriptor {
    pub name: String,
    /// Enclosing namespace or class, e.g. `myMath` or `myMath::myRec`.
    pub namespace: Option<String>,
    pub args: Vec<FieldDescriptor>,
    /// `None` for `void`.
    pub result: Option<FieldType>,
}

impl FunctionDescriptor {
    pub fn new(name: &str, args: Vec<FieldDescriptor>, result: Option<FieldType>) -> Self {
        Self {
            name: name.to_string(),
            namespace: None,
            args,
            result,
        }
    }

    pub fn in_namespace(mut self, namespace: &str) -> Self {
        self.namespace = Some(namespace.to_string());
        self
    }

    /// The signature without its result type, e.g. `initCar(car *)`.
    pub fn decl(&self) -> String {
        let args: Vec<String> = self.args.iter().map(|a| a.ty.spelling()).collect();
        format!("{}({})", self.qualified_name(), args.join(", "))
    }

    pub fn qualified_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{}::{}", ns, self.name),
            None => self.name.clone(),
        }
    }
}

/// Types that can describe their own C layout.
pub trait Describe {
    fn describe() -> RecordDescriptor;
}

impl<T: DescribePrimitive> Describe for TypeWrapper<T> {
    fn describe() -> RecordDescriptor {
        let name = format!("typeWrapper<{}>", T::PRIMITIVE.spelling());
        RecordDescriptor::new(&name, vec![FieldDescriptor::new("myType", T::PRIMITIVE)])
    }
}

impl Describe for MyStruct {
    fn describe() -> RecordDescriptor {
        RecordDescriptor::new(
            "myStruct",
            vec![
                FieldDescriptor::new("id", Primitive::Int32),
                FieldDescriptor::new("payload", FieldType::CharArray(PAYLOAD_LEN)),
            ],
        )
        .with_alias("MY_STRUCT")
    }
}

impl Describe for MyRec<'_> {
    fn describe() -> RecordDescriptor {
        RecordDescriptor::new(
            "myRec",
            vec![
                FieldDescriptor::new("name", FieldType::CString),
                FieldDescriptor::new("value", Primitive::Int32),
            ],
        )
        .in_namespace("myMath")
    }
}

impl Describe for Car {
    fn describe() -> RecordDescriptor {
        RecordDescriptor::new(
            "car",
            vec![
                FieldDescriptor::new("modelName", FieldType::CharArray(MODEL_NAME_LEN)),
                FieldDescriptor::new("weight", Primitive::Double),
            ],
        )
        .with_alias("CAR_TYPE")
        .with_alias("obfuscatedCar")
    }
}

/// Ordered registry of declared records and functions.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<RecordDescriptor>,
    functions: Vec<FunctionDescriptor>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every declaration this crate exposes, in declaration order.
    pub fn builtin() -> Self {
        let int = || FieldType::Primitive(Primitive::Int32);
        let mut catalog = Self::new();

        catalog.register::<TypeWrapper<i32>>();
        catalog.register_function(FunctionDescriptor::new(
            "twFun",
            vec![FieldDescriptor::new(
                "wrappedInt",
                FieldType::pointer(FieldType::record("typeWrapper<int>")),
            )],
            None,
        ));
        catalog.register_function(FunctionDescriptor::new(
            "vectorFun",
            vec![FieldDescriptor::new("iv", FieldType::pointer(FieldType::array(int())))],
            Some(int()),
        ));

        catalog.register::<MyStruct>();
        catalog.register_function(FunctionDescriptor::new(
            "myPayload",
            vec![FieldDescriptor::new("", FieldType::pointer(FieldType::record("MY_STRUCT")))],
            Some(FieldType::CString),
        ));

        catalog.register_function(
            FunctionDescriptor::new(
                "sum",
                vec![FieldDescriptor::new("", int()), FieldDescriptor::new("", int())],
                Some(int()),
            )
            .in_namespace("myMath"),
        );
        catalog.register::<MyRec<'static>>();
        catalog.register_function(
            FunctionDescriptor::new("doSomethingToThis", vec![], None)
                .in_namespace("myMath::myRec"),
        );
        catalog.register_function(
            FunctionDescriptor::new(
                "initRec",
                vec![FieldDescriptor::new("", FieldType::pointer(FieldType::record("myRec")))],
                Some(int()),
            )
            .in_namespace("myMath"),
        );

        catalog.register::<Car>();
        catalog.register_function(FunctionDescriptor::new(
            "initCar",
            vec![FieldDescriptor::new("", FieldType::pointer(FieldType::record("car")))],
            None,
        ));
        catalog.register_function(FunctionDescriptor::new(
            "doThingToCar",
            vec![FieldDescriptor::new(
                "car",
                FieldType::pointer(FieldType::record("obfuscatedCar")),
            )],
            None,
        ));

        catalog
    }

    pub fn register<T: Describe>(&mut self) -> &mut Self {
        self.register_record(T::describe())
    }

    /// Adds `record`, replacing an earlier one with the same name.
    pub fn register_record(&mut self, record: RecordDescriptor) -> &mut Self {
        self.records.retain(|r| r.name != record.name);
        self.records.push(record);
        self
    }

    pub fn register_function(&mut self, function: FunctionDescriptor) -> &mut Self {
        self.functions.push(function);
        self
    }

    pub fn records(&self) -> &[RecordDescriptor] {
        &self.records
    }

    pub fn functions(&self) -> &[FunctionDescriptor] {
        &self.functions
    }

    /// Finds a record by name, typedef alias, or rendered schema title.
    pub fn find_record(&self, name: &str) -> Option<&RecordDescriptor> {
        self.records.iter().find(|r| r.answers_to(name)).or_else(|| {
            self.records
                .iter()
                .find(|r| crate::schema::title_of(&r.name) == name)
        })
    }
}
