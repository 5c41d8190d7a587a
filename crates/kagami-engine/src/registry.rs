//! Built-in in-memory host model
//!
//! `TypeRegistry` interns primitive, class, and array types, records member
//! declarations per class, and implements both capability traits. It is the
//! fixture the engine tests run against and a reference for embedders
//! wiring their own runtime in.
//!
//! Slot layout follows the single-inheritance object model: a class's
//! declared fields occupy the slots immediately after its ancestors',
//! so a superclass field descriptor addresses the same cell on subclass
//! instances.

use rustc_hash::FxHashMap;
use thiserror::Error;

use kagami_types::{
    ConstructorMember, FieldMember, Instance, ListValue, Member, MemberKind, MethodMember,
    Modifiers, TypeId, TypeModel, Value, ValueModel, Visibility,
};

/// Errors from defining types or creating values in the registry
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RegistryError {
    /// A type with this name already exists
    #[error("Type `{name}` is already defined")]
    DuplicateType {
        /// Conflicting name
        name: String,
    },

    /// Supertype id does not refer to a defined class
    #[error("Unknown supertype {ty} for class `{name}`")]
    UnknownSupertype {
        /// Class being defined
        name: String,
        /// Offending supertype id
        ty: TypeId,
    },

    /// Two declared members of one class share a lookup identity
    #[error("Class `{class}` declares duplicate {kind} `{ident}`")]
    DuplicateMember {
        /// Class being defined
        class: String,
        /// Member kind
        kind: MemberKind,
        /// Conflicting identity
        ident: String,
    },

    /// Instantiation target is not a class
    #[error("{ty} is not an instantiable class type")]
    NotInstantiable {
        /// Offending type id
        ty: TypeId,
    },

    /// List creation target is not an array type
    #[error("{ty} is not an array type")]
    NotArray {
        /// Offending type id
        ty: TypeId,
    },
}

#[derive(Debug, Clone)]
enum TypeDef {
    Primitive { name: String },
    Class(ClassDef),
    Array { element: TypeId },
}

#[derive(Debug, Clone)]
struct ClassDef {
    name: String,
    supertype: Option<TypeId>,
    /// Slots occupied by inherited fields; this class's fields follow
    inherited_slots: usize,
    fields: Vec<FieldMember>,
    methods: Vec<MethodMember>,
    constructors: Vec<ConstructorMember>,
}

impl ClassDef {
    fn slot_count(&self) -> usize {
        self.inherited_slots + self.fields.len()
    }
}

/// In-memory type registry implementing the host-model capabilities.
///
/// Primitives (`null`, `bool`, `int`, `float`, `str`) are interned at
/// construction; classes and array types are added afterwards. Lookups by
/// name and by element type are backed by hash maps, definitions by a
/// dense id-indexed table.
#[derive(Debug)]
pub struct TypeRegistry {
    types: Vec<TypeDef>,
    names: FxHashMap<String, TypeId>,
    /// Element type to interned array type
    arrays: FxHashMap<TypeId, TypeId>,
    null_ty: TypeId,
    bool_ty: TypeId,
    int_ty: TypeId,
    float_ty: TypeId,
    str_ty: TypeId,
}

impl TypeRegistry {
    /// Create a registry with the primitive types interned
    pub fn new() -> Self {
        let mut types = Vec::new();
        let mut names = FxHashMap::default();
        let mut primitive = |name: &str| {
            let id = TypeId::new(types.len() as u32);
            types.push(TypeDef::Primitive {
                name: name.to_string(),
            });
            names.insert(name.to_string(), id);
            id
        };
        let null_ty = primitive("null");
        let bool_ty = primitive("bool");
        let int_ty = primitive("int");
        let float_ty = primitive("float");
        let str_ty = primitive("str");
        TypeRegistry {
            types,
            names,
            arrays: FxHashMap::default(),
            null_ty,
            bool_ty,
            int_ty,
            float_ty,
            str_ty,
        }
    }

    /// The `null` type
    pub fn null_type(&self) -> TypeId {
        self.null_ty
    }

    /// The `bool` type
    pub fn bool_type(&self) -> TypeId {
        self.bool_ty
    }

    /// The `int` type
    pub fn int_type(&self) -> TypeId {
        self.int_ty
    }

    /// The `float` type
    pub fn float_type(&self) -> TypeId {
        self.float_ty
    }

    /// The `str` type
    pub fn string_type(&self) -> TypeId {
        self.str_ty
    }

    /// Intern the array type with the given element type
    pub fn array_type(&mut self, element: TypeId) -> TypeId {
        if let Some(&existing) = self.arrays.get(&element) {
            return existing;
        }
        let id = TypeId::new(self.types.len() as u32);
        self.types.push(TypeDef::Array { element });
        self.arrays.insert(element, id);
        id
    }

    /// Look up a type by name
    pub fn type_by_name(&self, name: &str) -> Option<TypeId> {
        self.names.get(name).copied()
    }

    /// Number of registered types, primitives included
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Define a class from its spec.
    ///
    /// Validates the supertype, assigns field slots after the inherited
    /// layout, and rejects duplicate lookup identities within the declared
    /// set, which upholds the uniqueness guarantee resolution relies on.
    pub fn define_class(&mut self, spec: ClassSpec) -> Result<TypeId, RegistryError> {
        if self.names.contains_key(&spec.name) {
            return Err(RegistryError::DuplicateType { name: spec.name });
        }
        let inherited_slots = match spec.supertype {
            Some(sup) => match self.def(sup) {
                Some(TypeDef::Class(parent)) => parent.slot_count(),
                _ => {
                    return Err(RegistryError::UnknownSupertype {
                        name: spec.name,
                        ty: sup,
                    })
                }
            },
            None => 0,
        };
        let id = TypeId::new(self.types.len() as u32);

        let mut fields: Vec<FieldMember> = Vec::with_capacity(spec.fields.len());
        for (index, field) in spec.fields.into_iter().enumerate() {
            if fields.iter().any(|existing| existing.name == field.name) {
                return Err(RegistryError::DuplicateMember {
                    class: spec.name,
                    kind: MemberKind::Field,
                    ident: field.name,
                });
            }
            fields.push(FieldMember {
                name: field.name,
                owner: id,
                value_type: field.value_type,
                slot: inherited_slots + index,
                modifiers: field.modifiers,
                visibility: Visibility::Declared,
            });
        }

        let mut methods: Vec<MethodMember> = Vec::with_capacity(spec.methods.len());
        for method in spec.methods {
            if methods
                .iter()
                .any(|existing| existing.name == method.name && existing.params == method.params)
            {
                return Err(RegistryError::DuplicateMember {
                    class: spec.name,
                    kind: MemberKind::Method,
                    ident: self.signature(&method.name, &method.params),
                });
            }
            methods.push(MethodMember {
                name: method.name,
                owner: id,
                params: method.params,
                modifiers: method.modifiers,
                visibility: Visibility::Declared,
            });
        }

        let mut constructors: Vec<ConstructorMember> = Vec::with_capacity(spec.constructors.len());
        for ctor in spec.constructors {
            if constructors
                .iter()
                .any(|existing| existing.params == ctor.params)
            {
                return Err(RegistryError::DuplicateMember {
                    class: spec.name,
                    kind: MemberKind::Constructor,
                    ident: self.signature("constructor", &ctor.params),
                });
            }
            constructors.push(ConstructorMember {
                owner: id,
                params: ctor.params,
                modifiers: ctor.modifiers,
                visibility: Visibility::Declared,
            });
        }

        self.names.insert(spec.name.clone(), id);
        self.types.push(TypeDef::Class(ClassDef {
            name: spec.name,
            supertype: spec.supertype,
            inherited_slots,
            fields,
            methods,
            constructors,
        }));
        Ok(id)
    }

    /// Create an instance of a class with every slot set to `Value::Null`
    pub fn instantiate(&self, ty: TypeId) -> Result<Instance, RegistryError> {
        match self.def(ty) {
            Some(TypeDef::Class(class)) => Ok(Instance::new(ty, class.slot_count())),
            _ => Err(RegistryError::NotInstantiable { ty }),
        }
    }

    /// Create a list value of the given array type.
    ///
    /// Items are not checked against the element type; the accessor checks
    /// assignability when a list is stored into a field.
    pub fn new_list(&self, ty: TypeId, items: Vec<Value>) -> Result<Value, RegistryError> {
        match self.def(ty) {
            Some(TypeDef::Array { .. }) => Ok(Value::List(ListValue { ty, items })),
            _ => Err(RegistryError::NotArray { ty }),
        }
    }

    fn def(&self, ty: TypeId) -> Option<&TypeDef> {
        self.types.get(ty.raw() as usize)
    }

    // define_class only accepts supertypes that already exist, so registry
    // chains cannot cycle.
    fn is_subclass(&self, sub: TypeId, sup: TypeId) -> bool {
        if sub == sup {
            return true;
        }
        let mut current = sub;
        while let Some(parent) = self.direct_supertype(current) {
            if parent == sup {
                return true;
            }
            current = parent;
        }
        false
    }

    fn signature(&self, name: &str, params: &[TypeId]) -> String {
        let mut out = String::from(name);
        out.push('(');
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            match self.type_name(*param) {
                Some(param_name) => out.push_str(&param_name),
                None => out.push_str(&param.to_string()),
            }
        }
        out.push(')');
        out
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        TypeRegistry::new()
    }
}

impl TypeModel for TypeRegistry {
    fn direct_supertype(&self, ty: TypeId) -> Option<TypeId> {
        match self.def(ty)? {
            TypeDef::Class(class) => class.supertype,
            _ => None,
        }
    }

    fn declared_members(&self, ty: TypeId, kind: MemberKind) -> Vec<Member> {
        match self.def(ty) {
            Some(TypeDef::Class(class)) => match kind {
                MemberKind::Field => class.fields.iter().cloned().map(Member::Field).collect(),
                MemberKind::Method => class.methods.iter().cloned().map(Member::Method).collect(),
                MemberKind::Constructor => class
                    .constructors
                    .iter()
                    .cloned()
                    .map(Member::Constructor)
                    .collect(),
            },
            _ => Vec::new(),
        }
    }

    fn is_publicly_visible(&self, member: &Member) -> bool {
        member.modifiers().is_public
    }

    fn element_type(&self, ty: TypeId) -> Option<TypeId> {
        match self.def(ty)? {
            TypeDef::Array { element } => Some(*element),
            _ => None,
        }
    }

    fn type_name(&self, ty: TypeId) -> Option<String> {
        match self.def(ty)? {
            TypeDef::Primitive { name } => Some(name.clone()),
            TypeDef::Class(class) => Some(class.name.clone()),
            TypeDef::Array { element } => Some(format!("{}[]", self.type_name(*element)?)),
        }
    }
}

impl ValueModel for TypeRegistry {
    fn type_of(&self, value: &Value) -> TypeId {
        match value {
            Value::Null => self.null_ty,
            Value::Bool(_) => self.bool_ty,
            Value::Int(_) => self.int_ty,
            Value::Float(_) => self.float_ty,
            Value::Str(_) => self.str_ty,
            Value::Object(instance) => instance.ty,
            Value::List(list) => list.ty,
        }
    }

    fn is_assignable(&self, target: TypeId, source: TypeId) -> bool {
        if target == source {
            return true;
        }
        if source == self.null_ty {
            // null is assignable to class and array types
            return matches!(
                self.def(target),
                Some(TypeDef::Class(_)) | Some(TypeDef::Array { .. })
            );
        }
        match (self.def(source), self.def(target)) {
            (Some(TypeDef::Class(_)), Some(TypeDef::Class(_))) => {
                self.is_subclass(source, target)
            }
            // Arrays are covariant in their element type
            (
                Some(TypeDef::Array { element: src }),
                Some(TypeDef::Array { element: dst }),
            ) => self.is_assignable(*dst, *src),
            _ => false,
        }
    }
}

/// Fluent description of a class to define.
///
/// Members are recorded in the order the builder adds them; that order
/// is the declaration order enumeration preserves.
#[derive(Debug, Clone)]
pub struct ClassSpec {
    name: String,
    supertype: Option<TypeId>,
    fields: Vec<FieldSpec>,
    methods: Vec<MethodSpec>,
    constructors: Vec<ConstructorSpec>,
}

#[derive(Debug, Clone)]
struct FieldSpec {
    name: String,
    value_type: TypeId,
    modifiers: Modifiers,
}

#[derive(Debug, Clone)]
struct MethodSpec {
    name: String,
    params: Vec<TypeId>,
    modifiers: Modifiers,
}

#[derive(Debug, Clone)]
struct ConstructorSpec {
    params: Vec<TypeId>,
    modifiers: Modifiers,
}

impl ClassSpec {
    /// Start a class description
    pub fn new(name: impl Into<String>) -> Self {
        ClassSpec {
            name: name.into(),
            supertype: None,
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
        }
    }

    /// Set the direct supertype
    pub fn extends(mut self, supertype: TypeId) -> Self {
        self.supertype = Some(supertype);
        self
    }

    /// Add a public field
    pub fn field(mut self, name: impl Into<String>, value_type: TypeId) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            value_type,
            modifiers: Modifiers::public(),
        });
        self
    }

    /// Add a non-public field
    pub fn private_field(mut self, name: impl Into<String>, value_type: TypeId) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            value_type,
            modifiers: Modifiers::default(),
        });
        self
    }

    /// Add a public readonly field
    pub fn readonly_field(mut self, name: impl Into<String>, value_type: TypeId) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            value_type,
            modifiers: Modifiers::public().as_readonly(),
        });
        self
    }

    /// Add a public method with an exact parameter signature
    pub fn method(mut self, name: impl Into<String>, params: &[TypeId]) -> Self {
        self.methods.push(MethodSpec {
            name: name.into(),
            params: params.to_vec(),
            modifiers: Modifiers::public(),
        });
        self
    }

    /// Add a non-public method
    pub fn private_method(mut self, name: impl Into<String>, params: &[TypeId]) -> Self {
        self.methods.push(MethodSpec {
            name: name.into(),
            params: params.to_vec(),
            modifiers: Modifiers::default(),
        });
        self
    }

    /// Add a public constructor with an exact parameter signature
    pub fn constructor(mut self, params: &[TypeId]) -> Self {
        self.constructors.push(ConstructorSpec {
            params: params.to_vec(),
            modifiers: Modifiers::public(),
        });
        self
    }

    /// Add a non-public constructor
    pub fn private_constructor(mut self, params: &[TypeId]) -> Self {
        self.constructors.push(ConstructorSpec {
            params: params.to_vec(),
            modifiers: Modifiers::default(),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitives_are_interned_once() {
        let registry = TypeRegistry::new();
        assert_eq!(registry.type_by_name("int"), Some(registry.int_type()));
        assert_eq!(registry.type_by_name("str"), Some(registry.string_type()));
        assert_ne!(registry.int_type(), registry.float_type());
        assert_eq!(registry.type_count(), 5);
    }

    #[test]
    fn test_define_class_and_lookup() {
        let mut registry = TypeRegistry::new();
        let int = registry.int_type();
        let point = registry
            .define_class(ClassSpec::new("Point").field("x", int).field("y", int))
            .unwrap();

        assert_eq!(registry.type_by_name("Point"), Some(point));
        assert_eq!(registry.type_name(point).as_deref(), Some("Point"));
        assert!(registry.direct_supertype(point).is_none());

        let fields = registry.declared_members(point, MemberKind::Field);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name(), "x");
        assert_eq!(fields[1].name(), "y");
    }

    #[test]
    fn test_subclass_fields_extend_parent_layout() {
        let mut registry = TypeRegistry::new();
        let int = registry.int_type();
        let animal = registry
            .define_class(ClassSpec::new("Animal").field("age", int))
            .unwrap();
        let dog = registry
            .define_class(ClassSpec::new("Dog").extends(animal).field("bones", int))
            .unwrap();

        let age = registry.declared_members(animal, MemberKind::Field);
        let bones = registry.declared_members(dog, MemberKind::Field);
        assert_eq!(age[0].as_field().unwrap().slot, 0);
        assert_eq!(bones[0].as_field().unwrap().slot, 1);

        let instance = registry.instantiate(dog).unwrap();
        assert_eq!(instance.slot_count(), 2);
    }

    #[test]
    fn test_duplicate_definitions_are_rejected() {
        let mut registry = TypeRegistry::new();
        let int = registry.int_type();

        registry.define_class(ClassSpec::new("Point")).unwrap();
        let err = registry
            .define_class(ClassSpec::new("Point"))
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateType {
                name: "Point".to_string(),
            }
        );

        let err = registry
            .define_class(ClassSpec::new("Bad").field("x", int).field("x", int))
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::DuplicateMember {
                kind: MemberKind::Field,
                ..
            }
        ));

        // Same method name with a different signature is an overload, not
        // a duplicate
        assert!(registry
            .define_class(
                ClassSpec::new("Calc")
                    .method("add", &[int])
                    .method("add", &[int, int])
            )
            .is_ok());
        let err = registry
            .define_class(
                ClassSpec::new("Calc2")
                    .method("add", &[int])
                    .method("add", &[int])
            )
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateMember {
                class: "Calc2".to_string(),
                kind: MemberKind::Method,
                ident: "add(int)".to_string(),
            }
        );
    }

    #[test]
    fn test_unknown_supertype_is_rejected() {
        let mut registry = TypeRegistry::new();
        let int = registry.int_type();

        // Primitives cannot be extended
        let err = registry
            .define_class(ClassSpec::new("Weird").extends(int))
            .unwrap_err();
        assert!(matches!(err, RegistryError::UnknownSupertype { .. }));

        let err = registry
            .define_class(ClassSpec::new("Orphan").extends(TypeId::new(99)))
            .unwrap_err();
        assert!(matches!(err, RegistryError::UnknownSupertype { .. }));
    }

    #[test]
    fn test_instantiate_rejects_non_classes() {
        let mut registry = TypeRegistry::new();
        let int = registry.int_type();
        let ints = registry.array_type(int);

        assert!(matches!(
            registry.instantiate(int),
            Err(RegistryError::NotInstantiable { .. })
        ));
        assert!(matches!(
            registry.instantiate(ints),
            Err(RegistryError::NotInstantiable { .. })
        ));
    }

    #[test]
    fn test_array_types_are_interned() {
        let mut registry = TypeRegistry::new();
        let int = registry.int_type();
        let first = registry.array_type(int);
        let second = registry.array_type(int);
        assert_eq!(first, second);
        assert_eq!(registry.element_type(first), Some(int));
        assert_eq!(registry.type_name(first).as_deref(), Some("int[]"));

        let nested = registry.array_type(first);
        assert_eq!(registry.type_name(nested).as_deref(), Some("int[][]"));
    }

    #[test]
    fn test_assignability_rules() {
        let mut registry = TypeRegistry::new();
        let int = registry.int_type();
        let float = registry.float_type();
        let null = registry.null_type();
        let animal = registry.define_class(ClassSpec::new("Animal")).unwrap();
        let dog = registry
            .define_class(ClassSpec::new("Dog").extends(animal))
            .unwrap();
        let animals = registry.array_type(animal);
        let dogs = registry.array_type(dog);

        // Reflexive
        assert!(registry.is_assignable(int, int));
        // No primitive coercions
        assert!(!registry.is_assignable(float, int));
        // Nominal subclassing, one direction
        assert!(registry.is_assignable(animal, dog));
        assert!(!registry.is_assignable(dog, animal));
        // Null into reference types only
        assert!(registry.is_assignable(animal, null));
        assert!(registry.is_assignable(dogs, null));
        assert!(!registry.is_assignable(int, null));
        // Array covariance
        assert!(registry.is_assignable(animals, dogs));
        assert!(!registry.is_assignable(dogs, animals));
    }

    #[test]
    fn test_type_of_values() {
        let mut registry = TypeRegistry::new();
        let int = registry.int_type();
        let ints = registry.array_type(int);
        let point = registry.define_class(ClassSpec::new("Point")).unwrap();

        assert_eq!(registry.type_of(&Value::Null), registry.null_type());
        assert_eq!(registry.type_of(&Value::Int(1)), int);

        let instance = Value::Object(Box::new(registry.instantiate(point).unwrap()));
        assert_eq!(registry.type_of(&instance), point);

        let list = registry
            .new_list(ints, vec![Value::Int(1), Value::Int(2)])
            .unwrap();
        assert_eq!(registry.type_of(&list), ints);

        assert!(matches!(
            registry.new_list(point, Vec::new()),
            Err(RegistryError::NotArray { .. })
        ));
    }

    #[test]
    fn test_visibility_flags_reach_the_trait() {
        let mut registry = TypeRegistry::new();
        let int = registry.int_type();
        let secretive = registry
            .define_class(
                ClassSpec::new("Secretive")
                    .field("shown", int)
                    .private_field("hidden", int)
                    .private_method("peek", &[])
                    .private_constructor(&[]),
            )
            .unwrap();

        let fields = registry.declared_members(secretive, MemberKind::Field);
        assert!(registry.is_publicly_visible(&fields[0]));
        assert!(!registry.is_publicly_visible(&fields[1]));

        let methods = registry.declared_members(secretive, MemberKind::Method);
        assert!(!registry.is_publicly_visible(&methods[0]));

        let ctors = registry.declared_members(secretive, MemberKind::Constructor);
        assert!(!registry.is_publicly_visible(&ctors[0]));
    }
}
