//! Value and instance containers for dynamic field access

use crate::ty::TypeId;

/// Dynamically typed value stored in instance slots.
///
/// Values are plain containers: storing an object in a field stores that
/// value, not an alias of it. Mutation happens only through a `&mut`
/// [`Instance`] handed in by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value; the initial content of every slot
    Null,
    /// Boolean value
    Bool(bool),
    /// 64-bit integer value
    Int(i64),
    /// 64-bit float value
    Float(f64),
    /// String value
    Str(String),
    /// Object instance value
    Object(Box<Instance>),
    /// Typed list value
    List(ListValue),
}

impl Value {
    /// Check if this is the null value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get as boolean if this is a bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as integer if this is an int
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as float if this is a float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get as string slice if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Get the instance if this is an object
    pub fn as_object(&self) -> Option<&Instance> {
        match self {
            Value::Object(instance) => Some(instance),
            _ => None,
        }
    }

    /// Get the list if this is a list
    pub fn as_list(&self) -> Option<&ListValue> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

/// Object instance: a type handle plus linear slot storage.
///
/// Slot indices are assigned at class-definition time by the host model; a
/// subclass's declared fields follow its ancestors' slots.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    /// Runtime type of this instance
    pub ty: TypeId,
    /// Field storage, addressed by slot index
    pub slots: Vec<Value>,
}

impl Instance {
    /// Create an instance with every slot set to `Value::Null`
    pub fn new(ty: TypeId, slot_count: usize) -> Self {
        Instance {
            ty,
            slots: vec![Value::Null; slot_count],
        }
    }

    /// Get a slot's value by index
    pub fn slot(&self, index: usize) -> Option<&Value> {
        self.slots.get(index)
    }

    /// Get mutable access to a slot by index
    pub fn slot_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.slots.get_mut(index)
    }

    /// Number of slots
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

/// List of values carrying its interned array type.
///
/// Holding the array [`TypeId`] itself (rather than the element type) keeps
/// value typing a plain field read.
#[derive(Debug, Clone, PartialEq)]
pub struct ListValue {
    /// Interned array type of this list
    pub ty: TypeId,
    /// Element values
    pub items: Vec<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_starts_null() {
        let instance = Instance::new(TypeId::new(1), 3);
        assert_eq!(instance.slot_count(), 3);
        for index in 0..3 {
            assert!(instance.slot(index).map(Value::is_null).unwrap_or(false));
        }
        assert!(instance.slot(3).is_none());
    }

    #[test]
    fn test_slot_mut_writes_through() {
        let mut instance = Instance::new(TypeId::new(1), 2);
        *instance.slot_mut(1).unwrap() = Value::Int(7);
        assert_eq!(instance.slot(1), Some(&Value::Int(7)));
        assert_eq!(instance.slot(0), Some(&Value::Null));
        assert!(instance.slot_mut(5).is_none());
    }

    #[test]
    fn test_value_accessors() {
        assert!(Value::Null.is_null());
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Int(42).as_int(), Some(42));
        assert_eq!(Value::Float(2.5).as_float(), Some(2.5));
        assert_eq!(Value::Str("hi".to_string()).as_str(), Some("hi"));
        assert!(Value::Int(42).as_bool().is_none());
        assert!(Value::default().is_null());
    }

    #[test]
    fn test_object_value_is_by_value() {
        let inner = Instance::new(TypeId::new(2), 1);
        let value = Value::Object(Box::new(inner.clone()));
        let copy = value.clone();
        assert_eq!(value, copy);
        assert_eq!(copy.as_object(), Some(&inner));
    }
}
