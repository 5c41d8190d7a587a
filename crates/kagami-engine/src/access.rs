//! Dynamic field access on instances

use kagami_types::{
    AccessError, FieldMember, Instance, MemberKind, ResolveError, TraversalPolicy, TypeId,
    TypeModel, Value, ValueModel,
};

use crate::resolver::MemberResolver;

/// Reads and writes instance fields through resolved descriptors.
///
/// The accessor holds no per-instance state and imposes no synchronization;
/// mutation flows through the `&mut Instance` the caller supplies. Callers
/// sharing instances across threads serialize their own writes.
pub struct InstanceAccessor<'m, M> {
    model: &'m M,
}

impl<'m, M: TypeModel + ValueModel> InstanceAccessor<'m, M> {
    /// Create an accessor over `model`
    pub fn new(model: &'m M) -> Self {
        InstanceAccessor { model }
    }

    /// Read the field's value from `instance`.
    ///
    /// Fails with `TypeMismatch` when the instance's type is not assignable
    /// to the field's owner (a foreign descriptor), and with `Unreadable`
    /// when the instance's storage has no cell at the field's slot.
    pub fn get(&self, instance: &Instance, field: &FieldMember) -> Result<Value, AccessError> {
        self.check_owner(instance, field)?;
        match instance.slot(field.slot) {
            Some(value) => Ok(value.clone()),
            None => Err(AccessError::Unreadable {
                field: field.name.clone(),
            }),
        }
    }

    /// Write `value` into the field on `instance`.
    ///
    /// Checks owner assignability, then value assignability against the
    /// field's declared type, then mutability. A readonly field or a
    /// missing storage cell is `Denied`. On any failure the instance is
    /// left unchanged.
    pub fn set(
        &self,
        instance: &mut Instance,
        field: &FieldMember,
        value: Value,
    ) -> Result<(), AccessError> {
        self.check_owner(instance, field)?;
        let got = self.model.type_of(&value);
        if !self.model.is_assignable(field.value_type, got) {
            return Err(AccessError::TypeMismatch {
                expected: self.describe(field.value_type),
                got: self.describe(got),
            });
        }
        if field.modifiers.is_readonly {
            return Err(AccessError::Denied {
                field: field.name.clone(),
            });
        }
        match instance.slot_mut(field.slot) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(AccessError::Denied {
                field: field.name.clone(),
            }),
        }
    }

    /// Read a field by name under the default walk: declared visibility,
    /// ancestors included, full depth, leaf to root.
    ///
    /// Collapses an unreadable or foreign descriptor into `NotFound`; at
    /// this convenience layer the instance simply has no such field.
    /// [`InstanceAccessor::get`] keeps the failure modes distinct.
    pub fn get_by_name(&self, instance: &Instance, name: &str) -> Result<Value, ResolveError> {
        let resolver = MemberResolver::new(self.model);
        let resolved = resolver.resolve_field(instance.ty, name, TraversalPolicy::default())?;
        if let Some(field) = resolved.member.as_field() {
            if let Ok(value) = self.get(instance, field) {
                return Ok(value);
            }
        }
        Err(ResolveError::NotFound {
            kind: MemberKind::Field,
            ident: name.to_string(),
            ty: instance.ty,
        })
    }

    /// Whether the field's value type is an array whose element type is
    /// assignable to `element`.
    pub fn is_array_of(&self, field: &FieldMember, element: TypeId) -> bool {
        match self.model.element_type(field.value_type) {
            Some(elem) => self.model.is_assignable(element, elem),
            None => false,
        }
    }

    fn check_owner(&self, instance: &Instance, field: &FieldMember) -> Result<(), AccessError> {
        if self.model.is_assignable(field.owner, instance.ty) {
            return Ok(());
        }
        Err(AccessError::TypeMismatch {
            expected: self.describe(field.owner),
            got: self.describe(instance.ty),
        })
    }

    fn describe(&self, ty: TypeId) -> String {
        self.model.type_name(ty).unwrap_or_else(|| ty.to_string())
    }
}
