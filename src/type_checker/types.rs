use std::fmt::Write;

use crate::MK_ID;

MK_ID!(TypeId, "Index of a slot in the [`TypeArena`].");

impl TypeId {
    pub const VOID: TypeId = TypeId::new(0);
    pub const TYPE: TypeId = TypeId::new(1);
    pub const BOOL: TypeId = TypeId::new(2);
    pub const CHAR: TypeId = TypeId::new(3);
    pub const INTEGER: TypeId = TypeId::new(4);
    pub const FLOAT: TypeId = TypeId::new(5);
    pub const STRING: TypeId = TypeId::new(6);
}

/// Compile-time type values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Void,
    /// The type of types.
    Type,
    Bool,
    Char,
    Integer,
    Float,
    String,
    Array { inner: TypeId, length: u64 },
    /// Not known yet; may later be linked to another type.
    Placeholder,
}

/// Discriminant of a [`Type`], used to compare types without their payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Void,
    Type,
    Bool,
    Char,
    Integer,
    Float,
    String,
    Array,
    Placeholder,
}

impl Type {
    pub fn kind(&self) -> TypeKind {
        match self {
            Type::Void => TypeKind::Void,
            Type::Type => TypeKind::Type,
            Type::Bool => TypeKind::Bool,
            Type::Char => TypeKind::Char,
            Type::Integer => TypeKind::Integer,
            Type::Float => TypeKind::Float,
            Type::String => TypeKind::String,
            Type::Array { .. } => TypeKind::Array,
            Type::Placeholder => TypeKind::Placeholder,
        }
    }
}

#[derive(Debug, Clone)]
enum Slot {
    Type(Type),
    /// A resolved placeholder; the real type lives in the target slot.
    Forward(TypeId),
}

/// Owns every type created while resolving one file.
///
/// Placeholders are unified by turning their slot into a forward link, so
/// every node holding the placeholder's id observes the resolution.
#[derive(Debug, Clone)]
pub struct TypeArena {
    slots: Vec<Slot>,
}

impl Default for TypeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeArena {
    pub fn new() -> Self {
        let builtins = [
            Type::Void,
            Type::Type,
            Type::Bool,
            Type::Char,
            Type::Integer,
            Type::Float,
            Type::String,
        ];

        TypeArena {
            slots: builtins.into_iter().map(Slot::Type).collect(),
        }
    }

    pub fn insert(&mut self, ty: Type) -> TypeId {
        self.slots.push(Slot::Type(ty));
        TypeId::new(self.slots.len() - 1)
    }

    pub fn placeholder(&mut self) -> TypeId {
        self.insert(Type::Placeholder)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Follows forward links to the slot holding the actual type.
    pub fn find(&self, mut id: TypeId) -> TypeId {
        while let Slot::Forward(target) = &self.slots[id.index()] {
            id = *target;
        }
        id
    }

    pub fn get(&self, mut id: TypeId) -> &Type {
        loop {
            match &self.slots[id.index()] {
                Slot::Type(ty) => return ty,
                Slot::Forward(target) => id = *target,
            }
        }
    }

    pub fn kind(&self, id: TypeId) -> TypeKind {
        self.get(id).kind()
    }

    pub fn is_placeholder(&self, id: TypeId) -> bool {
        self.kind(id) == TypeKind::Placeholder
    }

    pub fn is_resolved(&self, id: TypeId) -> bool {
        match self.get(id) {
            Type::Placeholder => false,
            Type::Array { inner, .. } => self.is_resolved(*inner),
            _ => true,
        }
    }

    /// Size of a value of this type in bytes.
    pub fn size(&self, id: TypeId) -> u64 {
        match self.get(id) {
            Type::Void | Type::Placeholder => 0,
            Type::Type => 8,
            Type::Bool => 1,
            Type::Char => 4,
            Type::Integer | Type::Float => 8,
            Type::String => 16,
            Type::Array { inner, length } => self.size(*inner) * length,
        }
    }

    /// Links the placeholder `placeholder` to `with`.
    ///
    /// Returns false, changing nothing, when `placeholder` is not an
    /// unresolved placeholder.
    pub fn resolve_placeholder(&mut self, placeholder: TypeId, with: TypeId) -> bool {
        let from = self.find(placeholder);
        let to = self.find(with);

        if !matches!(self.slots[from.index()], Slot::Type(Type::Placeholder)) {
            return false;
        }

        if from != to {
            self.slots[from.index()] = Slot::Forward(to);
        }
        true
    }

    /// Structural equality. Two distinct placeholders are never equal.
    pub fn equal(&self, a: TypeId, b: TypeId) -> bool {
        let (a, b) = (self.find(a), self.find(b));
        if a == b {
            return true;
        }

        match (self.get(a), self.get(b)) {
            (
                Type::Array {
                    inner: inner_a,
                    length: length_a,
                },
                Type::Array {
                    inner: inner_b,
                    length: length_b,
                },
            ) => length_a == length_b && self.equal(*inner_a, *inner_b),
            (Type::Placeholder, _) | (_, Type::Placeholder) => false,
            (left, right) => left == right,
        }
    }

    pub fn display(&self, id: TypeId) -> String {
        let mut out = String::new();
        self.write_type(&mut out, id);
        out
    }

    fn write_type(&self, out: &mut String, id: TypeId) {
        let _ = match self.get(id) {
            Type::Void => write!(out, "void"),
            Type::Type => write!(out, "type"),
            Type::Bool => write!(out, "bool"),
            Type::Char => write!(out, "char"),
            Type::Integer => write!(out, "int"),
            Type::Float => write!(out, "float"),
            Type::String => write!(out, "string"),
            Type::Placeholder => write!(out, "_"),
            Type::Array { inner, length } => {
                out.push_str("__builtin_array[");
                self.write_type(out, *inner);
                write!(out, ", {}]", length)
            }
        };
    }
}
