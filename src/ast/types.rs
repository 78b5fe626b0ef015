use std::fmt::Display;

/// Type names recognised without any declaration lookup.
pub const BUILTIN_TYPES: [&str; 4] = ["int", "float", "string", "bool"];

pub fn is_builtin_type(name: &str) -> bool {
    BUILTIN_TYPES.contains(&name)
}

/// Type information attached to type-reference nodes.
///
/// Builtin-ness is purely name-based; user type names are not validated
/// against declared types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeInfo {
    pub name: String,
    pub is_builtin: bool,
    pub is_generic: bool,
    pub generic_params: Vec<TypeInfo>,
}

impl TypeInfo {
    pub fn named(name: &str) -> Self {
        TypeInfo {
            name: name.to_string(),
            is_builtin: is_builtin_type(name),
            is_generic: false,
            generic_params: vec![],
        }
    }

    pub fn with_generic_params(mut self, params: Vec<TypeInfo>) -> Self {
        self.is_generic = !params.is_empty();
        self.generic_params = params;
        self
    }

    /// True for the default value carried by nodes that are not type references.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}

impl Display for TypeInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        if self.is_generic {
            write!(f, "<")?;
            for (i, param) in self.generic_params.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", param)?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}
