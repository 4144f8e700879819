//! Pure walkers over [`TypeRef`] chains: unwrap LIST/NON_NULL wrappers to the
//! named leaf and render the chain back into GraphQL type syntax.

use crate::{SchemaError, TypeKind, TypeRef};

impl TypeKind {
    /// A leaf kind that can be selected without a sub-selection.
    pub fn is_scalar_like(self) -> bool {
        matches!(self, TypeKind::Scalar | TypeKind::Enum)
    }

    pub fn is_wrapper(self) -> bool {
        matches!(self, TypeKind::List | TypeKind::NonNull)
    }
}

impl TypeRef {
    /// Follows `of_type` through wrapper kinds and returns the named leaf
    /// node. A wrapper missing its inner type is a contract violation of the
    /// introspection result.
    pub fn leaf(&self) -> Result<&TypeRef, SchemaError> {
        let mut current = self;
        while current.kind.is_wrapper() {
            current = current.of_type.as_deref().ok_or_else(|| {
                SchemaError::SchemaIntegrity(format!(
                    "{:?} wrapper has no inner type",
                    current.kind
                ))
            })?;
        }
        Ok(current)
    }

    /// The name of the leaf type at the end of the wrapper chain.
    pub fn named_type(&self) -> Result<&str, SchemaError> {
        let leaf = self.leaf()?;
        leaf.name.as_deref().ok_or_else(|| {
            SchemaError::SchemaIntegrity(format!("{:?} type reference has no name", leaf.kind))
        })
    }

    /// Reconstructs GraphQL type syntax: `Name`, `[Name]`, `Name!`, `[Name!]!`, …
    pub fn render(&self) -> String {
        match self.kind {
            TypeKind::NonNull => match &self.of_type {
                Some(inner) => format!("{}!", inner.render()),
                None => "!".to_owned(),
            },
            TypeKind::List => match &self.of_type {
                Some(inner) => format!("[{}]", inner.render()),
                None => "[]".to_owned(),
            },
            _ => self.name.clone().unwrap_or_default(),
        }
    }
}
