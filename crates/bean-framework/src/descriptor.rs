//! # Field Descriptors
//!
//! Each [`Bean`] describes its fields once through a [`Fields`] table. An entry
//! records the field's identifier, its directive and a typed accessor that only
//! ever touches the record's own fields:
//!
//! - **plain** fields carry no directive and keep their zero value,
//! - **literal** fields are parsed from a raw string into a [`Scalar`],
//! - **reference** fields receive another bean, named by a [`Dependency`] rule.
//!
//! The table is the only thing the populator knows about a record. It replaces
//! runtime inspection of the record's shape.

use crate::bean::{Bean, BeanHandle, Injectable};
use crate::error::{ContainerError, LiteralError};
use crate::naming;
use serde::{Deserialize, Serialize};
use std::any::type_name;
use std::collections::HashSet;
use std::fmt;

/// How a reference field names the bean it depends on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dependency {
    /// An explicit bean name.
    Named(String),
    /// Derive the name from the field's declared type.
    ByFieldType,
    /// Derive the name from the referenced record's own type.
    ByTargetType,
}

impl Dependency {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Computes the bean name this rule points at.
    pub fn target_name(&self, declared_type: &str, target_type: &str) -> String {
        match self {
            Self::Named(name) => name.clone(),
            Self::ByFieldType => naming::derive_slot(declared_type),
            Self::ByTargetType => naming::derive(target_type),
        }
    }
}

/// A per-field directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Directive {
    /// A raw textual value for a scalar field.
    Literal(String),
    /// A structural dependency on another bean.
    Reference(Dependency),
}

/// A serializable view of one descriptor entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
    pub name: &'static str,
    pub declared_type: &'static str,
    /// The referenced record type, for reference fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_type: Option<&'static str>,
    /// `None` for fields the populator leaves at their zero value.
    pub directive: Option<Directive>,
}

/// A scalar field type that literal directives can be parsed into.
///
/// Parsing follows the type's standard [`FromStr`](std::str::FromStr) grammar.
pub trait Scalar: Sized + Send + Sync + 'static {
    fn parse_literal(raw: &str) -> Result<Self, LiteralError>;
}

macro_rules! impl_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Scalar for $ty {
                fn parse_literal(raw: &str) -> Result<Self, LiteralError> {
                    raw.parse::<$ty>()
                        .map_err(|e| LiteralError::new(raw, stringify!($ty), e))
                }
            }
        )*
    };
}

impl_scalar!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char,
);

impl Scalar for String {
    fn parse_literal(raw: &str) -> Result<Self, LiteralError> {
        Ok(raw.to_owned())
    }
}

type LiteralWriter<B> = Box<dyn Fn(&mut B, &str) -> Result<(), LiteralError> + Send + Sync>;
type ReferenceWriter<B> = Box<dyn Fn(&mut B, &BeanHandle) -> Result<(), ContainerError> + Send + Sync>;

enum FieldKind<B> {
    Plain,
    Literal {
        raw: String,
        write: LiteralWriter<B>,
    },
    Reference {
        dependency: Dependency,
        target_type: &'static str,
        write: ReferenceWriter<B>,
    },
}

struct FieldDescriptor<B> {
    name: &'static str,
    declared_type: &'static str,
    kind: FieldKind<B>,
}

/// The descriptor table of a bean record, built with chained calls.
///
/// See [`Bean`] for an example.
pub struct Fields<B> {
    entries: Vec<FieldDescriptor<B>>,
}

impl<B: Bean> Fields<B> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Declares a field without a directive; it keeps its zero value.
    pub fn plain(mut self, name: &'static str) -> Self {
        self.entries.push(FieldDescriptor {
            name,
            declared_type: "",
            kind: FieldKind::Plain,
        });
        self
    }

    /// Declares a scalar field filled from a raw literal.
    pub fn literal<V, F>(mut self, name: &'static str, raw: impl Into<String>, field: F) -> Self
    where
        V: Scalar,
        F: Fn(&mut B) -> &mut V + Send + Sync + 'static,
    {
        let write: LiteralWriter<B> = Box::new(move |bean: &mut B, raw: &str| {
            *field(bean) = V::parse_literal(raw)?;
            Ok(())
        });
        self.entries.push(FieldDescriptor {
            name,
            declared_type: type_name::<V>(),
            kind: FieldKind::Literal {
                raw: raw.into(),
                write,
            },
        });
        self
    }

    /// Declares a structural field resolved through `dependency`.
    pub fn reference<S, F>(mut self, name: &'static str, dependency: Dependency, field: F) -> Self
    where
        S: Injectable,
        F: Fn(&mut B) -> &mut S + Send + Sync + 'static,
    {
        let write: ReferenceWriter<B> = Box::new(move |bean: &mut B, target: &BeanHandle| {
            let bean_ref = target.downcast::<S::Target>().ok_or_else(|| {
                ContainerError::TypeMismatch {
                    name: target.name().to_owned(),
                    expected: type_name::<S::Target>(),
                    found: target.type_name(),
                }
            })?;
            field(bean).inject(bean_ref);
            Ok(())
        });
        self.entries.push(FieldDescriptor {
            name,
            declared_type: type_name::<S>(),
            kind: FieldKind::Reference {
                dependency,
                target_type: type_name::<S::Target>(),
                write,
            },
        });
        self
    }

    /// Declares a structural field wired to the bean called `bean_name`.
    pub fn resource<S, F>(self, name: &'static str, bean_name: impl Into<String>, field: F) -> Self
    where
        S: Injectable,
        F: Fn(&mut B) -> &mut S + Send + Sync + 'static,
    {
        self.reference(name, Dependency::named(bean_name), field)
    }

    /// Declares a structural field wired by its declared type's default name.
    pub fn autowired<S, F>(self, name: &'static str, field: F) -> Self
    where
        S: Injectable,
        F: Fn(&mut B) -> &mut S + Send + Sync + 'static,
    {
        self.reference(name, Dependency::ByFieldType, field)
    }

    /// Declares a structural field wired by the referenced record's default name.
    pub fn by_type<S, F>(self, name: &'static str, field: F) -> Self
    where
        S: Injectable,
        F: Fn(&mut B) -> &mut S + Send + Sync + 'static,
    {
        self.reference(name, Dependency::ByTargetType, field)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn views(&self) -> Vec<FieldView> {
        self.entries.iter().map(FieldDescriptor::view).collect()
    }

    /// Checks that every field identifier is non-empty and unique.
    pub(crate) fn validate(&self) -> Result<(), String> {
        let mut seen = HashSet::new();
        for entry in &self.entries {
            if entry.name.is_empty() {
                return Err("field with an empty identifier".to_owned());
            }
            if !seen.insert(entry.name) {
                return Err(format!("field '{}' is described twice", entry.name));
            }
        }
        Ok(())
    }

    /// Parses `raw` into the literal field at `index`.
    ///
    /// Fields without a literal directive are left untouched.
    pub(crate) fn write_literal(&self, bean: &mut B, index: usize, raw: &str) -> Result<(), LiteralError> {
        match self.entries.get(index).map(|entry| &entry.kind) {
            Some(FieldKind::Literal { write, .. }) => write(bean, raw),
            _ => Ok(()),
        }
    }

    /// Injects `target` into the reference field at `index`.
    pub(crate) fn write_reference(
        &self,
        bean: &mut B,
        index: usize,
        target: &BeanHandle,
    ) -> Result<(), ContainerError> {
        match self.entries.get(index).map(|entry| &entry.kind) {
            Some(FieldKind::Reference { write, .. }) => write(bean, target),
            _ => Ok(()),
        }
    }
}

impl<B: Bean> Default for Fields<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> fmt::Debug for Fields<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(FieldDescriptor::view))
            .finish()
    }
}

impl<B> FieldDescriptor<B> {
    fn view(&self) -> FieldView {
        let (target_type, directive) = match &self.kind {
            FieldKind::Plain => (None, None),
            FieldKind::Literal { raw, .. } => (None, Some(Directive::Literal(raw.clone()))),
            FieldKind::Reference {
                dependency,
                target_type,
                ..
            } => (
                Some(*target_type),
                Some(Directive::Reference(dependency.clone())),
            ),
        };
        FieldView {
            name: self.name,
            declared_type: self.declared_type,
            target_type,
            directive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bean::{BeanRef, Inject};

    #[derive(Default)]
    struct Gauge {
        reading: i32,
        ratio: f64,
        enabled: bool,
        label: String,
    }

    impl Bean for Gauge {
        fn fields(fields: Fields<Self>) -> Fields<Self> {
            fields
                .literal("reading", "42", |g| &mut g.reading)
                .literal("ratio", "0.5", |g| &mut g.ratio)
                .literal("enabled", "true", |g| &mut g.enabled)
                .literal("label", "main", |g| &mut g.label)
        }
    }

    #[derive(Default)]
    struct Panel {
        gauge: Inject<Gauge>,
        spare: Inject<Gauge>,
        hits: u64,
    }

    impl Bean for Panel {
        fn fields(fields: Fields<Self>) -> Fields<Self> {
            fields
                .resource("gauge", "mainGauge", |p| &mut p.gauge)
                .by_type("spare", |p| &mut p.spare)
                .plain("hits")
        }
    }

    #[test]
    fn scalars_follow_their_standard_grammar() {
        assert_eq!(i32::parse_literal("42"), Ok(42));
        assert_eq!(u8::parse_literal("255"), Ok(255));
        assert_eq!(f32::parse_literal("1.5"), Ok(1.5));
        assert_eq!(bool::parse_literal("false"), Ok(false));
        assert_eq!(String::parse_literal(" x "), Ok(" x ".to_owned()));

        let error = i32::parse_literal("notanumber").unwrap_err();
        assert_eq!(error.raw, "notanumber");
        assert_eq!(error.target, "i32");
        assert!(u8::parse_literal("256").is_err());
        assert!(bool::parse_literal("yes").is_err());
    }

    #[test]
    fn literal_writers_parse_into_the_field() {
        let fields = Gauge::fields(Fields::new());
        let mut gauge = Gauge::default();
        for (index, raw) in ["42", "0.5", "true", "main"].into_iter().enumerate() {
            fields.write_literal(&mut gauge, index, raw).unwrap();
        }
        assert_eq!(gauge.reading, 42);
        assert_eq!(gauge.ratio, 0.5);
        assert!(gauge.enabled);
        assert_eq!(gauge.label, "main");

        assert!(fields.write_literal(&mut gauge, 0, "4x2").is_err());
        assert_eq!(gauge.reading, 42);
    }

    #[test]
    fn views_expose_directives_and_types() {
        let views = Panel::fields(Fields::new()).views();
        assert_eq!(views.len(), 3);

        assert_eq!(views[0].name, "gauge");
        assert_eq!(
            views[0].directive,
            Some(Directive::Reference(Dependency::named("mainGauge")))
        );
        assert_eq!(naming::simple_name(views[0].target_type.unwrap()), "Gauge");

        assert_eq!(
            views[1].directive,
            Some(Directive::Reference(Dependency::ByTargetType))
        );
        assert_eq!(views[2].directive, None);
    }

    #[test]
    fn dependency_rules_pick_the_target_name() {
        let declared = "app::PrimaryStore";
        let target = "app::Store";
        assert_eq!(Dependency::named("db").target_name(declared, target), "db");
        assert_eq!(Dependency::ByFieldType.target_name(declared, target), "primaryStore");
        assert_eq!(Dependency::ByTargetType.target_name(declared, target), "store");
    }

    #[test]
    fn reference_writer_rejects_other_record_types() {
        let fields = Panel::fields(Fields::new());
        let mut panel = Panel::default();

        let other = BeanHandle::new("mainGauge", BeanRef::new(Panel::default()));
        let error = fields.write_reference(&mut panel, 0, &other).unwrap_err();
        assert!(matches!(error, ContainerError::TypeMismatch { .. }));
        assert!(!panel.gauge.is_set());

        let gauge = BeanHandle::new("mainGauge", BeanRef::new(Gauge::default()));
        fields.write_reference(&mut panel, 0, &gauge).unwrap();
        assert!(panel.gauge.is_set());
    }

    #[test]
    fn validation_rejects_duplicate_and_empty_identifiers() {
        assert!(Panel::fields(Fields::new()).validate().is_ok());
        let duplicated = Fields::<Panel>::new().plain("hits").plain("hits");
        assert!(duplicated.validate().is_err());
        assert!(Fields::<Panel>::new().plain("").validate().is_err());
    }

    #[test]
    fn directives_serialize_in_snake_case() {
        let json = serde_json::to_string(&Directive::Reference(Dependency::named("b"))).unwrap();
        assert_eq!(json, r#"{"reference":{"named":"b"}}"#);
        let back: Directive = serde_json::from_str(r#"{"literal":"42"}"#).unwrap();
        assert_eq!(back, Directive::Literal("42".to_owned()));
    }
}
