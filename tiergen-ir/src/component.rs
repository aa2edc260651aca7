//! Component configurations.
//!
//! Each requested unit of generation is described by one of the config
//! structs below. Configs carry everything a renderer needs; they never
//! reference each other directly, only by name.

use serde::{Deserialize, Serialize};

use crate::{ComponentKind, DatabaseType};

/// A field on an entity, repository or use-case input/output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field name (PascalCase).
    pub name: String,
    /// Go type of the field (e.g. `string`, `*time.Time`).
    #[serde(rename = "type")]
    pub ty: String,
    /// Raw tags given on the command line.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// JSON struct tag value.
    #[serde(default)]
    pub json_tag: String,
    /// Database column name.
    #[serde(default)]
    pub db_tag: String,
    /// Optional comment rendered above the field.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub index: bool,
}

impl Field {
    /// Create a field with the given name and type and no tags.
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            ..Default::default()
        }
    }

    /// Whether the field is a pointer type.
    pub fn is_pointer(&self) -> bool {
        self.ty.starts_with('*')
    }

    /// The type with any leading pointer or slice marker removed.
    pub fn base_type(&self) -> &str {
        let ty = self.ty.strip_prefix('*').unwrap_or(&self.ty);
        ty.strip_prefix("[]").unwrap_or(ty)
    }

    /// The Go zero value literal for this field's type.
    pub fn zero_value(&self) -> &'static str {
        match self.ty.as_str() {
            "string" => "\"\"",
            "int" | "int8" | "int16" | "int32" | "int64" => "0",
            "uint" | "uint8" | "uint16" | "uint32" | "uint64" => "0",
            "float32" | "float64" => "0.0",
            "bool" => "false",
            "time.Time" => "time.Time{}",
            "uuid.UUID" => "uuid.Nil",
            _ => "nil",
        }
    }
}

/// An entity (domain model) to generate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityConfig {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<Field>,
    /// Database table the entity maps to.
    #[serde(default)]
    pub table_name: String,
    #[serde(default)]
    pub add_validation: bool,
    #[serde(default)]
    pub add_comments: bool,
    /// Naming style for JSON tags (e.g. `snake_case`).
    #[serde(default)]
    pub json_style: String,
}

impl EntityConfig {
    pub fn new(name: impl Into<String>, table_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table_name: table_name.into(),
            ..Default::default()
        }
    }

    /// Builder: set the entity fields.
    pub fn with_fields(mut self, fields: Vec<Field>) -> Self {
        self.fields = fields;
        self
    }

    /// Whether any field uses `time.Time`.
    pub fn has_time_field(&self) -> bool {
        self.fields.iter().any(|f| f.base_type() == "time.Time")
    }

    /// Whether any field uses `uuid.UUID`.
    pub fn has_uuid_field(&self) -> bool {
        self.fields.iter().any(|f| f.base_type() == "uuid.UUID")
    }

    /// Fields marked as required.
    pub fn required_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.required)
    }
}

/// A method parameter on a custom repository method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodParam {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

/// A repository method beyond the standard CRUD set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomMethod {
    pub name: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub params: Vec<MethodParam>,
    #[serde(default)]
    pub returns: Vec<String>,
}

/// A repository (persistence adapter) to generate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Repository name without the `Repository` suffix.
    pub name: String,
    /// Name of the entity this repository stores.
    pub entity: String,
    #[serde(default)]
    pub table_name: String,
    #[serde(default)]
    pub db_type: DatabaseType,
    #[serde(default)]
    pub custom_methods: Vec<CustomMethod>,
    #[serde(default)]
    pub with_transactions: bool,
    #[serde(default)]
    pub add_comments: bool,
    /// Fields copied from the owning entity.
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl RepositoryConfig {
    /// Create a repository for an entity of the same name.
    pub fn new(name: impl Into<String>, table_name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            entity: name.clone(),
            name,
            table_name: table_name.into(),
            ..Default::default()
        }
    }

    /// The node identifier used in the dependency graph (`<Name>Repository`).
    pub fn qualified_name(&self) -> String {
        format!("{}Repository", self.name)
    }
}

/// A named reference from a use-case to another component.
///
/// `found` is a snapshot of whether the referenced component existed in the
/// plan when the dependency was last detected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    #[serde(default)]
    pub found: bool,
}

impl Dependency {
    pub fn new(name: impl Into<String>, kind: ComponentKind, found: bool) -> Self {
        Self {
            name: name.into(),
            kind,
            found,
        }
    }

    /// A repository dependency on `<entity>Repository`.
    pub fn repository(entity: &str, found: bool) -> Self {
        Self::new(format!("{entity}Repository"), ComponentKind::Repository, found)
    }
}

/// A use-case (application service) to generate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseCaseConfig {
    /// Use-case name without the `UseCase` suffix.
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
    #[serde(default)]
    pub input_fields: Vec<Field>,
    #[serde(default)]
    pub output_fields: Vec<Field>,
    #[serde(default)]
    pub with_logging: bool,
    #[serde(default)]
    pub add_comments: bool,
}

impl UseCaseConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builder: declare an explicit dependency.
    pub fn with_dependency(mut self, dependency: Dependency) -> Self {
        self.dependencies.push(dependency);
        self
    }

    /// The node identifier used in the dependency graph (`<Name>UseCase`).
    pub fn qualified_name(&self) -> String {
        format!("{}UseCase", self.name)
    }

    /// Names of dependencies whose stored status is not found.
    pub fn missing_dependencies(&self) -> Vec<&str> {
        self.dependencies
            .iter()
            .filter(|d| !d.found)
            .map(|d| d.name.as_str())
            .collect()
    }

    pub fn has_dependency(&self, name: &str) -> bool {
        self.dependencies.iter().any(|d| d.name == name)
    }
}
