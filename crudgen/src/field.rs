//! Field spec parser
//!
//! Turns the compact `name:type,name:type` syntax into ordered [`FieldSpec`]s
//! and collects the non-primitive type names the model has to import.
//!
//! ```text
//! name:str                 → name: str
//! price:Decimal            → price: Decimal   (+ from typing import Decimal)
//! active:boolean           → active: bool     (alias normalised)
//! ```

use crate::error::{Error, Result};
use std::collections::BTreeSet;
use std::fmt;

/// Column every generated model declares as its primary key
pub const PRIMARY_KEY: &str = "id";

/// Python reserved words; a resource named after one yields unimportable modules
const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

/// Python primitives and their spelled-out aliases. None of them need an import.
const PRIMITIVES: &[(&str, &str)] = &[
    ("str", "str"),
    ("string", "str"),
    ("int", "int"),
    ("integer", "int"),
    ("float", "float"),
    ("bool", "bool"),
    ("boolean", "bool"),
];

/// One `name:type` field of a resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name (e.g., "title")
    pub name: String,
    /// Type name exactly as given (e.g., "string", "Decimal")
    pub type_name: String,
}

impl FieldSpec {
    /// Parse a single `name:type` token
    ///
    /// Surrounding whitespace is ignored on the token and on both parts.
    ///
    /// # Examples
    ///
    /// ```
    /// # use crudgen::FieldSpec;
    /// let field = FieldSpec::parse(" title : str ").unwrap();
    /// assert_eq!(field.name, "title");
    /// assert_eq!(field.type_name, "str");
    ///
    /// assert!(FieldSpec::parse("title").is_err());
    /// assert!(FieldSpec::parse("a:b:c").is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedField`] unless the token splits into exactly
    /// two non-empty parts.
    pub fn parse(token: &str) -> Result<Self> {
        let parts: Vec<&str> = token.trim().split(':').map(str::trim).collect();

        match parts.as_slice() {
            [name, type_name] if !name.is_empty() && !type_name.is_empty() => Ok(Self {
                name: (*name).to_string(),
                type_name: (*type_name).to_string(),
            }),
            _ => Err(Error::malformed_field(token.trim())),
        }
    }

    /// Whether the type is a built-in primitive
    #[must_use]
    pub fn is_primitive(&self) -> bool {
        primitive(&self.type_name).is_some()
    }

    /// Python annotation for this field, with primitive aliases normalised
    ///
    /// ```
    /// # use crudgen::FieldSpec;
    /// assert_eq!(FieldSpec::parse("n:integer").unwrap().annotation(), "int");
    /// assert_eq!(FieldSpec::parse("n:UUID").unwrap().annotation(), "UUID");
    /// ```
    #[must_use]
    pub fn annotation(&self) -> &str {
        primitive(&self.type_name).unwrap_or(&self.type_name)
    }
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.type_name)
    }
}

fn primitive(type_name: &str) -> Option<&'static str> {
    PRIMITIVES
        .iter()
        .find(|(alias, _)| *alias == type_name)
        .map(|(_, python)| *python)
}

/// Result of [`parse_fields`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFields {
    /// Fields in input order
    pub fields: Vec<FieldSpec>,
    /// Non-primitive type names, sorted
    pub type_imports: BTreeSet<String>,
}

/// Parse a comma-separated field list
///
/// # Examples
///
/// ```
/// # use crudgen::parse_fields;
/// let parsed = parse_fields("a:Decimal, b:string, c:UUID").unwrap();
/// assert_eq!(parsed.fields.len(), 3);
/// assert_eq!(
///     parsed.type_imports.iter().collect::<Vec<_>>(),
///     vec!["Decimal", "UUID"]
/// );
/// ```
///
/// # Errors
///
/// Returns [`Error::MalformedField`] for the first token that is not
/// `name:type` (an empty list counts as one empty token),
/// [`Error::ReservedField`] for a field named `id` and
/// [`Error::DuplicateField`] when a field name repeats.
pub fn parse_fields(raw: &str) -> Result<ParsedFields> {
    let mut parsed = ParsedFields::default();
    let mut seen = BTreeSet::new();

    for token in raw.split(',') {
        let field = FieldSpec::parse(token)?;

        if field.name == PRIMARY_KEY {
            return Err(Error::ReservedField { name: field.name });
        }

        if !seen.insert(field.name.clone()) {
            return Err(Error::DuplicateField { name: field.name });
        }

        if !field.is_primitive() {
            parsed.type_imports.insert(field.type_name.clone());
        }

        parsed.fields.push(field);
    }

    tracing::debug!(
        fields = parsed.fields.len(),
        imports = ?parsed.type_imports,
        "parsed field list"
    );

    Ok(parsed)
}

/// Everything needed to generate one resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSpec {
    /// Resource name as given (e.g., "widget")
    pub resource_name: String,
    /// Capitalised resource name (e.g., "Widget")
    pub class_name: String,
    /// Fields in input order
    pub fields: Vec<FieldSpec>,
    /// Non-primitive type names, sorted
    pub type_imports: BTreeSet<String>,
}

impl ResourceSpec {
    /// Build a resource spec from a name and a raw field list
    ///
    /// # Errors
    ///
    /// Returns an error if the resource name is not a Python identifier or the
    /// field list cannot be parsed.
    pub fn new(resource_name: &str, raw_fields: &str) -> Result<Self> {
        validate_resource_name(resource_name)?;
        let ParsedFields {
            fields,
            type_imports,
        } = parse_fields(raw_fields)?;

        Ok(Self {
            resource_name: resource_name.to_string(),
            class_name: capitalize(resource_name),
            fields,
            type_imports,
        })
    }

    /// Name of the generated router, also the registration entry
    #[must_use]
    pub fn router_name(&self) -> String {
        router_name(&self.resource_name)
    }
}

/// Router/registration identifier for a resource (`widget` → `widget_routes`)
#[must_use]
pub fn router_name(resource_name: &str) -> String {
    format!("{resource_name}_routes")
}

/// Check that a resource name can be spliced into Python identifiers
///
/// # Errors
///
/// Returns [`Error::InvalidResourceName`] unless the name matches
/// `[A-Za-z_][A-Za-z0-9_]*` and is not a Python keyword.
pub fn validate_resource_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !PYTHON_KEYWORDS.contains(&name);

    if valid {
        Ok(())
    } else {
        Err(Error::InvalidResourceName {
            name: name.to_string(),
        })
    }
}

/// Upper-case the first character and lower-case the rest
///
/// ```
/// # use crudgen::field::capitalize;
/// assert_eq!(capitalize("widget"), "Widget");
/// assert_eq!(capitalize("userProfile"), "Userprofile");
/// ```
#[must_use]
pub fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fields_keeps_input_order() {
        let parsed = parse_fields("a:string,b:integer").unwrap();
        let names: Vec<_> = parsed.fields.iter().map(|f| f.name.as_str()).collect();
        let types: Vec<_> = parsed.fields.iter().map(|f| f.type_name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(types, ["string", "integer"]);
        assert!(parsed.type_imports.is_empty());
    }

    #[test]
    fn test_parse_fields_trims_whitespace() {
        let parsed = parse_fields("  name : str ,  count:int  ").unwrap();
        assert_eq!(parsed.fields[0], FieldSpec::parse("name:str").unwrap());
        assert_eq!(parsed.fields[1].name, "count");
        assert_eq!(parsed.fields[1].type_name, "int");
    }

    #[test]
    fn test_parse_fields_rejects_malformed_tokens() {
        for raw in ["name", "name:", ":str", "a:b:c", "a:str,,b:int", "", "a:str,"] {
            let err = parse_fields(raw).unwrap_err();
            assert!(
                matches!(err, Error::MalformedField { .. }),
                "expected MalformedField for {raw:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_malformed_field_captures_token() {
        match parse_fields("name:str, price").unwrap_err() {
            Error::MalformedField { token } => assert_eq!(token, "price"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_fields_rejects_duplicates() {
        match parse_fields("name:str,name:int").unwrap_err() {
            Error::DuplicateField { name } => assert_eq!(name, "name"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_fields_rejects_primary_key_name() {
        for raw in ["id:int,name:str", "name:str, id : str"] {
            match parse_fields(raw).unwrap_err() {
                Error::ReservedField { name } => assert_eq!(name, "id"),
                other => panic!("unexpected error for {raw:?}: {other:?}"),
            }
        }
        assert!(parse_fields("item_id:int,ID:str").is_ok());
    }

    #[test]
    fn test_type_imports_sorted_without_primitives() {
        let parsed = parse_fields("a:Decimal,b:string,c:UUID,d:bool,e:datetime").unwrap();
        let imports: Vec<_> = parsed.type_imports.iter().map(String::as_str).collect();
        assert_eq!(imports, ["Decimal", "UUID", "datetime"]);
    }

    #[test]
    fn test_type_imports_deduplicated() {
        let parsed = parse_fields("a:Decimal,b:Decimal").unwrap();
        assert_eq!(parsed.type_imports.len(), 1);
    }

    #[test]
    fn test_annotation_normalises_aliases() {
        let cases = [
            ("a:string", "str"),
            ("a:integer", "int"),
            ("a:boolean", "bool"),
            ("a:float", "float"),
            ("a:str", "str"),
            ("a:Decimal", "Decimal"),
        ];
        for (input, expected) in cases {
            assert_eq!(FieldSpec::parse(input).unwrap().annotation(), expected);
        }
    }

    #[test]
    fn test_resource_spec_derives_class_name() {
        let spec = ResourceSpec::new("widget", "name:str").unwrap();
        assert_eq!(spec.class_name, "Widget");
        assert_eq!(spec.router_name(), "widget_routes");
    }

    #[test]
    fn test_resource_name_validation() {
        for name in ["widget", "_private", "user_profile", "item2", "classes", "match", "type"] {
            assert!(validate_resource_name(name).is_ok(), "{name} should be valid");
        }
        for name in [
            "", "2items", "user-profile", "a.b", "../etc", "with space", "class", "def", "None",
            "lambda",
        ] {
            assert!(validate_resource_name(name).is_err(), "{name:?} should be invalid");
        }
    }

    #[test]
    fn test_invalid_resource_name_checked_before_fields() {
        let err = ResourceSpec::new("bad-name", "oops").unwrap_err();
        assert!(matches!(err, Error::InvalidResourceName { .. }));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("items"), "Items");
        assert_eq!(capitalize("WIDGET"), "Widget");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_display() {
        let field = FieldSpec::parse(" price : Decimal").unwrap();
        assert_eq!(field.to_string(), "price:Decimal");
    }
}
