use std::collections::BTreeMap;

pub const DEFAULT_PLACEHOLDER_TYPE: &str = "interface{}";
pub const DEFAULT_ENTRY_POINT: &str = "主";
pub const GO_ENTRY_POINT: &str = "main";

/// Saika type names and their Go spellings, traditional and simplified.
const BUILTIN_TYPE_NAMES: &[(&str, &str)] = &[
    ("整數", "int"),
    ("整数", "int"),
    ("字串", "string"),
    ("字符串", "string"),
    ("浮點", "float64"),
    ("浮点", "float64"),
    ("布林", "bool"),
    ("布尔", "bool"),
    ("位元組", "byte"),
    ("字节", "byte"),
];

pub fn builtin_type_names() -> BTreeMap<String, String> {
    BUILTIN_TYPE_NAMES.iter().map(|(from, to)| (from.to_string(), to.to_string())).collect()
}

/// Knobs for the Go generator.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorOptions {
    /// Element type of array literals and value type of hash literals.
    pub placeholder_type: String,
    /// Function name that is emitted as `main`.
    pub entry_point: String,
    /// Type-name translations applied to every named type reference.
    pub type_names: BTreeMap<String, String>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            placeholder_type: DEFAULT_PLACEHOLDER_TYPE.to_string(),
            entry_point: DEFAULT_ENTRY_POINT.to_string(),
            type_names: builtin_type_names(),
        }
    }
}

impl GeneratorOptions {
    pub fn translate_type<'a>(&'a self, name: &'a str) -> &'a str {
        self.type_names.get(name).map_or(name, String::as_str)
    }

    pub fn function_name<'a>(&self, name: &'a str) -> &'a str {
        if name == self.entry_point { GO_ENTRY_POINT } else { name }
    }
}

/// Wrap an import path in double quotes unless it already is.
pub fn quote_import_path(path: &str) -> String {
    if path.len() >= 2 && path.starts_with('"') && path.ends_with('"') {
        path.to_string()
    } else {
        format!("\"{path}\"")
    }
}
