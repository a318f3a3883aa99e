//! Type names that never take part in relationship inference

use regex::Regex;
use std::sync::LazyLock;

static GENERIC_ARGS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<.*>").unwrap());

/// Primitives, boxed wrappers, `String`/`Object`, big numbers, the common
/// collection types, and a few JDK utility classes
pub const BASIC_TYPES: [&str; 37] = [
    "int", "long", "double", "float", "boolean", "char", "byte", "short",
    "Integer", "Long", "Double", "Float", "Boolean", "Character", "Byte", "Short",
    "String", "Object", "BigDecimal", "BigInteger",
    "List", "ArrayList", "LinkedList", "Set", "HashSet", "LinkedHashSet", "TreeSet",
    "Map", "HashMap", "LinkedHashMap", "TreeMap", "Collection", "Queue", "Deque",
    "Math", "System", "Thread",
];

pub fn is_basic_type(type_name: &str) -> bool {
    BASIC_TYPES.contains(&type_name)
}

/// Strip generic arguments and array brackets: `Map<K, V>[]` becomes `Map`
pub fn base_type(type_name: &str) -> String {
    let without_generics = GENERIC_ARGS_RE.replace_all(type_name, "");
    without_generics.replace("[]", "").trim().to_string()
}
