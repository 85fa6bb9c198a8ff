use std::collections::HashMap;

/// Nested `${...}` references are expanded at most this many times
const MAX_INTERPOLATION_DEPTH: usize = 10;

/// Expands `${name}` references from `values`
///
/// Unknown names (including `${env.*}`) are left untouched so callers can
/// detect them; self-referencing values stop expanding after a fixed depth.
pub fn interpolate(value: &str, values: &HashMap<String, String>) -> String {
    let mut current = value.to_string();
    for _ in 0..MAX_INTERPOLATION_DEPTH {
        if !current.contains("${") {
            break;
        }
        let next = substitute_once(&current, values);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn substitute_once(value: &str, values: &HashMap<String, String>) -> String {
    let mut result = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let name = &after[..end];
                match values.get(name) {
                    Some(replacement) => result.push_str(replacement),
                    None => {
                        result.push_str("${");
                        result.push_str(name);
                        result.push('}');
                    }
                }
                rest = &after[end + 1..];
            }
            None => {
                result.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    result.push_str(rest);
    result
}

/// Whether an expression survived interpolation
pub fn has_unresolved_expression(value: &str) -> bool {
    value.contains("${")
}
