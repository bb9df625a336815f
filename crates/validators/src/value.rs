use serde_yaml::Value;

/// Numeric view of a value; `None` for anything that is not a number.
pub(crate) fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

/// Equality used for duplicate detection: numbers compare by magnitude so
/// that `1` and `1.0` are the same element.
pub(crate) fn same_value(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

pub(crate) fn has_duplicates(items: &[Value]) -> bool {
    items
        .iter()
        .enumerate()
        .any(|(i, item)| items[..i].iter().any(|seen| same_value(seen, item)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(s: &str) -> Value {
        serde_yaml::from_str(s).unwrap()
    }

    #[test]
    fn test_numbers_compare_by_magnitude() {
        assert!(same_value(&yaml("1"), &yaml("1.0")));
        assert!(!same_value(&yaml("1"), &yaml("'1'")));
    }

    #[test]
    fn test_has_duplicates() {
        let items = yaml("[1, 2, 1]");
        assert!(has_duplicates(items.as_sequence().unwrap()));

        let items = yaml("[[1, 2], [2, 1], {a: 1}]");
        assert!(!has_duplicates(items.as_sequence().unwrap()));

        let items = yaml("[{a: 1}, {a: 1}]");
        assert!(has_duplicates(items.as_sequence().unwrap()));
    }
}
