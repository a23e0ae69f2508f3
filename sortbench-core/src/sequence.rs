//! Input Sequences
//!
//! Raw inputs arrive as JSON values from external collaborators and are
//! validated here before reaching any kernel. Integers are wrapped in
//! [`Tracked`] so the output permutation survives sorting and stability can
//! be scored exactly.

use crate::error::SortError;
use serde_json::Value;
use std::cmp::Ordering;

/// An integer tagged with its position in the original sequence.
///
/// Ordering and equality consider `value` only; `origin` is carried along
/// untouched so sorts treat it as an opaque payload.
#[derive(Debug, Clone, Copy)]
pub struct Tracked {
    pub value: i64,
    pub origin: usize,
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Tracked {}

impl PartialOrd for Tracked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tracked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

/// Tag every value with its index
pub fn track(values: &[i64]) -> Vec<Tracked> {
    values
        .iter()
        .enumerate()
        .map(|(origin, &value)| Tracked { value, origin })
        .collect()
}

/// Split tracked output into (values, origin permutation)
pub fn untrack(items: &[Tracked]) -> (Vec<i64>, Vec<usize>) {
    items.iter().map(|t| (t.value, t.origin)).unzip()
}

/// Validate a raw sequence into 64-bit integers.
///
/// Rejects nulls, non-numbers, fractional numbers, and integers outside the
/// `i64` range, reporting the first offending index.
pub fn parse_sequence(values: &[Value]) -> Result<Vec<i64>, SortError> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| match value {
            Value::Number(n) => n.as_i64().ok_or_else(|| SortError::InvalidInput {
                index,
                reason: if n.is_f64() {
                    format!("{} is not an integer", n)
                } else {
                    format!("{} is outside the i64 range", n)
                },
            }),
            Value::Null => Err(SortError::InvalidInput {
                index,
                reason: "null element".to_string(),
            }),
            other => Err(SortError::InvalidInput {
                index,
                reason: format!("expected integer, found {}", kind_of(other)),
            }),
        })
        .collect()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_track_untrack() {
        let tracked = track(&[5, 3, 5]);
        assert_eq!(tracked[2].origin, 2);
        assert_eq!(tracked[0], tracked[2]);

        let (values, perm) = untrack(&tracked);
        assert_eq!(values, vec![5, 3, 5]);
        assert_eq!(perm, vec![0, 1, 2]);
    }

    #[test]
    fn test_ordering_ignores_origin() {
        let a = Tracked { value: 1, origin: 9 };
        let b = Tracked { value: 2, origin: 0 };
        assert!(a < b);
        assert_eq!(a.cmp(&Tracked { value: 1, origin: 0 }), Ordering::Equal);
    }

    #[test]
    fn test_parse_valid() {
        let raw = vec![json!(5), json!(-3), json!(0)];
        assert_eq!(parse_sequence(&raw).unwrap(), vec![5, -3, 0]);
        assert!(parse_sequence(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        let cases = vec![
            (vec![json!(1), json!(null)], 1),
            (vec![json!("7")], 0),
            (vec![json!(1), json!(2), json!(2.5)], 2),
            (vec![json!(u64::MAX)], 0),
            (vec![json!([1])], 0),
        ];
        for (raw, bad_index) in cases {
            match parse_sequence(&raw) {
                Err(SortError::InvalidInput { index, .. }) => assert_eq!(index, bad_index),
                other => panic!("expected InvalidInput, got {:?}", other),
            }
        }
    }
}
