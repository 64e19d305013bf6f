//! The argument bag handed to the validator.

use std::collections::BTreeMap;

use crate::value::Value;

/// Largest argument collection read from an arguments-shaped object.
pub const MAX_ARGUMENTS: usize = u16::MAX as usize;

/// Ordered, indexable collection of actual call arguments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments(Vec<Value>);

impl Arguments {
    pub fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    /// Declared `length` of an arguments-shaped object: an object with an
    /// integral, non-negative `length` and entries keyed `"0"`, `"1"`, ...
    ///
    /// Returns `None` when the value does not have that shape. Nothing is
    /// materialized, so an oversized `length` can be compared against the
    /// expectation count first.
    pub fn arguments_length(value: &Value) -> Option<usize> {
        let Value::Object(map) = value else {
            return None;
        };

        let length = map.get("length")?.as_number()?;
        let integral = length.is_finite() && length.fract() == 0.0;
        if !integral || length < 0.0 || length > u32::MAX as f64 {
            return None;
        }
        Some(length as usize)
    }

    /// Read an arguments-shaped object into an argument bag.
    ///
    /// Entries absent below `length` read as `undefined`. Returns `None` when
    /// the value does not have that shape or declares more than
    /// [`MAX_ARGUMENTS`] entries.
    pub fn from_arguments_object(value: &Value) -> Option<Self> {
        let length = Self::arguments_length(value)?;
        if length > MAX_ARGUMENTS {
            return None;
        }

        let values = (0..length)
            .map(|i| value.get(&i.to_string()).cloned().unwrap_or_default())
            .collect();
        Some(Self(values))
    }

    /// Render back into an arguments-shaped object.
    pub fn to_value(&self) -> Value {
        let mut map: BTreeMap<String, Value> = self
            .0
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v.clone()))
            .collect();
        map.insert("length".to_string(), Value::Number(self.0.len() as f64));
        Value::Object(map)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }
}

impl From<Vec<Value>> for Arguments {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}

impl FromIterator<Value> for Arguments {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Arguments {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Build [`Arguments`] from anything convertible into a [`Value`].
///
/// ```rust
/// use argcheck_core::args;
///
/// let arguments = args!["a", 5, true];
/// assert_eq!(arguments.len(), 3);
/// ```
#[macro_export]
macro_rules! args {
    ($($value:expr),* $(,)?) => {
        $crate::Arguments::new(vec![$($crate::Value::from($value)),*])
    };
}
