/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// Object keys must be string literals. Anything that is not `null`, `true`,
/// `false`, an array or an object is converted with [`to_value`](crate::to_value).
///
/// # Conversion failures
///
/// An expression whose conversion fails becomes [`Value::Null`](crate::Value::Null)
/// and the error is dropped. Call [`to_value`](crate::to_value) directly when
/// the error matters:
///
/// ```rust
/// use flattery::{to_value, value, Value};
/// use std::collections::BTreeMap;
///
/// let mut grid = BTreeMap::new();
/// grid.insert((0, 0), "origin");
///
/// assert_eq!(value!(grid.clone()), Value::Null);
/// assert!(to_value(&grid).is_err());
/// ```
///
/// # Examples
///
/// ```rust
/// use flattery::{flatten, value};
///
/// let config = value!({
///     "server": { "host": "localhost", "ports": [80, 443] },
///     "debug": false
/// });
///
/// let flat = flatten(&config);
/// assert!(flat.contains_path("server.ports.1"));
/// ```
#[macro_export]
macro_rules! value {
    (null) => {
        $crate::Value::<$crate::Scalar>::Null
    };

    (true) => {
        $crate::Value::<$crate::Scalar>::Scalar($crate::Scalar::Bool(true))
    };

    (false) => {
        $crate::Value::<$crate::Scalar>::Scalar($crate::Scalar::Bool(false))
    };

    ([]) => {
        $crate::Value::<$crate::Scalar>::Sequence(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::<$crate::Scalar>::Sequence(vec![$($crate::value!($elem)),*])
    };

    ({}) => {
        $crate::Value::<$crate::Scalar>::Mapping($crate::Map::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::Map::<$crate::Value>::new();
        $(
            object.insert($key.to_string(), $crate::value!($value));
        )*
        $crate::Value::Mapping(object)
    }};

    ($s:expr) => {{
        $crate::to_value(&$s).unwrap_or($crate::Value::Null)
    }};
}
