//! The filter registry available to templates.

use minijinja::{Environment, Error, ErrorKind, Value};

use crate::core::model::naming::{capitalize, lowercase_first};

pub fn register(env: &mut Environment<'_>) {
    env.add_filter("title_case", title_case);
    env.add_filter("camel_case", camel_case);
    env.add_filter("comma_join", comma_join);
}

/// `list module` -> `ListModule`.
pub fn title_case(value: &str) -> String {
    value.split_whitespace().map(capitalize).collect()
}

/// `Shared` -> `shared`. Only the first letter changes.
pub fn camel_case(value: &str) -> String {
    lowercase_first(value)
}

/// Join a list of strings with `, `. Any non-string element is an error.
pub fn comma_join(values: Vec<Value>) -> Result<String, Error> {
    let mut parts = Vec::with_capacity(values.len());
    for value in &values {
        let Some(part) = value.as_str() else {
            return Err(Error::new(
                ErrorKind::InvalidOperation,
                format!("comma_join expects strings, got {}", value.kind()),
            ));
        };
        parts.push(part);
    }
    Ok(parts.join(", "))
}
