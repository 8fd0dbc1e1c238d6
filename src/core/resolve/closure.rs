//! Factory assembly: matching runtime arguments and rewriting the
//! constructor call.
//!
//! `init(url:session:)` on `Client` with runtime argument `url` becomes
//!
//! ```text
//! try Client.init(url: url, session: container.resolve())
//! ```

use crate::core::model::{Argument, Closure, Constructor, Factory};

const RESOLVE_PLACEHOLDER: &str = "container.resolve()";

/// What to do with a runtime argument name that matches no constructor
/// parameter. Applied by the registration builder, which knows the source
/// location to report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ArgumentPolicy {
    /// Drop the name and keep the registration.
    #[default]
    Drop,
    /// Fail the run.
    Fail,
}

impl ArgumentPolicy {
    pub fn from_strict(strict: bool) -> Self {
        if strict { Self::Fail } else { Self::Drop }
    }
}

/// An assembled factory plus the runtime argument names that were dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactoryPlan {
    pub factory: Factory,
    pub unmatched: Vec<String>,
}

/// Assemble the factory for `type_name`.
///
/// Runtime arguments keep their declared order and each constructor parameter
/// is consumed by at most one of them. Every other parameter is resolved from
/// the container, which makes the closure throwing.
pub fn assemble_factory(
    type_name: &str,
    constructor: &Constructor,
    runtime_names: &[String],
) -> FactoryPlan {
    let mut consumed = vec![false; constructor.arguments.len()];
    let mut runtime: Vec<Argument> = Vec::new();
    let mut unmatched = Vec::new();

    for name in runtime_names {
        let position = constructor
            .arguments
            .iter()
            .enumerate()
            .position(|(i, argument)| !consumed[i] && argument.key() == name);
        match position {
            Some(i) => {
                consumed[i] = true;
                runtime.push(constructor.arguments[i].clone());
            }
            None => unmatched.push(name.clone()),
        }
    }

    let closure = rewrite_call(type_name, constructor, &consumed);
    FactoryPlan {
        factory: Factory {
            type_name: type_name.to_string(),
            constructor: constructor.name.clone(),
            arguments: runtime,
            closure,
        },
        unmatched,
    }
}

fn rewrite_call(type_name: &str, constructor: &Constructor, runtime: &[bool]) -> Closure {
    let mut throws = false;
    let pairs: Vec<String> = constructor
        .arguments
        .iter()
        .zip(runtime)
        .map(|(argument, &is_runtime)| {
            let value = if is_runtime {
                argument.key()
            } else {
                throws = true;
                RESOLVE_PLACEHOLDER
            };
            if argument.is_unlabeled() {
                value.to_string()
            } else {
                format!("{}: {}", argument.name, value)
            }
        })
        .collect();

    let body = format!(
        "{}{}.{}({})",
        if throws { "try " } else { "" },
        type_name,
        constructor.base_name(),
        pairs.join(", ")
    );
    Closure { body, throws }
}
