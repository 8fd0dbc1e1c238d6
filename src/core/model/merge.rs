//! Folding per-file results into the run's [`Model`].
//!
//! Files are built independently and may finish in any order, so the merge
//! only promises set semantics per container: the same registrations end up
//! in the same containers whatever order the partial results arrive in.

use super::{
    Container, Model, PartialModel, Registration,
    naming::{DEFAULT_CONTAINER, canonical_container_name},
};

impl Model {
    /// Merge one file's registrations. Container names are canonicalized and
    /// registrations already present in the container are skipped.
    pub fn merge(&mut self, partial: PartialModel) {
        for (raw_name, registrations) in partial {
            let name = canonical_container_name(&raw_name, DEFAULT_CONTAINER);
            let container = self
                .containers
                .entry(name)
                .or_insert_with_key(|name| Container::new(name.clone()));
            container.append(registrations);
        }
    }

    pub fn add_imports<I, S>(&mut self, imports: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.imports.extend(imports.into_iter().map(Into::into));
    }
}

impl Container {
    pub fn append(&mut self, registrations: Vec<Registration>) {
        for registration in registrations {
            self.is_ui_container |= registration.storyboard_instantiatable;
            if !self.registrations.contains(&registration) {
                self.registrations.push(registration);
            }
        }
    }
}
