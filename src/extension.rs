//! Process-wide registry of graph extension identifiers.
//!
//! A feature that augments the graph (today only the drawing builder) claims
//! an identifier once per process and carries it in every context instance,
//! so contexts attached to different graphs can be told apart from contexts
//! of other features.

use lazy_static::lazy_static;
use std::sync::Mutex;

lazy_static! {
    static ref REGISTERED: Mutex<Vec<&'static str>> = Mutex::new(Vec::new());
}

/// Identifier of a registered graph extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionId(usize);

impl ExtensionId {
    pub fn name(&self) -> &'static str {
        REGISTERED.lock().unwrap()[self.0]
    }
}

/// Registers `name` if it is new and returns its identifier. Registering the
/// same name again returns the identifier minted the first time.
pub(crate) fn register(name: &'static str) -> ExtensionId {
    let mut reg = REGISTERED.lock().unwrap();
    if let Some(ix) = reg.iter().position(|n| *n == name) {
        ExtensionId(ix)
    } else {
        reg.push(name);
        ExtensionId(reg.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_is_idempotent() {
        let a = register("TestFeatureA");
        let b = register("TestFeatureB");
        assert_ne!(a, b);
        assert_eq!(register("TestFeatureA"), a);
        assert_eq!(a.name(), "TestFeatureA");
    }
}
