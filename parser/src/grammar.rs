//! FILENAME: parser/src/grammar.rs
//! PURPOSE: The name-to-callback registry consulted while compiling.
//! CONTEXT: Hosts register zero-argument callbacks under four-character
//! names, then hand the grammar to the compile call. `$xxxx` references are
//! resolved against it once, at compile time; the callbacks themselves are
//! invoked again at every solve.

use crate::parser::{ParseError, ParseResult};
use std::collections::HashMap;
use std::sync::Arc;

/// A host-supplied zero-argument numeric callback.
pub type FunctionCallback = Arc<dyn Fn() -> f64 + Send + Sync>;

/// Grammar registry mapping `$xxxx` function names to callbacks.
#[derive(Clone, Default)]
pub struct Grammar {
    functions: HashMap<String, FunctionCallback>,
}

impl Grammar {
    pub fn new() -> Self {
        Grammar {
            functions: HashMap::new(),
        }
    }

    /// Registers `callback` under `name`.
    ///
    /// Names must be exactly four characters so that a `$xxxx` reference
    /// has an unambiguous length in equation text. Registering a name a
    /// second time overwrites the earlier binding.
    pub fn register<F>(&mut self, name: &str, callback: F) -> ParseResult<()>
    where
        F: Fn() -> f64 + Send + Sync + 'static,
    {
        if name.chars().count() != 4 {
            return Err(ParseError::new(format!(
                "function name must be exactly four characters, got {:?}",
                name
            )));
        }

        self.functions.insert(name.to_string(), Arc::new(callback));
        Ok(())
    }

    /// Looks up a function, handing back a clone of its callback.
    pub fn resolve(&self, name: &str) -> Option<FunctionCallback> {
        self.functions.get(name).cloned()
    }

    /// True if `name` has a registered callback.
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Number of registered functions.
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl std::fmt::Debug for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Grammar").field("functions", &names).finish()
    }
}
