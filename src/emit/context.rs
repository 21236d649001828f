//! Per-scope emission state.
//!
//! A [`ContextStack`] always holds a module-level root; every function or closure body pushes a fresh
//! [`EmissionContext`] and pops it on exit. Rewrite policies look at the innermost entry; a backend may copy
//! state down from [`ContextStack::enclosing`] when a closure opens.

/// Mutable state for one function scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmissionContext {
    /// Count-implied constant value for the current `const` group
    pub sequence: usize,
    /// Next suffix for deferred-call wrappers
    pub deferred: usize,
    /// Receiver name rewritten to the implicit self reference
    pub receiver: Option<String>,
    /// Named-result declarations not yet written to the body
    pub result_decls: Vec<String>,
    /// Named results in declaration order, substituted into bare returns
    pub result_names: Vec<String>,
}

impl EmissionContext {
    pub fn reset_sequence(&mut self) {
        self.sequence = 0;
    }

    pub fn advance_sequence(&mut self) {
        self.sequence += 1;
    }

    /// Allocate the next deferred-wrapper name (`defer0`, `defer1`, ...).
    pub fn next_deferred_name(&mut self) -> String {
        let name = format!("defer{}", self.deferred);
        self.deferred += 1;
        name
    }

    pub fn is_receiver(&self, name: &str) -> bool {
        self.receiver.as_deref() == Some(name)
    }

    /// Record a named result: its declaration and its fill value for bare returns.
    pub fn declare_result(&mut self, declaration: String, name: &str) {
        self.result_decls.push(declaration);
        self.result_names.push(name.to_string());
    }

    /// Take the pending result declarations; they are written once per scope.
    pub fn take_result_decls(&mut self) -> Vec<String> {
        std::mem::take(&mut self.result_decls)
    }
}

/// Stack of emission contexts with a permanent module-level root.
#[derive(Debug, Clone)]
pub struct ContextStack {
    frames: Vec<EmissionContext>,
}

impl Default for ContextStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextStack {
    pub fn new() -> Self {
        Self {
            frames: vec![EmissionContext::default()],
        }
    }

    /// Enter a function or closure body with zeroed state.
    pub fn push(&mut self) {
        self.frames.push(EmissionContext::default());
        tracing::trace!(depth = self.depth(), "push context");
    }

    /// Leave the innermost function or closure body, discarding its state.
    ///
    /// # Panics
    ///
    /// Panics when only the root is left: an unbalanced pop is an engine bug.
    pub fn pop(&mut self) -> EmissionContext {
        assert!(self.frames.len() > 1, "INVARIANT: attempted to pop the module-level context");
        let frame = self.frames.pop().expect("INVARIANT: context stack is never empty");
        tracing::trace!(depth = self.depth(), "pop context");
        frame
    }

    /// Function/closure nesting depth (0 at module level).
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    pub fn current(&self) -> &EmissionContext {
        self.frames.last().expect("INVARIANT: context stack is never empty")
    }

    pub fn current_mut(&mut self) -> &mut EmissionContext {
        self.frames.last_mut().expect("INVARIANT: context stack is never empty")
    }

    /// The context one level out from the innermost; `None` at module level.
    pub fn enclosing(&self) -> Option<&EmissionContext> {
        let len = self.frames.len();
        if len < 2 { None } else { self.frames.get(len - 2) }
    }
}
