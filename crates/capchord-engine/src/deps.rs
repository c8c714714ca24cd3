// ---- Collaborator abstractions ----
//
// The engine drives three outside capabilities. Each is a trait so tests can
// substitute recorders, and each has a blanket impl for plain closures.

/// Renders one line of chord feedback.
pub trait Display: Send {
    /// Replace the visible feedback with `text` (possibly empty).
    fn display(&self, text: &str);
}

/// Executes the macro of a completed command.
pub trait MacroRunner<M>: Send {
    /// Run `payload`; failures are the runner's concern.
    fn run(&self, payload: &M);
}

/// Reports which application currently holds input focus.
pub trait FocusSource: Send {
    /// Identifier of the focused application, empty when unknown.
    fn active_application(&self) -> String;
}

impl<F> Display for F
where
    F: Fn(&str) + Send,
{
    fn display(&self, text: &str) {
        self(text)
    }
}

impl<M, F> MacroRunner<M> for F
where
    F: Fn(&M) + Send,
{
    fn run(&self, payload: &M) {
        self(payload)
    }
}

impl<F> FocusSource for F
where
    F: Fn() -> String + Send,
{
    fn active_application(&self) -> String {
        self()
    }
}

/// Focus source that always reports the same application.
#[derive(Debug, Clone, Default)]
pub struct StaticFocus {
    /// Reported application name.
    app: String,
}

impl StaticFocus {
    /// Always report `app`.
    pub fn new(app: impl Into<String>) -> Self {
        Self { app: app.into() }
    }
}

impl FocusSource for StaticFocus {
    fn active_application(&self) -> String {
        self.app.clone()
    }
}
