//! Actions run when a state becomes active.

use super::HookError;

/// Side-effecting work attached to a state.
///
/// Actions receive the caller's context mutably and signal failure through
/// the returned `Result`. The engine runs them in order each time their
/// state is entered through a transition and stops at the first failure.
pub trait Action<C>: Send + Sync {
    /// Run the action against the caller's context.
    fn run(&self, ctx: &mut C) -> Result<(), HookError>;

    /// Label used in errors, logs and graph exports.
    ///
    /// Defaults to the implementing type's name.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Action backed by a closure.
///
/// # Example
///
/// ```rust
/// use gearshift::core::{Action, FnAction};
///
/// let bump = FnAction::new("bump", |count: &mut u32| {
///     *count += 1;
///     Ok(())
/// });
///
/// let mut count = 0;
/// bump.run(&mut count).unwrap();
/// assert_eq!(count, 1);
/// assert_eq!(bump.name(), "bump");
/// ```
pub struct FnAction<C> {
    name: String,
    run: Box<dyn Fn(&mut C) -> Result<(), HookError> + Send + Sync>,
}

impl<C> FnAction<C> {
    pub fn new<F>(name: impl Into<String>, run: F) -> Self
    where
        F: Fn(&mut C) -> Result<(), HookError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            run: Box::new(run),
        }
    }
}

impl<C> Action<C> for FnAction<C> {
    fn run(&self, ctx: &mut C) -> Result<(), HookError> {
        (self.run)(ctx)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
