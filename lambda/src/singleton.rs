use std::{cell::RefCell, fmt};

use parking_lot::ReentrantMutex;

use crate::{Callable, Error, Function, Proto, Result, Signature, Value};

enum State {
    Idle,
    Running,
    Done(Result<Value>),
    Poisoned,
}

/// Marks the state poisoned if the run unwinds before storing an outcome.
struct RunGuard<'a> {
    state: &'a RefCell<State>,
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.state.borrow_mut();
        if matches!(*state, State::Running) {
            *state = State::Poisoned;
        }
    }
}

/// Runs its target once and replays the outcome forever after.
///
/// The check/run/store sequence happens under one guard, so concurrent first
/// calls still run the target only once. The guard is re-entrant: a target
/// calling back into its own singleton gets `SingletonReentered` instead of
/// deadlocking. A target that panics leaves the singleton poisoned; later
/// calls get `SingletonPoisoned` and the target never runs again.
pub struct Singleton {
    target: Function,
    signature: Signature,
    state: ReentrantMutex<RefCell<State>>,
}

/// Wrap `target` so it is invoked at most once.
pub fn singleton(target: Function) -> Function {
    Function::new(Singleton::new(target))
}

impl Singleton {
    pub fn new(target: Function) -> Self {
        Self {
            target,
            signature: Signature::new(),
            state: ReentrantMutex::new(RefCell::new(State::Idle)),
        }
    }

    #[inline]
    pub fn target(&self) -> &Function {
        &self.target
    }

    pub fn has_run(&self) -> bool {
        matches!(*self.state.lock().borrow(), State::Done(_))
    }
}

impl Callable for Singleton {
    fn name(&self) -> &str {
        self.target.name()
    }

    fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Arguments are ignored; the target runs with none.
    fn call(&self, this: Option<&Proto>, _args: &[Value]) -> Result<Value> {
        let guard = self.state.lock();

        match &*guard.borrow() {
            State::Done(outcome) => return outcome.clone(),
            State::Running => {
                return Err(Error::SingletonReentered {
                    function: self.name().into(),
                });
            }
            State::Poisoned => {
                return Err(Error::SingletonPoisoned {
                    function: self.name().into(),
                });
            }
            State::Idle => {}
        }

        *guard.borrow_mut() = State::Running;
        let _run = RunGuard { state: &*guard };
        log::debug!("singleton `{}`: first run", self.name());
        let outcome = self.target.call_with(this, &[]);
        *guard.borrow_mut() = State::Done(outcome.clone());
        outcome
    }
}

impl fmt::Debug for Singleton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<singleton {}>", self.name())
    }
}
