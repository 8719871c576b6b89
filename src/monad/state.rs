use std::fmt;
use std::rc::Rc;

use crate::value::Named;

/// A state transition `S -> (A, S)`.
pub struct State<S, A> {
    run: Rc<dyn Fn(S) -> (A, S)>,
}

impl<S: 'static, A: 'static> Named for State<S, A> {
    const NAME: &'static str = "State";
}

impl<S, A> Clone for State<S, A> {
    fn clone(&self) -> Self {
        Self { run: self.run.clone() }
    }
}

impl<S, A> fmt::Debug for State<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("State(..)")
    }
}

impl<S: 'static, A: 'static> State<S, A> {
    pub fn new(run: impl Fn(S) -> (A, S) + 'static) -> Self {
        Self { run: Rc::new(run) }
    }

    pub fn of(value: A) -> Self
    where
        A: Clone,
    {
        Self::new(move |s| (value.clone(), s))
    }

    pub fn run(&self, state: S) -> (A, S) {
        (self.run)(state)
    }

    pub fn map<B: 'static>(self, f: impl Fn(A) -> B + 'static) -> State<S, B> {
        State::new(move |s| {
            let (a, s) = self.run(s);
            (f(a), s)
        })
    }

    pub fn bind<B: 'static>(self, f: impl Fn(A) -> State<S, B> + 'static) -> State<S, B> {
        State::new(move |s| {
            let (a, s) = self.run(s);
            f(a).run(s)
        })
    }

    /// Run from `initial` and apply `f` to the produced value.
    pub fn flat_map<B>(&self, initial: S, f: impl FnOnce(A) -> B) -> B {
        f(self.run(initial).0)
    }
}

impl<S: 'static, F: 'static> State<S, F> {
    pub fn ap<A: 'static, B: 'static>(self, arg: State<S, A>) -> State<S, B>
    where
        F: Fn(A) -> B,
    {
        State::new(move |s| {
            let (f, s) = self.run(s);
            let (a, s) = arg.run(s);
            (f(a), s)
        })
    }
}

impl<S: Clone + 'static> State<S, S> {
    /// Expose the current state as the value.
    pub fn get() -> Self {
        State::new(|s: S| (s.clone(), s))
    }
}

impl<S: Clone + 'static> State<S, ()> {
    pub fn put(state: S) -> Self {
        State::new(move |_| ((), state.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter() {
        let tick = State::<i32, i32>::get().bind(|n| State::put(n + 1).map(move |_| n));
        let twice = tick.clone().bind(move |_| tick.clone());
        assert_eq!(twice.run(5), (6, 7));
    }

    #[test]
    fn ap_threads_state() {
        let f = State::new(|s: i32| (move |x: i32| x + s, s * 2));
        let arg = State::new(|s: i32| (s, s + 1));
        assert_eq!(f.ap(arg).run(3), (9, 7));
        assert_eq!(State::<i32, i32>::of(2).flat_map(0, |x| x * 5), 10);
    }
}
