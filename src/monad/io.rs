use std::fmt;

use crate::value::Named;

/// A deferred computation. Nothing runs until [`IO::exec`].
pub struct IO<A> {
    op: Box<dyn FnOnce() -> A>,
}

impl<A: 'static> Named for IO<A> {
    const NAME: &'static str = "IO";
}

impl<A> fmt::Debug for IO<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("IO(..)")
    }
}

impl<A: 'static> IO<A> {
    pub fn new(op: impl FnOnce() -> A + 'static) -> Self {
        Self { op: Box::new(op) }
    }

    pub fn of(value: A) -> Self {
        Self::new(move || value)
    }

    pub fn exec(self) -> A {
        (self.op)()
    }

    pub fn map<B: 'static>(self, f: impl FnOnce(A) -> B + 'static) -> IO<B> {
        IO::new(move || f(self.exec()))
    }

    pub fn bind<B: 'static>(self, f: impl FnOnce(A) -> IO<B> + 'static) -> IO<B> {
        IO::new(move || f(self.exec()).exec())
    }

    /// Run now and apply `f` to the result.
    pub fn flat_map<B>(self, f: impl FnOnce(A) -> B) -> B {
        f(self.exec())
    }
}

impl<F: 'static> IO<F> {
    pub fn ap<A: 'static, B: 'static>(self, arg: IO<A>) -> IO<B>
    where
        F: FnOnce(A) -> B,
    {
        IO::new(move || (self.exec())(arg.exec()))
    }
}
