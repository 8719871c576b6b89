use std::fmt;
use std::rc::Rc;

use crate::value::Named;

/// A computation reading from a shared environment `E`.
pub struct Reader<E, A> {
    action: Rc<dyn Fn(&E) -> A>,
}

impl<E: 'static, A: 'static> Named for Reader<E, A> {
    const NAME: &'static str = "Reader";
}

impl<E, A> Clone for Reader<E, A> {
    fn clone(&self) -> Self {
        Self { action: self.action.clone() }
    }
}

impl<E, A> fmt::Debug for Reader<E, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Reader(..)")
    }
}

impl<E: 'static, A: 'static> Reader<E, A> {
    pub fn new(action: impl Fn(&E) -> A + 'static) -> Self {
        Self { action: Rc::new(action) }
    }

    pub fn of(value: A) -> Self
    where
        A: Clone,
    {
        Self::new(move |_| value.clone())
    }

    pub fn run(&self, env: &E) -> A {
        (self.action)(env)
    }

    pub fn map<B: 'static>(self, f: impl Fn(A) -> B + 'static) -> Reader<E, B> {
        Reader::new(move |env| f(self.run(env)))
    }

    pub fn bind<B: 'static>(self, f: impl Fn(A) -> Reader<E, B> + 'static) -> Reader<E, B> {
        Reader::new(move |env| f(self.run(env)).run(env))
    }

    pub fn flat_map<B>(&self, env: &E, f: impl FnOnce(A) -> B) -> B {
        f(self.run(env))
    }
}

impl<E: 'static, F: 'static> Reader<E, F> {
    pub fn ap<A: 'static, B: 'static>(self, arg: Reader<E, A>) -> Reader<E, B>
    where
        F: Fn(A) -> B,
    {
        Reader::new(move |env| (self.run(env))(arg.run(env)))
    }
}

impl<E: Clone + 'static> Reader<E, E> {
    /// The environment itself.
    pub fn ask() -> Self {
        Reader::new(E::clone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_environment() {
        let greet = Reader::<String, String>::ask().map(|name| format!("hello {name}"));
        assert_eq!(greet.run(&"chemem".to_string()), "hello chemem");
    }

    #[test]
    fn ap_shares_environment() {
        let f = Reader::new(|env: &i32| {
            let env = *env;
            move |x: i32| x * env
        });
        let arg = Reader::new(|env: &i32| env + 1);
        assert_eq!(f.ap(arg).run(&3), 12);
        assert_eq!(Reader::<i32, i32>::of(1).flat_map(&0, |x| x + 1), 2);
    }
}
