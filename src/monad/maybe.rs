use crate::value::Named;

#[derive(Clone, Debug, PartialEq)]
pub enum Maybe<A> {
    Just(A),
    Nothing,
}

impl<A: 'static> Named for Maybe<A> {
    const NAME: &'static str = "Maybe";
}

impl<A> Maybe<A> {
    pub fn of(value: A) -> Self {
        Maybe::Just(value)
    }

    pub fn just(value: A) -> Self {
        Maybe::Just(value)
    }

    pub fn nothing() -> Self {
        Maybe::Nothing
    }

    /// `Nothing` when `value` equals the `nothing` sentinel.
    pub fn from_value(value: A, nothing: &A) -> Self
    where
        A: PartialEq,
    {
        if &value == nothing { Maybe::Nothing } else { Maybe::Just(value) }
    }

    pub fn is_just(&self) -> bool {
        matches!(self, Maybe::Just(_))
    }

    pub fn is_nothing(&self) -> bool {
        !self.is_just()
    }

    pub fn map<B>(self, f: impl FnOnce(A) -> B) -> Maybe<B> {
        self.bind(|a| Maybe::Just(f(a)))
    }

    pub fn bind<B>(self, f: impl FnOnce(A) -> Maybe<B>) -> Maybe<B> {
        match self {
            Maybe::Just(a) => f(a),
            Maybe::Nothing => Maybe::Nothing,
        }
    }

    /// Apply `f` and unwrap; `None` for `Nothing`.
    pub fn flat_map<B>(self, f: impl FnOnce(A) -> B) -> Option<B> {
        match self {
            Maybe::Just(a) => Some(f(a)),
            Maybe::Nothing => None,
        }
    }

    pub fn get_or_else(self, default: A) -> A {
        match self {
            Maybe::Just(a) => a,
            Maybe::Nothing => default,
        }
    }

    pub fn filter(self, pred: impl FnOnce(&A) -> bool) -> Self {
        match self {
            Maybe::Just(a) if pred(&a) => Maybe::Just(a),
            _ => Maybe::Nothing,
        }
    }

    pub fn or_else(self, other: Self) -> Self {
        match self {
            Maybe::Nothing => other,
            just => just,
        }
    }

    /// Lift a binary function; any `Nothing` argument short-circuits.
    pub fn lift2<B, C>(f: impl Fn(A, B) -> C) -> impl Fn(Maybe<A>, Maybe<B>) -> Maybe<C> {
        move |a, b| match (a, b) {
            (Maybe::Just(a), Maybe::Just(b)) => Maybe::Just(f(a, b)),
            _ => Maybe::Nothing,
        }
    }
}

impl<F> Maybe<F> {
    pub fn ap<A, B>(self, arg: Maybe<A>) -> Maybe<B>
    where
        F: FnOnce(A) -> B,
    {
        self.bind(|f| arg.map(f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_and_extraction() {
        assert_eq!(Maybe::from_value(0, &0), Maybe::Nothing);
        assert_eq!(Maybe::from_value(4, &0), Maybe::Just(4));
        assert_eq!(Maybe::<i32>::nothing().get_or_else(9), 9);
        assert_eq!(Maybe::just(3).flat_map(|x| x + 1), Some(4));
        assert!(Maybe::just(3).filter(|x| *x > 5).is_nothing());
        assert_eq!(Maybe::nothing().or_else(Maybe::just(1)), Maybe::just(1));
    }

    #[test]
    fn ap_and_lift() {
        let f = Maybe::just(|x: i32| x * 3);
        assert_eq!(f.ap(Maybe::just(4)), Maybe::just(12));
        let add = Maybe::lift2(|a: i32, b: i32| a + b);
        assert_eq!(add(Maybe::just(1), Maybe::just(2)), Maybe::just(3));
        assert_eq!(add(Maybe::just(1), Maybe::nothing()), Maybe::nothing());
    }
}
