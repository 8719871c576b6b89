use crate::value::Named;

/// Non-determinism over a list of outcomes.
#[derive(Clone, Debug, PartialEq)]
pub struct ListMonad<A>(Vec<A>);

impl<A: 'static> Named for ListMonad<A> {
    const NAME: &'static str = "ListMonad";
}

impl<A> From<Vec<A>> for ListMonad<A> {
    fn from(items: Vec<A>) -> Self {
        Self(items)
    }
}

impl<A> ListMonad<A> {
    pub fn of(value: A) -> Self {
        Self(vec![value])
    }

    pub fn extract(self) -> Vec<A> {
        self.0
    }

    pub fn map<B>(self, f: impl FnMut(A) -> B) -> ListMonad<B> {
        ListMonad(self.0.into_iter().map(f).collect())
    }

    /// Concatenating map.
    pub fn bind<B>(self, mut f: impl FnMut(A) -> ListMonad<B>) -> ListMonad<B> {
        ListMonad(self.0.into_iter().flat_map(|a| f(a).0).collect())
    }

    pub fn flat_map<B>(self, f: impl FnMut(A) -> B) -> Vec<B> {
        self.map(f).extract()
    }
}

impl<F> ListMonad<F> {
    /// Every function applied to every argument, functions outermost.
    pub fn ap<A: Clone, B>(self, args: ListMonad<A>) -> ListMonad<B>
    where
        F: Fn(A) -> B,
    {
        ListMonad(
            self.0
                .iter()
                .flat_map(|f| args.0.iter().cloned().map(f))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ap_is_cartesian() {
        type Op = Box<dyn Fn(i32) -> i32>;
        let inc: Op = Box::new(|x| x + 1);
        let tens: Op = Box::new(|x| x * 10);
        let fs = ListMonad::from(vec![inc, tens]);
        assert_eq!(fs.ap(ListMonad::from(vec![1, 2])).extract(), vec![2, 3, 10, 20]);
    }

    #[test]
    fn flat_map_extracts() {
        assert_eq!(ListMonad::from(vec![1, 2]).flat_map(|x| x * 2), vec![2, 4]);
    }
}
