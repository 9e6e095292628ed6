/// A LIFO stack of tokens or values.
#[derive(Debug)]
pub(crate) struct Stack<T> {
    values: Vec<T>,
}

impl<T> Stack<T> {
    pub(crate) fn new() -> Self {
        Self { values: Vec::new() }
    }

    pub(crate) fn push(&mut self, value: T) {
        self.values.push(value);
    }

    pub(crate) fn pop(&mut self) -> Option<T> {
        self.values.pop()
    }

    pub(crate) fn peek(&self) -> Option<&T> {
        self.values.last()
    }

    /// Moves every element into `out`, top of the stack first.
    pub(crate) fn empty_into(&mut self, out: &mut Vec<T>) {
        out.extend(self.values.drain(..).rev());
    }
}
