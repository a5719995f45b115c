/// The untried options at one depth of an iterative depth-first search
pub(crate) struct Branch<T> {
    options: Vec<T>,
    next: usize,
}

impl<T: Copy> Branch<T> {
    pub fn new(options: Vec<T>) -> Self {
        Self { options, next: 0 }
    }

    /// Takes the next untried option
    pub fn next_option(&mut self) -> Option<T> {
        let option = self.options.get(self.next).copied();
        self.next += 1;
        option
    }
}

#[cfg(test)]
mod tests {
    use super::Branch;

    #[test]
    fn options_in_order() {
        let mut branch = Branch::new(vec![3, 1]);
        assert_eq!(Some(3), branch.next_option());
        assert_eq!(Some(1), branch.next_option());
        assert_eq!(None, branch.next_option());
        assert_eq!(None, branch.next_option());
    }
}
