/// One tab container: exactly one tab is active, the first by default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabGroup {
    len: usize,
    active: usize,
}

impl TabGroup {
    pub fn new(len: usize) -> Self {
        Self { len, active: 0 }
    }

    pub fn active(&self) -> Option<usize> {
        (self.len > 0).then_some(self.active)
    }

    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.len || index == self.active {
            return false;
        }
        self.active = index;
        true
    }
}

/// Accordion items open and close independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accordion {
    open: Vec<bool>,
}

impl Accordion {
    pub fn new(len: usize) -> Self {
        Self {
            open: vec![false; len],
        }
    }

    pub fn is_open(&self, item: usize) -> bool {
        self.open.get(item).copied().unwrap_or(false)
    }

    pub fn toggle(&mut self, item: usize) -> bool {
        match self.open.get_mut(item) {
            Some(open) => {
                *open = !*open;
                *open
            }
            None => false,
        }
    }
}
