//! Insertion-ordered string set used to build de-duplicated output lists

/// Keeps the first occurrence of each entry, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedSet {
    items: Vec<String>,
}

impl OrderedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert if absent. Returns true when the entry was new.
    pub fn insert(&mut self, item: impl Into<String>) -> bool {
        let item = item.into();
        if self.items.contains(&item) {
            return false;
        }
        self.items.push(item);
        true
    }

    pub fn extend<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for item in items {
            self.insert(item);
        }
    }

    pub fn into_vec(self) -> Vec<String> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_first_occurrence_order() {
        let mut set = OrderedSet::new();
        set.extend(["rest", "fluids", "rest", "bland diet", "fluids"]);
        assert_eq!(set.into_vec(), vec!["rest", "fluids", "bland diet"]);
    }

    #[test]
    fn insert_reports_novelty() {
        let mut set = OrderedSet::new();
        assert!(set.insert("rest"));
        assert!(!set.insert("rest"));
        assert_eq!(set.into_vec(), vec!["rest"]);
    }
}
