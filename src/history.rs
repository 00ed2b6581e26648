use findlight_search::SearchOptions;

/// Most-recent-first list of searches with a fixed capacity. Entries are
/// unique by keyword.
#[derive(Debug, Clone)]
pub struct SearchList {
    entries: Vec<SearchOptions>,
    capacity: usize,
}

impl SearchList {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Moves `item` to the front, replacing any entry with the same keyword
    /// and dropping the oldest entries past capacity.
    pub fn record(&mut self, item: SearchOptions) {
        self.entries.retain(|entry| entry.keyword != item.keyword);
        self.entries.insert(0, item);
        self.entries.truncate(self.capacity);
    }

    pub fn remove(&mut self, keyword: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.keyword != keyword);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, index: usize) -> Option<&SearchOptions> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SearchOptions> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
