use std::collections::BTreeMap;

/// Largest byte offset the fixed 10-digit cross-reference field can carry.
pub const MAX_XREF_OFFSET: u64 = 9_999_999_999;

/// Cross-reference table under construction, one entry per written object.
pub struct Xref {
    /// In-use entries keyed by object number. Id 0 is the synthetic free
    /// entry and never appears here.
    pub entries: BTreeMap<u32, XrefEntry>,

    /// Total table size: highest object id plus one.
    pub size: u32,
}

pub struct XrefEntry {
    pub offset: u64,
    pub generation: u16,
}

impl Xref {
    pub fn new(size: u32) -> Xref {
        Xref {
            entries: BTreeMap::new(),
            size,
        }
    }

    pub fn get(&self, id: u32) -> Option<&XrefEntry> {
        self.entries.get(&id)
    }

    pub fn insert(&mut self, id: u32, entry: XrefEntry) {
        self.entries.insert(id, entry);
    }
}
