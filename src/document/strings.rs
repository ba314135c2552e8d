//! String interning pool.
//!
//! Every string in a document (structure names, keywords, string and
//! reference values) is stored once in a shared buffer and addressed by id.
//! Id 0 is reserved for the empty string, which also stands for "unnamed"
//! and for the `null` reference.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// Index of a string in a [`StringPool`].
pub(crate) type StringId = u32;

/// Deduplicating string storage owned by a document.
#[derive(Debug)]
pub struct StringPool {
    /// (offset, length) into `data`, indexed by string id
    entries: Vec<(usize, usize)>,
    /// Concatenated string contents
    data: String,
    /// Hash of content -> ids with that hash
    hash_index: HashMap<u64, Vec<StringId>>,
}

impl Default for StringPool {
    fn default() -> Self {
        Self::new()
    }
}

impl StringPool {
    pub fn new() -> Self {
        let mut pool = StringPool {
            entries: Vec::with_capacity(64),
            data: String::with_capacity(1024),
            hash_index: HashMap::new(),
        };
        pool.entries.push((0, 0));
        pool
    }

    fn compute_hash(s: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        s.hash(&mut hasher);
        hasher.finish()
    }

    /// Intern a string, returning the id of an existing copy if there is one.
    pub(crate) fn intern(&mut self, s: &str) -> StringId {
        if s.is_empty() {
            return 0;
        }

        let hash = Self::compute_hash(s);
        if let Some(ids) = self.hash_index.get(&hash) {
            for &id in ids {
                if self.get(id) == s {
                    return id;
                }
            }
        }

        let id = StringId::try_from(self.entries.len())
            .unwrap_or_else(|_| panic!("openddl::StringPool::intern(): too many strings"));
        self.entries.push((self.data.len(), s.len()));
        self.data.push_str(s);
        self.hash_index.entry(hash).or_default().push(id);
        id
    }

    /// Look up an interned string. Unknown ids read as the empty string.
    pub(crate) fn get(&self, id: StringId) -> &str {
        match self.entries.get(id as usize) {
            Some(&(start, len)) => &self.data[start..start + len],
            None => "",
        }
    }

    /// Number of distinct strings, including the reserved empty string.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether only the reserved empty string is present.
    pub fn is_empty(&self) -> bool {
        self.entries.len() == 1
    }

    /// Total bytes of string content.
    pub fn byte_len(&self) -> usize {
        self.data.len()
    }
}
