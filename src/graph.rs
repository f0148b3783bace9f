//! In-memory document object graph.
//!
//! [`ObjectStore`] owns the indirect objects of a document being built, [`DocumentGraph`]
//! pairs it with the document catalog, and [`ObjectGraph`] is the read-only view the
//! conformance rules traverse.

use crate::object::{Dictionary, Object, ObjectRef};
use indexmap::IndexMap;
use std::collections::HashSet;

/// Maximum number of reference hops followed when resolving an object.
const MAX_REFERENCE_DEPTH: usize = 32;

/// Maximum nesting of the page tree.
const MAX_PAGE_TREE_DEPTH: usize = 64;

/// Maximum nesting of a name tree.
const MAX_NAME_TREE_DEPTH: usize = 32;

static NULL_OBJECT: Object = Object::Null;

/// Read-only traversal over a document object graph.
///
/// Implementors only provide catalog and indirect-object lookup; reference resolution
/// and page-tree walking are derived from those.
pub trait ObjectGraph {
    /// The document catalog dictionary.
    fn catalog(&self) -> &Dictionary;

    /// Look up an indirect object.
    fn object(&self, reference: ObjectRef) -> Option<&Object>;

    /// Follow indirect references until a direct object is reached.
    ///
    /// Dangling references, and chains longer than the supported depth, resolve to the
    /// null object.
    fn resolve<'a>(&'a self, obj: &'a Object) -> &'a Object {
        let mut current = obj;
        for _ in 0..MAX_REFERENCE_DEPTH {
            match current {
                Object::Reference(r) => match self.object(*r) {
                    Some(target) => current = target,
                    None => return &NULL_OBJECT,
                },
                direct => return direct,
            }
        }
        &NULL_OBJECT
    }

    /// Look up a dictionary entry and resolve it.
    fn lookup<'a>(&'a self, dict: &'a Dictionary, key: &str) -> Option<&'a Object> {
        dict.get(key).map(|value| self.resolve(value))
    }

    /// Look up a catalog entry and resolve it.
    fn catalog_entry(&self, key: &str) -> Option<&Object> {
        self.lookup(self.catalog(), key)
    }

    /// Page dictionaries in page-tree order.
    fn pages(&self) -> Vec<&Dictionary> {
        let mut pages = Vec::new();
        let mut visited = HashSet::new();
        if let Some(root) = self.catalog().get("Pages") {
            collect_pages(self, root, 0, &mut visited, &mut pages);
        }
        pages
    }

    /// Leaf entries of a name tree as `(key, value)` pairs, in tree order.
    ///
    /// Values are returned unresolved. `/Kids` are followed recursively; revisited nodes
    /// and keys that are not strings are skipped.
    fn name_tree_entries<'a>(&'a self, root: &'a Object) -> Vec<(&'a [u8], &'a Object)> {
        let mut entries = Vec::new();
        let mut visited = HashSet::new();
        collect_name_tree(self, root, 0, &mut visited, &mut entries);
        entries
    }
}

fn collect_name_tree<'a, G: ObjectGraph + ?Sized>(
    graph: &'a G,
    node: &'a Object,
    depth: usize,
    visited: &mut HashSet<ObjectRef>,
    entries: &mut Vec<(&'a [u8], &'a Object)>,
) {
    if depth > MAX_NAME_TREE_DEPTH {
        log::warn!("Name tree deeper than {} levels, ignoring the rest", MAX_NAME_TREE_DEPTH);
        return;
    }
    if let Object::Reference(r) = node {
        if !visited.insert(*r) {
            log::warn!("Name tree cycle at {}", r);
            return;
        }
    }
    let Some(dict) = graph.resolve(node).as_dict() else {
        return;
    };

    if let Some(names) = graph.lookup(dict, "Names").and_then(Object::as_array) {
        for pair in names.chunks_exact(2) {
            if let Some(key) = graph.resolve(&pair[0]).as_string() {
                entries.push((key, &pair[1]));
            }
        }
    }

    if let Some(kids) = graph.lookup(dict, "Kids").and_then(Object::as_array) {
        for kid in kids {
            collect_name_tree(graph, kid, depth + 1, visited, entries);
        }
    }
}

fn collect_pages<'a, G: ObjectGraph + ?Sized>(
    graph: &'a G,
    node: &'a Object,
    depth: usize,
    visited: &mut HashSet<ObjectRef>,
    pages: &mut Vec<&'a Dictionary>,
) {
    if depth > MAX_PAGE_TREE_DEPTH {
        log::warn!("Page tree deeper than {} levels, ignoring the rest", MAX_PAGE_TREE_DEPTH);
        return;
    }
    if let Object::Reference(r) = node {
        if !visited.insert(*r) {
            log::warn!("Page tree cycle at {}", r);
            return;
        }
    }

    let Some(dict) = graph.resolve(node).as_dict() else {
        return;
    };

    match graph.lookup(dict, "Kids").and_then(Object::as_array) {
        Some(kids) => {
            for kid in kids {
                collect_pages(graph, kid, depth + 1, visited, pages);
            }
        },
        None => pages.push(dict),
    }
}

/// Store of indirect objects, numbered from 1 in allocation order.
#[derive(Debug, Clone)]
pub struct ObjectStore {
    objects: IndexMap<u32, Object>,
    next_id: u32,
}

impl Default for ObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            objects: IndexMap::new(),
            next_id: 1,
        }
    }

    /// Reserve an object number without storing an object yet.
    pub fn reserve(&mut self) -> ObjectRef {
        let id = self.next_id;
        self.next_id += 1;
        ObjectRef::new(id, 0)
    }

    /// Store a new indirect object and return its reference.
    pub fn add(&mut self, obj: Object) -> ObjectRef {
        let reference = self.reserve();
        self.objects.insert(reference.id, obj);
        reference
    }

    /// Store (or replace) the object behind a reserved reference.
    pub fn set(&mut self, reference: ObjectRef, obj: Object) {
        self.objects.insert(reference.id, obj);
    }

    /// Get an object.
    pub fn get(&self, reference: ObjectRef) -> Option<&Object> {
        self.objects.get(&reference.id)
    }

    /// Get an object mutably.
    pub fn get_mut(&mut self, reference: ObjectRef) -> Option<&mut Object> {
        self.objects.get_mut(&reference.id)
    }

    /// Iterate over stored objects in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectRef, &Object)> {
        self.objects
            .iter()
            .map(|(id, obj)| (ObjectRef::new(*id, 0), obj))
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether no objects are stored.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// The object number the next allocation will receive.
    ///
    /// This is also the `/Size` of the cross-reference table.
    pub fn next_id(&self) -> u32 {
        self.next_id
    }
}

/// A document catalog together with the indirect objects it references.
#[derive(Debug, Clone, Default)]
pub struct DocumentGraph {
    catalog: Dictionary,
    objects: ObjectStore,
}

impl DocumentGraph {
    /// Create a graph with a `/Type /Catalog` dictionary and no objects.
    pub fn new() -> Self {
        let mut catalog = Dictionary::new();
        catalog.insert("Type".to_string(), Object::Name("Catalog".to_string()));
        Self {
            catalog,
            objects: ObjectStore::new(),
        }
    }

    /// Create a graph from an existing catalog and store.
    pub fn from_parts(catalog: Dictionary, objects: ObjectStore) -> Self {
        Self { catalog, objects }
    }

    /// Mutable access to the catalog.
    pub fn catalog_mut(&mut self) -> &mut Dictionary {
        &mut self.catalog
    }

    /// The indirect objects.
    pub fn objects(&self) -> &ObjectStore {
        &self.objects
    }

    /// Mutable access to the indirect objects.
    pub fn objects_mut(&mut self) -> &mut ObjectStore {
        &mut self.objects
    }
}

impl ObjectGraph for DocumentGraph {
    fn catalog(&self) -> &Dictionary {
        &self.catalog
    }

    fn object(&self, reference: ObjectRef) -> Option<&Object> {
        self.objects.get(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(graph: &mut DocumentGraph, marker: i64) -> ObjectRef {
        let mut dict = Dictionary::new();
        dict.insert("Type".into(), Object::Name("Page".into()));
        dict.insert("Marker".into(), Object::Integer(marker));
        graph.objects_mut().add(Object::Dictionary(dict))
    }

    #[test]
    fn test_store_numbers_from_one() {
        let mut store = ObjectStore::new();
        let first = store.add(Object::Null);
        let reserved = store.reserve();
        let third = store.add(Object::Boolean(true));
        assert_eq!(first.id, 1);
        assert_eq!(reserved.id, 2);
        assert_eq!(third.id, 3);
        assert_eq!(store.len(), 2);
        assert_eq!(store.next_id(), 4);
        assert!(store.get(reserved).is_none());
    }

    #[test]
    fn test_resolve_follows_chain() {
        let mut graph = DocumentGraph::new();
        let target = graph.objects_mut().add(Object::Boolean(false));
        let hop = graph.objects_mut().add(Object::Reference(target));
        let start = Object::Reference(hop);
        assert_eq!(graph.resolve(&start), &Object::Boolean(false));
    }

    #[test]
    fn test_resolve_dangling_is_null() {
        let graph = DocumentGraph::new();
        let dangling = Object::Reference(ObjectRef::new(42, 0));
        assert!(graph.resolve(&dangling).is_null());
    }

    #[test]
    fn test_resolve_self_reference_terminates() {
        let mut graph = DocumentGraph::new();
        let r = graph.objects_mut().reserve();
        graph.objects_mut().set(r, Object::Reference(r));
        assert!(graph.resolve(&Object::Reference(r)).is_null());
    }

    #[test]
    fn test_pages_in_tree_order() {
        let mut graph = DocumentGraph::new();
        let first = page(&mut graph, 1);
        let second = page(&mut graph, 2);
        let third = page(&mut graph, 3);

        let mut inner = Dictionary::new();
        inner.insert("Type".into(), Object::Name("Pages".into()));
        inner.insert(
            "Kids".into(),
            Object::Array(vec![Object::Reference(second), Object::Reference(third)]),
        );
        let inner_ref = graph.objects_mut().add(Object::Dictionary(inner));

        let mut root = Dictionary::new();
        root.insert("Type".into(), Object::Name("Pages".into()));
        root.insert(
            "Kids".into(),
            Object::Array(vec![Object::Reference(first), Object::Reference(inner_ref)]),
        );
        let root_ref = graph.objects_mut().add(Object::Dictionary(root));
        graph
            .catalog_mut()
            .insert("Pages".into(), Object::Reference(root_ref));

        let markers: Vec<i64> = graph
            .pages()
            .iter()
            .filter_map(|p| p.get("Marker").and_then(Object::as_integer))
            .collect();
        assert_eq!(markers, vec![1, 2, 3]);
    }

    #[test]
    fn test_pages_cycle_is_ignored() {
        let mut graph = DocumentGraph::new();
        let root_ref = graph.objects_mut().reserve();
        let mut root = Dictionary::new();
        root.insert("Kids".into(), Object::Array(vec![Object::Reference(root_ref)]));
        graph.objects_mut().set(root_ref, Object::Dictionary(root));
        graph
            .catalog_mut()
            .insert("Pages".into(), Object::Reference(root_ref));

        assert!(graph.pages().is_empty());
    }

    #[test]
    fn test_name_tree_entries_follow_kids() {
        let mut graph = DocumentGraph::new();
        let leaf = graph.objects_mut().add(Object::Dictionary(
            [(
                "Names".to_string(),
                Object::Array(vec![
                    Object::String(b"b".to_vec()),
                    Object::Integer(2),
                    Object::String(b"c".to_vec()),
                    Object::Integer(3),
                ]),
            )]
            .into_iter()
            .collect(),
        ));
        let mut root = Dictionary::new();
        root.insert(
            "Names".into(),
            Object::Array(vec![Object::String(b"a".to_vec()), Object::Integer(1)]),
        );
        root.insert("Kids".into(), Object::Array(vec![Object::Reference(leaf), Object::Reference(leaf)]));
        let root = Object::Dictionary(root);

        let keys: Vec<(&[u8], i64)> = graph
            .name_tree_entries(&root)
            .into_iter()
            .filter_map(|(key, value)| value.as_integer().map(|v| (key, v)))
            .collect();
        assert_eq!(keys, vec![(&b"a"[..], 1), (&b"b"[..], 2), (&b"c"[..], 3)]);
    }
}
