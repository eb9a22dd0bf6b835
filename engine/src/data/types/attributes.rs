//! Attribute bag lookup
//!
//! Records carry an open-ended `name -> string` map for everything outside the
//! fixed schema. Filters only need read access by exact name.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Read-only attribute lookup by exact (case-sensitive) name
pub trait Attributes {
    fn get(&self, name: &str) -> Option<&str>;
}

impl<S: BuildHasher> Attributes for HashMap<String, String, S> {
    fn get(&self, name: &str) -> Option<&str> {
        HashMap::get(self, name).map(String::as_str)
    }
}

impl Attributes for BTreeMap<String, String> {
    fn get(&self, name: &str) -> Option<&str> {
        BTreeMap::get(self, name).map(String::as_str)
    }
}

impl Attributes for [(String, String)] {
    fn get(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

impl Attributes for Vec<(String, String)> {
    fn get(&self, name: &str) -> Option<&str> {
        Attributes::get(self.as_slice(), name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<A: Attributes + ?Sized>(attrs: &A, name: &str) -> Option<String> {
        attrs.get(name).map(str::to_string)
    }

    #[test]
    fn hashmap_lookup_is_exact() {
        let attrs: HashMap<String, String> =
            [("http.status_code".to_string(), "500".to_string())].into();
        assert_eq!(lookup(&attrs, "http.status_code").as_deref(), Some("500"));
        assert_eq!(lookup(&attrs, "HTTP.STATUS_CODE"), None);
    }

    #[test]
    fn btreemap_lookup() {
        let attrs: BTreeMap<String, String> = [("env".to_string(), "prod".to_string())].into();
        assert_eq!(lookup(&attrs, "env").as_deref(), Some("prod"));
        assert_eq!(lookup(&attrs, "region"), None);
    }

    #[test]
    fn pair_list_returns_first_match() {
        let attrs = vec![
            ("k".to_string(), "first".to_string()),
            ("k".to_string(), "second".to_string()),
        ];
        assert_eq!(lookup(&attrs, "k").as_deref(), Some("first"));
        assert_eq!(lookup(attrs.as_slice(), "missing"), None);
    }

    #[test]
    fn empty_value_is_present() {
        let attrs: HashMap<String, String> = [("empty".to_string(), String::new())].into();
        assert_eq!(lookup(&attrs, "empty").as_deref(), Some(""));
    }
}
