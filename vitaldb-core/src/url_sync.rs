use url::form_urlencoded;

use crate::table::{TableQuery, query};

/// Where the table state is persisted: the page URL's query string.
pub trait Location {
    /// The current query string, without the leading `?`.
    fn query(&self) -> String;
    /// Replaces the query string in place, without adding a history entry.
    fn replace_query(&mut self, query: &str);
}

/// A [`Location`] held in memory, for front ends without a real URL bar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryLocation {
    query: String,
    replacements: usize,
}
impl MemoryLocation {
    pub fn new(query: impl Into<String>) -> Self {
        let query = query.into();
        Self {
            query: query.strip_prefix('?').unwrap_or(&query).to_string(),
            replacements: 0,
        }
    }

    /// How many times the query has been replaced.
    pub fn replacements(&self) -> usize {
        self.replacements
    }
}
impl Location for MemoryLocation {
    fn query(&self) -> String {
        self.query.clone()
    }

    fn replace_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.replacements += 1;
    }
}

/// Keeps a [`Location`] in step with the table state.
///
/// The location is read exactly once, on [`UrlSync::mount`]. After that, state
/// only flows outwards: [`UrlSync::write`] replaces the query string and never
/// re-reads it, so a write can't feed back into the state. Keys the table
/// doesn't own (e.g. `tracks`) are carried through unchanged.
#[derive(Debug)]
pub struct UrlSync<L> {
    location: L,
    foreign: Vec<(String, String)>,
    last_written: String,
}
impl<L: Location> UrlSync<L> {
    pub fn mount(location: L) -> (Self, TableQuery) {
        let current = location.query();
        let current = current.strip_prefix('?').unwrap_or(&current).to_string();
        let table_query = query::parse(&current);
        let foreign = form_urlencoded::parse(current.as_bytes())
            .into_owned()
            .filter(|(key, _)| !query::is_table_key(key))
            .collect();

        (
            Self {
                location,
                foreign,
                last_written: current,
            },
            table_query,
        )
    }

    /// Writes `table_query` to the location, unless it would produce the query
    /// string already there. Returns whether the location was touched.
    pub fn write(&mut self, table_query: &TableQuery) -> bool {
        let encoded = self.encode(table_query);
        if encoded == self.last_written {
            return false;
        }

        tracing::trace!("replacing query string with `{encoded}`");
        self.location.replace_query(&encoded);
        self.last_written = encoded;
        true
    }

    /// The query string `table_query` would be written as.
    pub fn encode(&self, table_query: &TableQuery) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.foreign {
            serializer.append_pair(key, value);
        }
        query::append_pairs(&mut serializer, table_query);
        serializer.finish()
    }

    pub fn location(&self) -> &L {
        &self.location
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitaldb_state::Field;

    #[test]
    fn mount_reads_the_location_once() {
        let location = MemoryLocation::new("?q=lar&page=2");
        let (sync, query) = UrlSync::mount(location);
        assert_eq!(query.criteria.search(), "lar");
        assert_eq!(query.page.current_page(), 2);
        assert_eq!(sync.location().replacements(), 0);
    }

    #[test]
    fn writes_replace_and_skip_duplicates() {
        let (mut sync, mut query) = UrlSync::mount(MemoryLocation::default());

        assert!(!sync.write(&query));
        assert_eq!(sync.location().replacements(), 0);

        query.criteria.set_search("lar");
        assert!(sync.write(&query));
        assert_eq!(sync.location().query(), "q=lar");

        assert!(!sync.write(&query));
        assert_eq!(sync.location().replacements(), 1);
    }

    #[test]
    fn foreign_keys_are_preserved() {
        let (mut sync, mut query) =
            UrlSync::mount(MemoryLocation::new("tracks=BIS%2FBIS%2CSolar8000%2FHR&sort=age"));
        assert_eq!(query.sort.field, Field::Age);

        query.sort.toggle(Field::Age);
        sync.write(&query);
        assert_eq!(
            sync.location().query(),
            "tracks=BIS%2FBIS%2CSolar8000%2FHR&sort=age&dir=desc"
        );
    }

    #[test]
    fn non_canonical_urls_are_normalised_on_first_write() {
        let (mut sync, query) = UrlSync::mount(MemoryLocation::new("page=1&limit=10&sort=id"));
        assert_eq!(query, TableQuery::default());
        assert!(sync.write(&query));
        assert_eq!(sync.location().query(), "");
    }
}
