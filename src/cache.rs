//! File-backed record store for scrape results.
//!
//! Records for one page live under
//! `<root>/<domain>/<page dir>/<YYYY-MM-DD>/<HH:MM:SS> <action>`.
//! Writes go to disk and to an in-memory map; a fresh store only sees what
//! is already on disk after [`RecordStore::load`]. Nothing is locked, so two
//! processes writing the same page in the same second overwrite each other.

use crate::config::ScrapeConfig;
use crate::error::{Error, Result};
use crate::report;
use crate::results::{Query, QueryId};
use crate::utils::{format_date, format_time, page_dir_name};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Dated cache of the queries captured for one page
#[derive(Debug)]
pub struct RecordStore {
    root: PathBuf,
    path: PathBuf,
    persist_text: bool,
    records: BTreeMap<QueryId, Query>,
}

impl RecordStore {
    /// Create the store for a page's domain and URL path
    pub fn for_page(config: &ScrapeConfig, domain: &str, page_path: &str) -> Self {
        let path = config
            .cache_root
            .join(domain)
            .join(page_dir_name(page_path, &config.homepage_marker));

        Self {
            root: config.cache_root.clone(),
            path,
            persist_text: config.persist_text,
            records: BTreeMap::new(),
        }
    }

    /// Root directory shared by every page's store
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding this page's dated records
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding this page's records for `date`
    pub fn date_path(&self, date: NaiveDate) -> PathBuf {
        self.path.join(format_date(date))
    }

    /// Write a query under its capture date and time, then remember it
    pub fn store(&mut self, query: &Query) -> Result<PathBuf> {
        let name = format!("{} {}", format_time(query.time), query.action());
        self.store_as(query, &name)
    }

    /// Write a query under an explicit file name, then remember it
    pub fn store_as(&mut self, query: &Query, name: &str) -> Result<PathBuf> {
        let date_path = self.date_path(query.date);
        fs::create_dir_all(&date_path)?;

        let file_path = date_path.join(name);
        report::write(&file_path, query, self.persist_text)?;
        self.records.insert(query.id(), query.clone());

        ::log::info!(
            "Cached {} query for {} at {}",
            query.action(),
            query.url,
            file_path.display()
        );
        Ok(file_path)
    }

    /// Read every report for `date` (or every date) into memory.
    ///
    /// All reports are parsed before any is inserted, so a malformed file
    /// leaves the in-memory records untouched. Returns the number of
    /// reports read.
    pub fn load(&mut self, date: Option<NaiveDate>) -> Result<usize> {
        let target = self.target(date)?;

        let mut files = Vec::new();
        collect_files(&target, &mut files)?;
        ::log::debug!("Found {} reports under {}", files.len(), target.display());

        let queries = files
            .iter()
            .map(|file| report::read(file))
            .collect::<Result<Vec<_>>>()?;

        let count = queries.len();
        for query in queries {
            self.records.insert(query.id(), query);
        }

        ::log::info!("Loaded {} records from {}", count, target.display());
        Ok(count)
    }

    /// Delete every entry under `date` (or every date) on disk.
    ///
    /// The target directory itself is kept and in-memory records are not
    /// touched.
    pub fn clear(&self, date: Option<NaiveDate>) -> Result<()> {
        let target = self.target(date)?;

        for entry in fs::read_dir(&target)? {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type()?.is_dir() {
                fs::remove_dir_all(&path)?;
            } else {
                fs::remove_file(&path)?;
            }
            ::log::debug!("Removed {}", path.display());
        }

        ::log::info!("Cleared {}", target.display());
        Ok(())
    }

    /// Domains with a directory under this store's root
    pub fn list_domains(&self) -> Result<BTreeSet<String>> {
        list_domains(&self.root)
    }

    pub fn records(&self) -> &BTreeMap<QueryId, Query> {
        &self.records
    }

    pub fn get(&self, id: &QueryId) -> Option<&Query> {
        self.records.get(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Resolve the directory a load or clear acts on
    fn target(&self, date: Option<NaiveDate>) -> Result<PathBuf> {
        let target = match date {
            Some(date) => self.date_path(date),
            None => self.path.clone(),
        };

        if !target.is_dir() {
            return Err(Error::MissingDirectory(target));
        }
        Ok(target)
    }
}

/// Names of the domain directories directly under `root`.
///
/// A root that does not exist yet holds no domains.
pub fn list_domains(root: &Path) -> Result<BTreeSet<String>> {
    let mut domains = BTreeSet::new();
    if !root.is_dir() {
        return Ok(domains);
    }

    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            domains.insert(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(domains)
}

/// Recursively gather every file below `dir`, sorted per directory
fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let mut entries = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            collect_files(&path, files)?;
        } else {
            files.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::Content;
    use chrono::NaiveTime;
    use tempfile::TempDir;

    fn store_in(tmp: &TempDir, domain: &str, page_path: &str) -> RecordStore {
        let config = ScrapeConfig::default().with_cache_root(tmp.path());
        RecordStore::for_page(&config, domain, page_path)
    }

    fn links_query(url: &str, date: NaiveDate, time: NaiveTime) -> Query {
        Query::at(
            url,
            Content::Links(vec![
                "https://example.com/b".to_string(),
                "https://example.com/a".to_string(),
                "https://other.org".to_string(),
            ]),
            date,
            time,
        )
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    fn time(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_store_layout_for_homepage() {
        let tmp = TempDir::new().unwrap();
        let mut store = store_in(&tmp, "example.com", "/");
        let query = links_query("https://example.com/", date(), time(9, 15, 0));

        let path = store.store(&query).unwrap();

        assert_eq!(
            path,
            tmp.path()
                .join("example.com")
                .join("* homepage")
                .join("2024-03-09")
                .join("09:15:00 Link Scrape")
        );
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "https://example.com/\nLink Scrape\n2024-03-09\n09:15:00\n\
             https://example.com/b\nhttps://example.com/a\nhttps://other.org\n"
        );
        assert_eq!(store.get(&query.id()), Some(&query));
    }

    #[test]
    fn test_store_layout_for_nested_path() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp, "example.com", "/docs/intro");
        assert_eq!(
            store.path(),
            tmp.path().join("example.com").join("docs-intro")
        );
    }

    #[test]
    fn test_store_as_overwrites() {
        let tmp = TempDir::new().unwrap();
        let mut store = store_in(&tmp, "example.com", "/page");
        let first = links_query("https://example.com/page", date(), time(1, 0, 0));
        let second = Query::at(
            "https://example.com/page",
            Content::Links(vec!["https://new.org".to_string()]),
            date(),
            time(2, 0, 0),
        );

        let a = store.store_as(&first, "latest").unwrap();
        let b = store.store_as(&second, "latest").unwrap();

        assert_eq!(a, b);
        assert!(fs::read_to_string(&b).unwrap().ends_with("https://new.org\n"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_round_trip_links() {
        let tmp = TempDir::new().unwrap();
        let query = links_query("https://example.com/", date(), time(10, 0, 0));
        store_in(&tmp, "example.com", "").store(&query).unwrap();

        // A fresh store only sees disk state after loading
        let mut fresh = store_in(&tmp, "example.com", "");
        assert!(fresh.is_empty());
        assert_eq!(fresh.load(Some(date())).unwrap(), 1);

        let loaded = fresh.get(&query.id()).unwrap();
        assert_eq!(loaded.links(), query.links());
        assert_eq!(loaded, &query);
    }

    #[test]
    fn test_round_trip_text() {
        let tmp = TempDir::new().unwrap();
        let query = Query::at(
            "https://example.com/about",
            Content::Text("Hello World".to_string()),
            date(),
            time(10, 0, 0),
        );
        store_in(&tmp, "example.com", "/about").store(&query).unwrap();

        let mut fresh = store_in(&tmp, "example.com", "/about");
        fresh.load(None).unwrap();
        assert_eq!(fresh.get(&query.id()).and_then(Query::text), Some("Hello World"));
    }

    #[test]
    fn test_text_without_persistence_loads_empty() {
        let tmp = TempDir::new().unwrap();
        let mut config = ScrapeConfig::default().with_cache_root(tmp.path());
        config.persist_text = false;
        let query = Query::at(
            "https://example.com/",
            Content::Text("Hello World".to_string()),
            date(),
            time(10, 0, 0),
        );
        RecordStore::for_page(&config, "example.com", "/").store(&query).unwrap();

        let mut fresh = RecordStore::for_page(&config, "example.com", "/");
        fresh.load(Some(date())).unwrap();
        assert_eq!(fresh.get(&query.id()).and_then(Query::text), Some(""));
    }

    #[test]
    fn test_load_all_dates() {
        let tmp = TempDir::new().unwrap();
        let mut store = store_in(&tmp, "example.com", "/");
        let other_day = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        store.store(&links_query("https://example.com/", date(), time(1, 0, 0))).unwrap();
        store.store(&links_query("https://example.com/", other_day, time(1, 0, 0))).unwrap();

        let mut fresh = store_in(&tmp, "example.com", "/");
        assert_eq!(fresh.load(None).unwrap(), 2);
        assert_eq!(fresh.len(), 2);
    }

    #[test]
    fn test_load_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let mut store = store_in(&tmp, "example.com", "/");

        assert!(matches!(store.load(None), Err(Error::MissingDirectory(_))));
        assert!(matches!(store.clear(Some(date())), Err(Error::MissingDirectory(_))));
    }

    #[test]
    fn test_load_malformed_report_inserts_nothing() {
        let tmp = TempDir::new().unwrap();
        let mut store = store_in(&tmp, "example.com", "/");
        store.store(&links_query("https://example.com/", date(), time(1, 0, 0))).unwrap();
        fs::write(store.date_path(date()).join("zz broken"), "only\ntwo lines\n").unwrap();

        let mut fresh = store_in(&tmp, "example.com", "/");
        assert!(matches!(
            fresh.load(Some(date())),
            Err(Error::MalformedReport { .. })
        ));
        assert!(fresh.is_empty());
    }

    #[test]
    fn test_clear_date_then_load_is_empty() {
        let tmp = TempDir::new().unwrap();
        let mut store = store_in(&tmp, "example.com", "/");
        store.store(&links_query("https://example.com/", date(), time(1, 0, 0))).unwrap();
        store
            .store(&Query::at("https://example.com/", Content::Text("x".into()), date(), time(1, 0, 0)))
            .unwrap();

        store.clear(Some(date())).unwrap();

        // The date directory survives, empty
        assert!(store.date_path(date()).is_dir());
        let mut fresh = store_in(&tmp, "example.com", "/");
        assert_eq!(fresh.load(Some(date())).unwrap(), 0);

        // Clearing leaves memory alone
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_clear_all_dates() {
        let tmp = TempDir::new().unwrap();
        let mut store = store_in(&tmp, "example.com", "/");
        store.store(&links_query("https://example.com/", date(), time(1, 0, 0))).unwrap();

        store.clear(None).unwrap();

        assert!(store.path().is_dir());
        assert!(!store.date_path(date()).exists());
        let mut fresh = store_in(&tmp, "example.com", "/");
        assert!(matches!(fresh.load(Some(date())), Err(Error::MissingDirectory(_))));
        assert_eq!(fresh.load(None).unwrap(), 0);
    }

    #[test]
    fn test_list_domains() {
        let tmp = TempDir::new().unwrap();
        assert!(list_domains(&tmp.path().join("missing")).unwrap().is_empty());

        let mut a = store_in(&tmp, "a.com", "/");
        let mut b = store_in(&tmp, "b.org", "/x");
        a.store(&links_query("https://a.com/", date(), time(1, 0, 0))).unwrap();
        b.store(&links_query("https://b.org/x", date(), time(1, 0, 0))).unwrap();
        fs::write(tmp.path().join("stray-file"), "").unwrap();

        let domains = a.list_domains().unwrap();
        assert_eq!(
            domains.into_iter().collect::<Vec<_>>(),
            vec!["a.com".to_string(), "b.org".to_string()]
        );
    }
}
