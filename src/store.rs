//! Saved filters live as JSON files on disk, one file per filter key.
//!
//! To store something new, implement the Storable and StoreKey traits, then
//! go through [`Store::read`] and [`Store::write`]. Binding each stored type
//! to its key type means you cannot read a schema with a filter's key by
//! accident; the compiler refuses.
//!
//! Only the storage form of a tree ever touches disk. The editable form has
//! no serde implementation, so trying to persist it is a compile error, which
//! is exactly the point.

use crate::error::ConfigError;
use crate::filter::{check_tree, field_info_map, FieldInfo, FilterNode};
use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::PathBuf;

/// You need one of these to read something from the store. Key types are
/// plain values so that collaborators can construct them freely.
pub trait StoreKey {
    fn as_path(&self) -> String;
}

/// Anything that can be stored implements this trait.
///
/// The associated key type gives compile time protection: `read()` from a
/// `FilterKey` only type-checks for the types that declared it as their key.
/// Nothing stops two stored types from sharing a key type, and the two kinds
/// here do exactly that, a filter and its schema are looked up by the same
/// key.
pub trait Storable {
    type Key: StoreKey;

    fn store_key(&self) -> Self::Key;

    /// All values of one type land in the same subdirectory. Type ids should
    /// be unique per stored type.
    fn type_id() -> &'static str;
}

/// Identifies one saved filter, typically the id of the list view it filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterKey(String);

/// A persisted filter tree, always in storage form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedFilter {
    pub name: FilterKey,
    pub node: FilterNode,
}

/// The field schema a saved filter is edited and validated against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSchema {
    pub name: FilterKey,
    pub fields: Vec<FieldInfo>,
}

pub struct Store {
    root: PathBuf,
}

impl Store {
    /// The default on-disk location, under the user's cache folder.
    pub fn open() -> Result<Self, crate::Error> {
        let home = std::env::var("HOME")?;

        let mut root = PathBuf::from(home);
        root.push(".cache");
        root.push("sql-filter");
        root.push("store");
        root.push("v1");

        Ok(Store { root })
    }

    /// A store rooted anywhere you like. Tests use this to stay out of the
    /// real cache folder.
    pub fn at<P: Into<PathBuf>>(root: P) -> Self {
        Store { root: root.into() }
    }

    /// Reads a stored value. A missing file is not an error, it just means
    /// nothing was saved under this key yet.
    pub fn read<D>(&self, key: &D::Key) -> Result<Option<D>, crate::Error>
    where
        D: Storable + DeserializeOwned,
    {
        let location = self.root.join(D::type_id()).join(key.as_path());
        debug!("reading {}", location.display());

        let file = match fs::File::open(&location) {
            Ok(file) => file,
            Err(error) if error.kind() == IoErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error.into()),
        };

        Ok(Some(serde_json::from_reader(file)?))
    }

    pub fn write<D>(&self, data: &D) -> Result<(), crate::Error>
    where
        D: Storable + Serialize,
    {
        let folder = self.root.join(D::type_id());
        fs::create_dir_all(&folder)?;

        let location = folder.join(data.store_key().as_path());
        debug!("writing {}", location.display());

        fs::write(location, serde_json::to_string(data)?)?;

        Ok(())
    }

    /// What the editor asks for when it opens: the stored tree, if any, and
    /// the schema to edit against.
    ///
    /// The tree is validated here, once, on its way in. A filter that no
    /// longer matches its schema fails loudly instead of feeding the widget
    /// nodes it cannot render. A missing schema is a configuration problem,
    /// a missing tree just means the user never saved one.
    pub fn load_filter(
        &self,
        key: &FilterKey,
    ) -> Result<(Option<FilterNode>, Vec<FieldInfo>), crate::Error> {
        let schema: FilterSchema = self
            .read(key)?
            .ok_or_else(|| crate::Error::from(ConfigError::MissingSchema(key.to_string())))?;

        let saved: Option<SavedFilter> = self.read(key)?;

        let node = match saved {
            Some(filter) => {
                let fields = field_info_map(schema.fields.clone());
                check_tree(&filter.node, &fields)?;

                Some(filter.node)
            }
            None => None,
        };

        Ok((node, schema.fields))
    }

    pub fn save_filter(&self, filter: &SavedFilter) -> Result<(), crate::Error> {
        self.write(filter)
    }
}

// Trait impls live together down here, so the types above stay readable.

impl Storable for SavedFilter {
    type Key = FilterKey;

    fn store_key(&self) -> FilterKey {
        self.name.clone()
    }

    fn type_id() -> &'static str {
        "filter"
    }
}

impl Storable for FilterSchema {
    type Key = FilterKey;

    fn store_key(&self) -> FilterKey {
        self.name.clone()
    }

    fn type_id() -> &'static str {
        "schema"
    }
}

impl StoreKey for FilterKey {
    fn as_path(&self) -> String {
        format!("{}.json", self.0)
    }
}

impl<T: Into<String>> From<T> for FilterKey {
    fn from(name: T) -> FilterKey {
        FilterKey(name.into())
    }
}

impl Display for FilterKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
