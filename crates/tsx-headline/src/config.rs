//! Text search configurations and the catalog that resolves them.
//!
//! A configuration bundles a [`TextParser`] with a [`Dictionary`]. The
//! catalog addresses configurations by name or by [`ConfigId`] and holds the
//! session's current default, which is what an omitted configuration
//! argument resolves to.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::debug;
use tsx_error::{Result, TsError};
use tsx_types::{ConfigId, TsVector, Value};

use crate::dictionary::{Dictionary, SimpleDictionary, StopwordDictionary};
use crate::parser::{DefaultParser, TextParser, UnitKind};

/// Id of the built-in `simple` configuration.
pub const SIMPLE_CONFIG_ID: ConfigId = ConfigId::new(1);
/// Id of the built-in `english` configuration.
pub const ENGLISH_CONFIG_ID: ConfigId = ConfigId::new(2);

/// A parser plus dictionary, addressable by name and id.
pub struct TextSearchConfig {
    id: ConfigId,
    name: String,
    parser: Arc<dyn TextParser>,
    dictionary: Arc<dyn Dictionary>,
}

impl TextSearchConfig {
    #[must_use]
    pub fn id(&self) -> ConfigId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn parser(&self) -> &dyn TextParser {
        self.parser.as_ref()
    }

    #[must_use]
    pub fn dictionary(&self) -> &dyn Dictionary {
        self.dictionary.as_ref()
    }

    /// Index `document`: every word gets a 1-based position, and words the
    /// dictionary drops still use up their position.
    #[must_use]
    pub fn to_tsvector(&self, document: &str) -> TsVector {
        let mut position = 0_u32;
        let mut occurrences = Vec::new();
        for unit in self.parser.parse(document) {
            if unit.kind != UnitKind::Word {
                continue;
            }
            position = position.saturating_add(1);
            if let Some(lexeme) = self.dictionary.lexize(unit.text) {
                occurrences.push((lexeme, position));
            }
        }
        TsVector::from_occurrences(occurrences)
    }
}

impl fmt::Debug for TextSearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextSearchConfig")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("parser", &self.parser.name())
            .field("dictionary", &self.dictionary.name())
            .finish()
    }
}

/// How a caller names a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigRef {
    Id(ConfigId),
    Name(String),
}

impl ConfigRef {
    /// Interpret a function argument as a configuration reference.
    ///
    /// Accepts a `regconfig`, a name (text) or a numeric id (integer).
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Config(id) => Ok(Self::Id(*id)),
            Value::Text(name) => Ok(Self::Name(name.clone())),
            Value::Integer(raw) => u32::try_from(*raw)
                .map(|id| Self::Id(ConfigId::new(id)))
                .map_err(|_| TsError::unknown_configuration(raw.to_string())),
            other => Err(TsError::type_mismatch("regconfig", other.type_name())),
        }
    }
}

impl fmt::Display for ConfigRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

impl From<ConfigId> for ConfigRef {
    fn from(id: ConfigId) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for ConfigRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

#[derive(Default)]
struct CatalogState {
    by_id: FxHashMap<ConfigId, Arc<TextSearchConfig>>,
    by_name: FxHashMap<String, ConfigId>,
    next_id: u32,
}

/// Registry of text search configurations plus the current default.
///
/// Shared across requests behind an `Arc`; lookups take a read lock only.
pub struct TextSearchCatalog {
    state: RwLock<CatalogState>,
    current: RwLock<ConfigId>,
}

impl TextSearchCatalog {
    /// An empty catalog. Its current default names nothing until a
    /// configuration is registered and selected.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwLock::new(CatalogState {
                next_id: 1,
                ..CatalogState::default()
            }),
            current: RwLock::new(SIMPLE_CONFIG_ID),
        }
    }

    /// A catalog holding `simple` (id 1, the default) and `english` (id 2).
    #[must_use]
    pub fn with_builtin() -> Self {
        let catalog = Self::new();
        catalog.register(
            "simple",
            Arc::new(DefaultParser::new()),
            Arc::new(SimpleDictionary),
        );
        catalog.register(
            "english",
            Arc::new(DefaultParser::new()),
            Arc::new(StopwordDictionary::for_language("english")),
        );
        catalog
    }

    /// Register a configuration under `name` and return its id.
    ///
    /// Re-registering a name replaces the configuration but keeps its id.
    pub fn register(
        &self,
        name: &str,
        parser: Arc<dyn TextParser>,
        dictionary: Arc<dyn Dictionary>,
    ) -> ConfigId {
        let canon = canonical_name(name);
        let mut state = self.state.write();
        let id = if let Some(&existing) = state.by_name.get(&canon) {
            existing
        } else {
            let id = ConfigId::new(state.next_id);
            state.next_id += 1;
            id
        };
        state.by_name.insert(canon.clone(), id);
        state.by_id.insert(
            id,
            Arc::new(TextSearchConfig {
                id,
                name: canon.clone(),
                parser,
                dictionary,
            }),
        );
        debug!(config = %canon, id = id.get(), "text search configuration registered");
        id
    }

    /// Look up a configuration by reference.
    pub fn get(&self, config: &ConfigRef) -> Result<Arc<TextSearchConfig>> {
        let state = self.state.read();
        let found = match config {
            ConfigRef::Id(id) => state.by_id.get(id),
            ConfigRef::Name(name) => state
                .by_name
                .get(&canonical_name(name))
                .and_then(|id| state.by_id.get(id)),
        };
        found
            .cloned()
            .ok_or_else(|| TsError::unknown_configuration(config.to_string()))
    }

    /// Resolve an optional configuration argument.
    ///
    /// `None` means the current default.
    pub fn resolve(&self, config: Option<&ConfigRef>) -> Result<Arc<TextSearchConfig>> {
        let resolved = match config {
            Some(config) => self.get(config),
            None => self.get(&ConfigRef::Id(self.current_config())),
        }?;
        debug!(
            config = resolved.name(),
            id = resolved.id().get(),
            defaulted = config.is_none(),
            "text search configuration resolved"
        );
        Ok(resolved)
    }

    /// Id of the configuration used when none is given.
    #[must_use]
    pub fn current_config(&self) -> ConfigId {
        *self.current.read()
    }

    /// Change the default configuration. Fails if `config` is unknown.
    pub fn set_current_config(&self, config: &ConfigRef) -> Result<ConfigId> {
        let id = self.get(config)?.id();
        *self.current.write() = id;
        debug!(id = id.get(), "current text search configuration changed");
        Ok(id)
    }

    /// Names of all registered configurations, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.state.read().by_name.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for TextSearchCatalog {
    fn default() -> Self {
        Self::with_builtin()
    }
}

impl fmt::Debug for TextSearchCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextSearchCatalog")
            .field("configs", &self.names())
            .field("current", &self.current_config())
            .finish()
    }
}

fn canonical_name(name: &str) -> String {
    let lower = name.trim().to_ascii_lowercase();
    match lower.strip_prefix("pg_catalog.") {
        Some(rest) => rest.to_owned(),
        None => lower,
    }
}
