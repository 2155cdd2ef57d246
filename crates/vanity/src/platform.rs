use crate::error::{PlatformError, PlatformErrorExt};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use vanity_catalog::{Catalog, vanity};
use vanity_domain::config::AppConfig;
use vanity_domain::{Amount, Category, ChoiceMap, PartRecord, SlotType};
use vanity_engine::{Configurator, SharedConfigurator};
use vanity_event_bus::EventBus;
use vanity_kernel::session_id;
use vanity_parts::PartCatalog;
use vanity_pricing::{LineItem, PriceList};
use vanity_session::{Metadata, SessionDocument};

/// Priced bill of materials plus the parts handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub lines: Vec<LineItem>,
    pub total: Amount,
    pub parts: BTreeMap<SlotType, PartRecord>,
}

/// One open configuration session.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub configurator: Configurator,
    pub metadata: Metadata,
}

impl Session {
    /// The persistable form of the current, settled selection.
    #[must_use]
    pub fn document(&self, product: &str) -> SessionDocument {
        let mut document = SessionDocument::new(&self.id, product, self.configurator.snapshot());
        document.metadata.clone_from(&self.metadata);
        document
    }
}

/// The wired configurator: catalog, tables and the event bus shared by every session.
#[derive(Debug, Clone)]
pub struct Platform {
    config: AppConfig,
    catalog: Arc<Catalog>,
    prices: Arc<PriceList>,
    parts: Arc<PartCatalog>,
    events: EventBus,
}

impl Platform {
    /// Loads the catalog named by the configuration, or the built-in one.
    ///
    /// # Errors
    /// Returns [`PlatformError::Catalog`] if the configured catalog cannot be loaded.
    pub fn init(config: &AppConfig) -> Result<Self, PlatformError> {
        let catalog = match &config.catalog.path {
            Some(path) => Catalog::load(path).context("Configured catalog")?,
            None => vanity::catalog()?,
        };
        info!(sections = catalog.sections().len(), rules = catalog.rules().len(), "Platform initialized");

        Ok(Self {
            config: config.clone(),
            catalog: Arc::new(catalog),
            prices: Arc::new(PriceList::vanity()),
            parts: Arc::new(PartCatalog::vanity()),
            events: EventBus::new(),
        })
    }

    #[must_use]
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub const fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    #[must_use]
    pub const fn events(&self) -> &EventBus {
        &self.events
    }

    /// Starts a session from the catalog defaults.
    ///
    /// # Errors
    /// Returns [`PlatformError::Engine`] if the defaults do not settle.
    pub fn new_session(&self) -> Result<Session, PlatformError> {
        let configurator = Configurator::new(Arc::clone(&self.catalog), self.config.engine)?;
        let id = session_id();
        info!(id = %id, "Session started");
        Ok(Session { id, configurator, metadata: Metadata::new() })
    }

    /// Reopens a stored session; a missing file starts a new one.
    ///
    /// An unreadable document or a selection that no longer settles is replaced by the
    /// catalog defaults, keeping the stored id when it could be read.
    ///
    /// # Errors
    /// Returns [`PlatformError::Session`] if the file exists but cannot be read, and
    /// [`PlatformError::Engine`] if the catalog defaults do not settle.
    pub fn open_session(&self, path: impl AsRef<Path>) -> Result<Session, PlatformError> {
        let path = path.as_ref();
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return self.new_session(),
            Err(err) => {
                return Err(PlatformError::Session {
                    source: err.into(),
                    context: Some(format!("Failed to read {}", path.display()).into()),
                });
            },
        };

        let restored = Configurator::rehydrate(Arc::clone(&self.catalog), self.config.engine, &bytes)?;
        if let Some(err) = &restored.fallback {
            warn!(path = %path.display(), error = %err, "Session reset to defaults");
        }

        let (id, metadata) = restored
            .document
            .map_or_else(|| (session_id(), Metadata::new()), |doc| (doc.id, doc.metadata));
        Ok(Session { id, configurator: restored.configurator, metadata })
    }

    /// Writes the session document into the configured session directory.
    ///
    /// # Errors
    /// Returns [`PlatformError::Session`] on file system or serialization failures.
    pub fn save_session(&self, session: &Session) -> Result<PathBuf, PlatformError> {
        let document = session.document(&self.config.session.product);
        Ok(document.save(&self.config.session.directory)?)
    }

    /// Wraps a session's configurator for concurrent use, publishing on the platform bus.
    #[must_use]
    pub fn share(&self, session: Session) -> SharedConfigurator {
        SharedConfigurator::new(session.configurator, self.events.clone())
    }

    /// Prices a selection and resolves its parts.
    #[must_use]
    pub fn quote(&self, choices: &ChoiceMap) -> Quote {
        Quote {
            lines: self.prices.line_items(choices),
            total: self.prices.price(choices, Category::TOTAL),
            parts: self
                .parts
                .resolve(choices)
                .into_iter()
                .map(|(slot, record)| (slot, record.clone()))
                .collect(),
        }
    }
}
