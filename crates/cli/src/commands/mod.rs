//! Subcommand implementations and the shared cart session.

pub mod cart;
pub mod checkout;
pub mod settings;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use ramstuga_core::Language;
use ramstuga_storefront::analytics::TracingSink;
use ramstuga_storefront::catalog::{Catalog, CatalogError};
use ramstuga_storefront::page::{ClipboardError, Dialogs, MemoryPage};
use ramstuga_storefront::pricing::Pricing;
use ramstuga_storefront::storage::FileStore;
use ramstuga_storefront::{CartController, CartError, ConfigError, ShopConfig, i18n};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The catalog file could not be read.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// The cart refused the change.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// A command argument was not understood.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Options shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub lang: Option<String>,
    pub store: Option<PathBuf>,
    pub catalog: Option<PathBuf>,
    pub assume_yes: bool,
}

/// The controller type every cart command drives.
pub type Controller = CartController<FileStore, MemoryPage, TerminalDialogs>;

/// A loaded configuration, store, catalog and language.
#[derive(Debug)]
pub struct Session {
    pub config: ShopConfig,
    pub store: FileStore,
    pub catalog: Catalog,
    pub language: Language,
    assume_yes: bool,
}

impl Session {
    /// Load configuration and open the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or the catalog is invalid.
    pub fn open(options: &SessionOptions) -> Result<Self, CliError> {
        let config = ShopConfig::from_env()?;
        let path = options
            .store
            .clone()
            .unwrap_or_else(|| config.store_path.clone());
        let store = FileStore::open(path);

        let catalog = match &options.catalog {
            Some(path) => Catalog::from_path(path)?,
            None => Catalog::embedded()?,
        };

        if let Some(code) = &options.lang {
            if Language::from_code(code).is_none() {
                return Err(CliError::InvalidArgument(format!("unknown language '{code}'")));
            }
        }
        let language = i18n::resolve_language(options.lang.as_deref(), &store);

        tracing::debug!(store = %store.path().display(), language = language.code(), "Opened session");
        Ok(Self {
            config,
            store,
            catalog,
            language,
            assume_yes: options.assume_yes,
        })
    }

    #[must_use]
    pub const fn pricing(&self) -> Pricing {
        Pricing::new(self.language, self.config.exchange_rate, self.config.shipping)
    }

    /// A cart controller over the session's store, rendering into an
    /// in-memory copy of the shop page.
    #[must_use]
    pub fn controller(&self) -> Controller {
        let controller = CartController::new(
            self.store.clone(),
            MemoryPage::shop(),
            TerminalDialogs {
                assume_yes: self.assume_yes,
            },
            self.catalog.clone(),
            self.pricing(),
            self.config.checkout.clone(),
        );
        match &self.config.ga4_measurement_id {
            Some(id) => controller.with_analytics(Box::new(TracingSink::new(id.clone()))),
            None => controller,
        }
    }
}

/// Prompts on the terminal. There is no clipboard, so copies always fall
/// back to printing.
#[derive(Debug, Clone, Copy)]
pub struct TerminalDialogs {
    assume_yes: bool,
}

#[allow(clippy::print_stderr)]
impl Dialogs for TerminalDialogs {
    fn alert(&self, message: &str) {
        eprintln!("{message}");
    }

    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        eprint!("{message} [y/N] ");
        let _ = io::stderr().flush();

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(
            answer.trim().to_lowercase().as_str(),
            "y" | "yes" | "j" | "ja"
        )
    }

    fn copy_to_clipboard(&self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError("no clipboard in a terminal session".to_string()))
    }
}
