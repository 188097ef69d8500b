//! Internationalization (i18n) for the site's two display languages.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for the supported locales and the countries mapped to them
//! - `locale`: The `Locale` type
//! - `strings`: Localized contact-section copy
//! - `store`: Durable key/value storage for the visitor's preference
//! - `resolver`: First-visit resolution (stored preference, then geolocation)
//! - `provider`: Application-wide locale state handed to components
//!
//! # Example
//!
//! ```rust,ignore
//! use midastouch_site::geo::GeoLocator;
//! use midastouch_site::i18n::{FileStore, LocaleProvider, LocaleResolver};
//!
//! let store = Arc::new(FileStore::new(".midas-touch-locale.json"));
//! let provider = LocaleProvider::new(LocaleResolver::new(store, GeoLocator::default()));
//! let locale = provider.initialize().await;
//! ```

mod locale;
mod provider;
mod registry;
mod resolver;
mod store;
mod strings;

pub use locale::Locale;
pub use provider::{LocaleProvider, LocaleState};
pub use registry::{LocaleConfig, LocaleRegistry};
pub use resolver::{LocaleResolver, STORAGE_KEY};
pub use store::{FileStore, MemoryStore, PreferenceStore, StoreError};
pub use strings::ContactStrings;
