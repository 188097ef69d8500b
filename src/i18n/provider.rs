//! Application-wide locale state.
//!
//! Constructed once at the application root and handed to every component
//! that renders localized copy. Observers can subscribe to changes.

use crate::i18n::{ContactStrings, Locale, LocaleResolver};
use tokio::sync::watch;

/// Snapshot of the locale state published to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleState {
    pub locale: Locale,
    /// True until the initial resolution has finished
    pub is_loading: bool,
}

pub struct LocaleProvider {
    resolver: LocaleResolver,
    state: watch::Sender<LocaleState>,
}

impl LocaleProvider {
    /// Start in the default locale, loading, until `initialize` runs.
    pub fn new(resolver: LocaleResolver) -> Self {
        let (state, _) = watch::channel(LocaleState {
            locale: Locale::default_locale(),
            is_loading: true,
        });

        Self { resolver, state }
    }

    /// Resolve the initial locale and publish it.
    pub async fn initialize(&self) -> Locale {
        let locale = self.resolver.resolve_initial_locale().await;
        self.state.send_replace(LocaleState {
            locale,
            is_loading: false,
        });
        locale
    }

    pub fn current_locale(&self) -> Locale {
        self.state.borrow().locale
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    /// Switch locale, persisting the choice immediately.
    pub fn set_locale(&self, locale: Locale) {
        self.resolver.set_locale(locale);
        self.state.send_modify(|state| state.locale = locale);
    }

    /// Contact-section copy in the current locale.
    pub fn strings(&self) -> &'static ContactStrings {
        ContactStrings::for_locale(self.current_locale())
    }

    pub fn subscribe(&self) -> watch::Receiver<LocaleState> {
        self.state.subscribe()
    }
}
