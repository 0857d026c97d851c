//! Machine Translation Module
//!
//! Everything the merge rewriter needs from a translation backend sits
//! behind [`MachineTranslator`]: a plain-text-to-plain-text call. This module
//! provides that trait, the token shield that keeps placeholders and markup
//! out of the provider's reach, the concrete providers, and the factory that
//! picks one from configuration.
//!
//! 1. **Token Shield** - Masks `%N` placeholders and `<...>` tags before translation
//! 2. **MT Trait & Providers** - LibreTranslate, Google Translate and a mock
//! 3. **Package Index** - Locates, downloads and unpacks missing Argos models
//! 4. **Provider Factory** - Builds and verifies a provider before any rewrite

pub mod error;
pub mod google_translate;
pub mod libretranslate;
pub mod mock;
pub mod packages;
pub mod provider;
pub mod shield;
pub mod translator;

pub use error::{MtError, MtResult};
pub use google_translate::GoogleTranslateProvider;
pub use libretranslate::{InstallOptions, LibreTranslateProvider};
pub use mock::{MockMode, MockTranslator};
pub use packages::{PackageEntry, PackageIndex};
pub use provider::{ProviderConfig, ProviderKind, build_translator};
pub use shield::{TokenTable, protect, restore};
pub use translator::MachineTranslator;
