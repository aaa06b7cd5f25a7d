/* packages/engine/rust/src/lib.rs */

pub mod config;
pub mod context;
pub mod i18n;
pub mod page;

// Public API re-exports
pub use config::{BuildSection, I18nSection, IconLibrary, ProjectConfig, SiteSection, ThemeSection};
pub use context::{BlockInstance, ContextBuilder, PageData};
pub use i18n::{dictionary_for, with_fallback};
pub use page::{inject_html_lang, output_path, RenderedPage, Site, CONTENT_KEY};
pub use quire_template::{Engine, LocaleStrategy};
