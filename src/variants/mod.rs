/*!
 * Variant content.
 *
 * - `loader`: resolves tool/variant content for a locale, with lazy caching
 * - `cache`: the cache port the loader stores parsed files behind
 */

pub mod cache;
pub mod loader;

pub use cache::{CachePort, CacheStats, InMemoryCache};
pub use loader::{LoaderPaths, LoaderStats, StaticPath, ToolData, ToolIndex, VariantIndex, VariantLoader};
