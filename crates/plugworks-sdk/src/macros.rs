//! Convenience macros for plugin development.

/// Builds a `PluginInfo` from `field: value` pairs.
///
/// Every field of `PluginInfo` must be given; the struct expression behind
/// the macro keeps the list exhaustive, so adding a metadata field later
/// turns stale call sites into compile errors.
///
/// # Example
/// ```rust,ignore
/// let info = plugin_info!(
///     id: "my-plugin",
///     name: "My Plugin",
///     version: "1.0.0",
///     description: "Does things",
///     author: "Dev"
/// );
/// ```
#[macro_export]
macro_rules! plugin_info {
    ($($field:ident: $value:expr),+ $(,)?) => {
        $crate::prelude::PluginInfo {
            $($field: $value.to_string(),)+
        }
    };
}
