//! Module emission order.

use crate::core::CompilerError;
use crate::models::ModuleSet;

use super::weights::count_weights;

/// Scope label used in errors and cycle warnings for module-level counting.
pub const MODULE_SCOPE: &str = "modules";

/// Module names in install order: descending weight, ties in [`ModuleSet`]
/// enumeration order.
///
/// The uninstall order is the exact reverse of this sequence and is never
/// computed separately.
///
/// # Errors
///
/// Returns [`CompilerError::UnresolvedDependency`] if a module depends on a
/// module that was not loaded.
pub fn order_modules(modules: &ModuleSet) -> Result<Vec<String>, CompilerError> {
    let table = count_weights(modules.iter(), |_| false, MODULE_SCOPE)?;

    for (name, weight) in table.iter() {
        tracing::debug!("Module '{}' weight {}", name, weight);
    }

    Ok(table.descending())
}
