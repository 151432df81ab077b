//! Registry assembly from built-in schemas and on-disk definitions.

use std::path::Path;

use punchcard_core::registry::StaticTypeRegistry;
use punchcard_core::schema::users;
use punchcard_types::config::PunchcardConfig;
use punchcard_types::error::ContentTypeError;

use crate::filesystem::{load_type_definitions, types_dir};

/// Build the type registry: the users types first, then `{data_dir}/types/*.toml`.
pub async fn load_registry(
    data_dir: &Path,
    config: &PunchcardConfig,
) -> Result<StaticTypeRegistry, ContentTypeError> {
    let mut types = vec![users::structure(&config.roles), users::create(&config.roles)?];
    types.extend(load_type_definitions(&types_dir(data_dir)).await?);

    tracing::info!(count = types.len(), "content types registered");
    StaticTypeRegistry::new(types)
}
