use crate::persistence::StoreError;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Engine operation errors
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("cell ({variant_id}, {colour_id}) has a request in flight")]
    CellBusy {
        variant_id: String,
        colour_id: String,
    },

    #[error("variant not found: {0}")]
    VariantNotFound(String),

    #[error("colour not found: {0}")]
    ColourNotFound(String),

    #[error("SKU not found: {0}")]
    SkuNotFound(String),

    #[error("SKU is not orphaned: {0}")]
    SkuNotOrphaned(String),

    #[error("no sibling SKU with media to copy onto {0}")]
    NoDonorSibling(String),

    #[error("bulk toggle target is empty")]
    EmptyBulkTarget,

    #[error("index {index} out of bounds for collection of {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Collaborator call failed; local state was left unchanged
    #[error("{op} {entity} failed: {source}")]
    Persistence {
        op: &'static str,
        entity: String,
        #[source]
        source: StoreError,
    },
}

impl EngineError {
    pub(crate) fn persistence(op: &'static str, entity: impl Into<String>, source: StoreError) -> Self {
        Self::Persistence {
            op,
            entity: entity.into(),
            source,
        }
    }
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        let code = match &err {
            EngineError::CellBusy { .. } => ErrorCode::CellBusy,
            EngineError::VariantNotFound(_) => ErrorCode::VariantNotFound,
            EngineError::ColourNotFound(_) => ErrorCode::ColourNotFound,
            EngineError::SkuNotFound(_) => ErrorCode::SkuNotFound,
            EngineError::SkuNotOrphaned(_) => ErrorCode::SkuNotOrphaned,
            EngineError::NoDonorSibling(_) => ErrorCode::NoDonorSibling,
            EngineError::EmptyBulkTarget => ErrorCode::EmptyBulkTarget,
            EngineError::IndexOutOfBounds { .. } => ErrorCode::InvalidRequest,
            EngineError::Persistence { source, .. } => match source {
                StoreError::NotFound(_) => ErrorCode::NotFound,
                StoreError::Rejected(_) => ErrorCode::PersistenceRejected,
                StoreError::Transport(_) => ErrorCode::TransportError,
            },
        };
        let message = err.to_string();
        match err {
            EngineError::Persistence { op, entity, .. } => {
                AppError::with_message(code, message)
                    .with_detail("operation", op)
                    .with_detail("entity", entity)
            }
            _ => AppError::with_message(code, message),
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persistence_error_keeps_operation_context() {
        let err = EngineError::persistence(
            "create",
            "sku for cell (v1, c1)",
            StoreError::Rejected("backend said no".into()),
        );
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::PersistenceRejected);
        let details = app.details.as_ref().unwrap();
        assert_eq!(details["operation"], "create");
        assert_eq!(details["entity"], "sku for cell (v1, c1)");
    }

    #[test]
    fn test_cell_busy_code() {
        let err = EngineError::CellBusy {
            variant_id: "v1".into(),
            colour_id: "c1".into(),
        };
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::CellBusy);
    }
}
