use thiserror::Error;

/// Boxed error returned across port boundaries (sources, classifiers, sinks).
pub type PortError = Box<dyn std::error::Error + Send + Sync>;

/// Every failure the pipeline can report.
///
/// Construction-time variants (`InvalidDimensions`, `InvalidCapacity`,
/// `InvalidThreshold`, `MissingClusterer`) are raised before any frame is
/// processed. Runtime variants are fatal to the running scheduler.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    #[error("invalid history capacity {0}: must be at least 1")]
    InvalidCapacity(usize),

    #[error("invalid confidence threshold {0}")]
    InvalidThreshold(f32),

    #[error("invalid cascade format: {0}")]
    InvalidCascadeFormat(String),

    #[error("capture source unavailable: {0}")]
    CaptureUnavailable(#[source] PortError),

    #[error("classifier failure: {0}")]
    ClassifierFailure(#[source] PortError),

    #[error("cluster stage is enabled but no clusterer was supplied")]
    MissingClusterer,

    #[error("detection sink failed: {0}")]
    SinkFailure(#[source] PortError),

    #[error("pipeline has been stopped")]
    PipelineStopped,

    #[error("failed to read {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_capacity_message_names_value() {
        let err = PipelineError::InvalidCapacity(0);
        assert_eq!(
            err.to_string(),
            "invalid history capacity 0: must be at least 1"
        );
    }

    #[test]
    fn test_runtime_variants_keep_source() {
        let err = PipelineError::CaptureUnavailable("device unplugged".into());
        assert!(err.to_string().contains("device unplugged"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PipelineError>();
    }
}
