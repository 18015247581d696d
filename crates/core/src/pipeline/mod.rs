pub mod cascade_asset;
pub mod frame_scheduler;
pub mod pipeline_config;
pub mod pipeline_logger;
pub mod refresh_clock;
