//! Real-time cascade detection loop.
//!
//! Frames flow one way per tick: RGBA capture → luminance reduction →
//! external classifier → temporal aggregation → confidence threshold →
//! sink. [`pipeline::frame_scheduler::FrameScheduler`] owns the loop;
//! the classifier engine is supplied by the caller through
//! [`detection::domain::classifier`].

pub mod shared {
    pub mod constants;
    pub mod detection;
    pub mod error;
    pub mod frame;
    pub mod run_parameters;
}

pub mod color {
    pub mod domain {
        pub mod color_reducer;
    }
}

pub mod detection {
    pub mod domain {
        pub mod classifier;
        pub mod detection_aggregator;
        pub mod threshold_filter;
    }
}

pub mod capture {
    pub mod domain {
        pub mod frame_source;
    }
    pub mod infrastructure;
}

pub mod render {
    pub mod domain {
        pub mod detection_sink;
    }
    pub mod infrastructure;
}

pub mod pipeline;
