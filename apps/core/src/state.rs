use std::sync::{Arc, Mutex};

use crate::config::Config;
use crate::rate_limiter::RateLimiter;
use crate::recommend::{CatalogSource, MentorRecommender};

/// Shared by every request handler
pub struct AppState {
    pub catalog: Arc<dyn CatalogSource>,
    pub mentors: MentorRecommender,
    pub limiter: Mutex<RateLimiter>,
}

impl AppState {
    pub fn new(config: &Config, catalog: Arc<dyn CatalogSource>) -> Arc<Self> {
        let limiter = RateLimiter::new(config.rate_limit_requests, config.rate_limit_window());

        Arc::new(Self {
            catalog,
            mentors: MentorRecommender::new(),
            limiter: Mutex::new(limiter),
        })
    }
}
