use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::config::FrameConfig;
use crate::error::{Error, Result};
use crate::frame::{FrameResponse, InteractionContext};
use crate::screens::Screen;

/// Maps interaction paths to screens and runs exactly one screen per interaction
#[derive(Debug, Clone)]
pub struct ScreenRouter {
    config: Arc<FrameConfig>,
    routes: HashMap<String, Screen>,
    order: Vec<String>,
}

impl ScreenRouter {
    /// Router with every screen of the flow registered
    pub fn new(config: FrameConfig) -> Self {
        Self::with_config(Arc::new(config))
    }

    pub fn with_config(config: Arc<FrameConfig>) -> Self {
        let mut router = Self {
            config,
            routes: HashMap::new(),
            order: Vec::new(),
        };
        for screen in Screen::ALL {
            router.register(screen.path(), screen);
        }
        router
    }

    /// Register `screen` at `path`, replacing any screen already there
    pub fn register(&mut self, path: &str, screen: Screen) {
        if self.routes.insert(path.to_string(), screen).is_none() {
            self.order.push(path.to_string());
        }
    }

    pub fn config(&self) -> &FrameConfig {
        &self.config
    }

    /// Registered paths in registration order
    pub fn routes(&self) -> impl Iterator<Item = (&str, Screen)> + '_ {
        self.order
            .iter()
            .filter_map(|path| self.routes.get(path).map(|screen| (path.as_str(), *screen)))
    }

    pub fn resolve(&self, path: &str) -> Option<Screen> {
        self.routes.get(path).copied()
    }

    /// Handle one interaction at `path`
    pub fn dispatch(&self, path: &str, ctx: &InteractionContext) -> Result<FrameResponse> {
        let screen = self
            .resolve(path)
            .ok_or_else(|| Error::UnknownRoute(path.to_string()))?;
        debug!(path, ?screen, "Dispatching interaction");
        screen.handle(&self.config, ctx)
    }
}
