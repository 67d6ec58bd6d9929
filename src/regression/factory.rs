use crate::config::RegressionKind;
use crate::regression::engine::RegressionEngine;
use crate::regression::linear::OlsEngine;
use crate::regression::logistic::LogitEngine;

/// Build a boxed regression engine for the configured regression kind.
/// Currently this is a thin factory implemented as a single function.
pub fn build_engine(kind: RegressionKind) -> Box<dyn RegressionEngine> {
    match kind {
        RegressionKind::Linear => Box::new(OlsEngine::new()),
        RegressionKind::Logistic => Box::new(LogitEngine::new()),
    }
}
