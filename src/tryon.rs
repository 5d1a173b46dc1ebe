//! Virtual try-on: sending a captured design to an image-generation service.
//!
//! The service itself is a collaborator behind [`TryOnGenerator`]. A
//! [`TryOnSession`] captures the current design, hands it to the generator
//! together with the chosen [`ModelAttributes`], and discards any result that
//! was overtaken by a newer request.
//!
//! # Example
//!
//! ```
//! use tailor_renderer::capture::{CaptureBridge, CaptureError};
//! use tailor_renderer::scene::Scene;
//! use tailor_renderer::tryon::{Gender, ModelAttributes, TryOnError, TryOnSession};
//! use tailor_renderer::GarmentConfig;
//!
//! struct StubCapture;
//!
//! impl CaptureBridge for StubCapture {
//!     fn capture(&self, _scene: &Scene) -> Result<Vec<u8>, CaptureError> {
//!         Ok(b"design".to_vec())
//!     }
//! }
//!
//! let generator = |image: &[u8], _: &ModelAttributes, _: &GarmentConfig| {
//!     let mut photo = image.to_vec();
//!     photo.extend_from_slice(b" on model");
//!     Ok::<_, TryOnError>(photo)
//! };
//! let session = TryOnSession::new(StubCapture, generator);
//!
//! let photo = session.generate(&GarmentConfig::new(), &ModelAttributes::new(Gender::Female))?;
//! assert_eq!(photo, b"design on model");
//! # Ok::<(), TryOnError>(())
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::capture::{CaptureBridge, CaptureError, capture_with_retry};
use crate::config::GarmentConfig;
use crate::scene::assemble_with_theme;
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum Gender {
    #[default]
    Male,
    Female,
}

/// Who the garment is shown on.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct ModelAttributes {
    pub gender: Gender,
}

impl ModelAttributes {
    pub fn new(gender: Gender) -> Self {
        Self { gender }
    }
}

/// Service messages are carried verbatim so they can be shown to the user.
#[derive(Error, Debug)]
pub enum TryOnError {
    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error("{0}")]
    Quota(String),

    #[error("{0}")]
    Network(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Service(String),

    #[error("try-on request was superseded by a newer one")]
    Superseded,
}

/// Generates a try-on photo from a captured design.
pub trait TryOnGenerator {
    fn generate(
        &self,
        image: &[u8],
        model: &ModelAttributes,
        config: &GarmentConfig,
    ) -> Result<Vec<u8>, TryOnError>;
}

impl<F> TryOnGenerator for F
where
    F: Fn(&[u8], &ModelAttributes, &GarmentConfig) -> Result<Vec<u8>, TryOnError>,
{
    fn generate(
        &self,
        image: &[u8],
        model: &ModelAttributes,
        config: &GarmentConfig,
    ) -> Result<Vec<u8>, TryOnError> {
        self(image, model, config)
    }
}

// ============================================================================
// Request supersession
// ============================================================================

/// Identifies one request issued by a [`RequestTracker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestToken(u64);

/// Hands out increasing tokens; only the latest one is current.
#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: AtomicU64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a request, superseding every earlier one.
    pub fn begin(&self) -> RequestToken {
        RequestToken(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest.load(Ordering::SeqCst) == token.0
    }

    /// Supersedes every outstanding request without starting a new one.
    pub fn cancel(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }

    /// Passes `result` through if `token` is still current.
    pub fn resolve<T>(
        &self,
        token: RequestToken,
        result: Result<T, TryOnError>,
    ) -> Result<T, TryOnError> {
        if self.is_current(token) {
            result
        } else {
            debug!("dropping result of superseded request {}", token.0);
            Err(TryOnError::Superseded)
        }
    }
}

// ============================================================================
// TryOnSession
// ============================================================================

pub struct TryOnSession<C, G> {
    capture: C,
    generator: G,
    theme: Theme,
    tracker: Arc<RequestTracker>,
}

impl<C: CaptureBridge, G: TryOnGenerator> TryOnSession<C, G> {
    pub fn new(capture: C, generator: G) -> Self {
        Self::with_tracker(capture, generator, Arc::new(RequestTracker::new()))
    }

    /// Shares `tracker` with other parts of the caller, which can then
    /// supersede this session's requests.
    pub fn with_tracker(capture: C, generator: G, tracker: Arc<RequestTracker>) -> Self {
        Self {
            capture,
            generator,
            theme: Theme::default(),
            tracker,
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn tracker(&self) -> &Arc<RequestTracker> {
        &self.tracker
    }

    /// Captures `config` as an image, retrying once on failure.
    pub fn capture_design(&self, config: &GarmentConfig) -> Result<Vec<u8>, TryOnError> {
        let scene = assemble_with_theme(config, &self.theme);
        Ok(capture_with_retry(&self.capture, &scene)?)
    }

    /// Captures the design and generates a try-on photo of it.
    ///
    /// Fails with [`TryOnError::Superseded`] if another request started
    /// before this one finished.
    pub fn generate(
        &self,
        config: &GarmentConfig,
        model: &ModelAttributes,
    ) -> Result<Vec<u8>, TryOnError> {
        let token = self.tracker.begin();
        debug!("try-on request {} for {:?}", token.0, model.gender);

        let result = self
            .capture_design(config)
            .and_then(|image| self.generator.generate(&image, model, config));
        self.tracker.resolve(token, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;
    use std::cell::Cell;

    struct FakeCapture {
        fail: bool,
        calls: Cell<u32>,
    }

    impl FakeCapture {
        fn ok() -> Self {
            Self {
                fail: false,
                calls: Cell::new(0),
            }
        }

        fn broken() -> Self {
            Self {
                fail: true,
                calls: Cell::new(0),
            }
        }
    }

    impl CaptureBridge for FakeCapture {
        fn capture(&self, scene: &Scene) -> Result<Vec<u8>, CaptureError> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                return Err(CaptureError::SurfaceUnavailable {
                    width: 1000,
                    height: 1200,
                });
            }
            Ok(format!("layers:{}", scene.layers.len()).into_bytes())
        }
    }

    fn echo(
        image: &[u8],
        model: &ModelAttributes,
        _: &GarmentConfig,
    ) -> Result<Vec<u8>, TryOnError> {
        let mut out = image.to_vec();
        out.extend_from_slice(format!("/{:?}", model.gender).as_bytes());
        Ok(out)
    }

    #[test]
    fn generator_receives_the_captured_design() {
        let session = TryOnSession::new(FakeCapture::ok(), echo);
        let config = GarmentConfig::new().with_chest_stripe(true);
        let photo = session
            .generate(&config, &ModelAttributes::new(Gender::Female))
            .unwrap();
        assert_eq!(photo, b"layers:6/Female");
    }

    #[test]
    fn service_errors_surface_verbatim() {
        let quota = |_: &[u8], _: &ModelAttributes, _: &GarmentConfig| {
            Err::<Vec<u8>, _>(TryOnError::Quota("Daily quota exceeded.".into()))
        };
        let session = TryOnSession::new(FakeCapture::ok(), quota);
        let config = GarmentConfig::new().with_trim_line_count(2);
        let before = config.clone();

        let err = session.generate(&config, &ModelAttributes::default()).unwrap_err();
        assert_eq!(err.to_string(), "Daily quota exceeded.");
        assert_eq!(config, before);
    }

    #[test]
    fn capture_failure_is_retried_once_then_reported() {
        let session = TryOnSession::new(FakeCapture::broken(), echo);
        let err = session
            .generate(&GarmentConfig::new(), &ModelAttributes::default())
            .unwrap_err();
        assert!(matches!(err, TryOnError::Capture(_)));
        assert!(err.to_string().starts_with("could not capture design"));
        assert_eq!(session.capture.calls.get(), 2);
    }

    #[test]
    fn newer_request_supersedes_older() {
        let tracker = Arc::new(RequestTracker::new());
        let interrupter = Arc::clone(&tracker);
        // The user starts another request while this one is in flight.
        let slow = move |image: &[u8], _: &ModelAttributes, _: &GarmentConfig| {
            interrupter.begin();
            Ok::<_, TryOnError>(image.to_vec())
        };
        let session = TryOnSession::with_tracker(FakeCapture::ok(), slow, tracker);

        let err = session
            .generate(&GarmentConfig::new(), &ModelAttributes::default())
            .unwrap_err();
        assert!(matches!(err, TryOnError::Superseded));
    }

    #[test]
    fn tracker_only_honours_the_latest_token() {
        let tracker = RequestTracker::new();
        let first = tracker.begin();
        let second = tracker.begin();
        assert!(first < second);
        assert!(matches!(tracker.resolve(first, Ok(1)), Err(TryOnError::Superseded)));
        assert_eq!(tracker.resolve(second, Ok(2)).unwrap(), 2);

        tracker.cancel();
        assert!(!tracker.is_current(second));
    }

    #[test]
    fn gender_serializes_lowercase() {
        let json = serde_json::to_string(&ModelAttributes::new(Gender::Female)).unwrap();
        assert_eq!(json, r#"{"gender":"female"}"#);
    }
}
