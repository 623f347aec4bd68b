use std::sync::Arc;

use krishi_core::ImageSource;

use super::session::{
    DiagnosisEffect, DiagnosisEvent, DiagnosisSession, EnrichmentPath, StoreHandoff,
};
use crate::backend::DiagnosisBackend;
use crate::device::{ImagePicker, PermissionStatus};
use crate::notice::Notice;
use crate::runner::InFlight;

/// Runs a [`DiagnosisSession`] against a backend and an image picker.
///
/// Effects returned by the session are started immediately and polled by
/// [`next_completion`](Self::next_completion) / [`settle`](Self::settle);
/// nothing runs in the background between those calls.
pub struct DiagnosisController<B, P> {
    session: DiagnosisSession,
    backend: Arc<B>,
    picker: P,
    in_flight: InFlight<DiagnosisEvent>,
}

impl<B, P> DiagnosisController<B, P>
where
    B: DiagnosisBackend + 'static,
    P: ImagePicker,
{
    pub fn new(backend: Arc<B>, picker: P) -> Self {
        Self {
            session: DiagnosisSession::new(),
            backend,
            picker,
            in_flight: InFlight::new(),
        }
    }

    pub fn session(&self) -> &DiagnosisSession {
        &self.session
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.session.take_notices()
    }

    /// Number of backend calls started and not yet folded back in.
    pub fn pending(&self) -> usize {
        self.in_flight.len()
    }

    /// Asks for permission, then lets the user pick from `source`.
    ///
    /// A cancelled pick leaves the session untouched.
    pub async fn acquire_image(&mut self, source: ImageSource) {
        if self.picker.request_permission(source).await == PermissionStatus::Denied {
            self.dispatch(DiagnosisEvent::PermissionDenied(source));
            return;
        }
        match self.picker.pick(source).await {
            Ok(Some(image)) => self.dispatch(DiagnosisEvent::ImageAcquired(image)),
            Ok(None) => tracing::debug!(%source, "image pick cancelled"),
            Err(err) => self.dispatch(DiagnosisEvent::DeviceFailed(err)),
        }
    }

    pub fn submit_for_diagnosis(&mut self) {
        self.dispatch(DiagnosisEvent::SubmitRequested);
    }

    /// Feeds one event to the session and starts whatever work it asks for.
    pub fn dispatch(&mut self, event: DiagnosisEvent) {
        for effect in self.session.reduce(event) {
            self.start(effect);
        }
    }

    /// Waits for one pending call and applies its result. Returns `false`
    /// when nothing was pending.
    pub async fn next_completion(&mut self) -> bool {
        match self.in_flight.next().await {
            Some(event) => {
                self.dispatch(event);
                true
            }
            None => false,
        }
    }

    /// Drives pending work, including any follow-ups, until none is left.
    pub async fn settle(&mut self) {
        while self.next_completion().await {}
    }

    pub fn proceed_to_store_resolver(&self) -> Option<StoreHandoff> {
        self.session.proceed_to_store_resolver()
    }

    fn start(&mut self, effect: DiagnosisEffect) {
        let backend = Arc::clone(&self.backend);
        match effect {
            DiagnosisEffect::Classify { generation, image } => {
                self.in_flight.push(async move {
                    let result = backend.classify(&image).await;
                    DiagnosisEvent::ClassifyCompleted { generation, result }
                });
            }
            DiagnosisEffect::Enrich {
                generation,
                path,
                label,
            } => {
                self.in_flight.push(async move {
                    let result = match path {
                        EnrichmentPath::HealthyAdvice => backend.healthy_advice().await,
                        EnrichmentPath::DiseaseInfo => backend.disease_info(&label).await,
                    };
                    DiagnosisEvent::EnrichmentCompleted { generation, result }
                });
            }
            DiagnosisEffect::ResolveCategory { generation, label } => {
                self.in_flight.push(async move {
                    let result = backend.recommended_store_type(&label).await;
                    DiagnosisEvent::CategoryCompleted { generation, result }
                });
            }
        }
    }
}
