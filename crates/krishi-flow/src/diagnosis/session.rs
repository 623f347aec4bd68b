use krishi_client::ClientError;
use krishi_core::{parse_sections, strip_markdown, ImageRef, ImageSource, Section};

use crate::device::DeviceError;
use crate::generation::Generation;
use crate::notice::{Notice, NoticeLevel};

/// Main-line progress of a diagnosis attempt.
///
/// `Classified` is entered and left within the same transition: as soon as a
/// label arrives the enrichment request is issued and the phase becomes
/// `Enriching`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosisPhase {
    Idle,
    ImageReady,
    Uploading,
    Classified,
    Enriching,
    Ready,
}

/// Side branch resolving the recommended store category. Never gates `Ready`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryPhase {
    Idle,
    Resolving,
    /// A non-empty category is available.
    Ready,
    /// The backend had no recommendation, or the call failed.
    Absent,
}

/// Which enrichment endpoint serves a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrichmentPath {
    HealthyAdvice,
    DiseaseInfo,
}

impl EnrichmentPath {
    /// Labels containing "healthy" in any case get general care advice;
    /// everything else is treated as a disease.
    #[must_use]
    pub fn for_label(label: &str) -> Self {
        if label.to_lowercase().contains("healthy") {
            EnrichmentPath::HealthyAdvice
        } else {
            EnrichmentPath::DiseaseInfo
        }
    }
}

/// Handed to the store resolver. Carries only the category, never the
/// diagnosis it was derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreHandoff {
    category: String,
}

impl StoreHandoff {
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn into_category(self) -> String {
        self.category
    }
}

#[derive(Debug)]
pub enum DiagnosisEvent {
    ImageAcquired(ImageRef),
    PermissionDenied(ImageSource),
    DeviceFailed(DeviceError),
    SubmitRequested,
    ClassifyCompleted {
        generation: Generation,
        result: Result<String, ClientError>,
    },
    EnrichmentCompleted {
        generation: Generation,
        result: Result<String, ClientError>,
    },
    CategoryCompleted {
        generation: Generation,
        result: Result<Option<String>, ClientError>,
    },
}

/// Backend work requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosisEffect {
    Classify {
        generation: Generation,
        image: ImageRef,
    },
    Enrich {
        generation: Generation,
        path: EnrichmentPath,
        label: String,
    },
    ResolveCategory {
        generation: Generation,
        label: String,
    },
}

/// State of one diagnosis attempt.
///
/// Invariants:
/// - `enrichment_text` is only set while `predicted_label` is set;
/// - label, enrichment and category always come from the same generation;
/// - a new image, a new submission or a failed enrichment clears all three
///   together.
#[derive(Debug)]
pub struct DiagnosisSession {
    generation: Generation,
    phase: DiagnosisPhase,
    category_phase: CategoryPhase,
    image: Option<ImageRef>,
    predicted_label: Option<String>,
    enrichment_text: Option<String>,
    recommended_category: Option<String>,
    notices: Vec<Notice>,
}

impl Default for DiagnosisSession {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosisSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            generation: Generation::default(),
            phase: DiagnosisPhase::Idle,
            category_phase: CategoryPhase::Idle,
            image: None,
            predicted_label: None,
            enrichment_text: None,
            recommended_category: None,
            notices: Vec::new(),
        }
    }

    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    #[must_use]
    pub fn phase(&self) -> DiagnosisPhase {
        self.phase
    }

    #[must_use]
    pub fn category_phase(&self) -> CategoryPhase {
        self.category_phase
    }

    #[must_use]
    pub fn image(&self) -> Option<&ImageRef> {
        self.image.as_ref()
    }

    #[must_use]
    pub fn predicted_label(&self) -> Option<&str> {
        self.predicted_label.as_deref()
    }

    /// The label with markdown emphasis and numbering removed, for display.
    #[must_use]
    pub fn display_label(&self) -> Option<String> {
        self.predicted_label.as_deref().map(strip_markdown)
    }

    #[must_use]
    pub fn enrichment_text(&self) -> Option<&str> {
        self.enrichment_text.as_deref()
    }

    #[must_use]
    pub fn enrichment_sections(&self) -> Vec<Section> {
        self.enrichment_text
            .as_deref()
            .map(parse_sections)
            .unwrap_or_default()
    }

    /// Whether the "Find Local Stores" affordance should be offered.
    #[must_use]
    pub fn can_find_stores(&self) -> bool {
        self.recommended_category.is_some()
    }

    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// The category handoff for the store resolver, when one was recommended.
    #[must_use]
    pub fn proceed_to_store_resolver(&self) -> Option<StoreHandoff> {
        self.recommended_category
            .as_ref()
            .map(|category| StoreHandoff {
                category: category.clone(),
            })
    }

    /// Applies one event and returns the backend work it requires.
    pub fn reduce(&mut self, event: DiagnosisEvent) -> Vec<DiagnosisEffect> {
        match event {
            DiagnosisEvent::ImageAcquired(image) => {
                self.start_generation();
                tracing::debug!(generation = %self.generation, file = image.file_name(), "image ready");
                self.image = Some(image);
                self.phase = DiagnosisPhase::ImageReady;
                Vec::new()
            }
            DiagnosisEvent::PermissionDenied(source) => {
                let what = match source {
                    ImageSource::Camera => "camera",
                    ImageSource::Gallery => "photo library",
                };
                tracing::info!(%source, "image permission denied");
                self.notices.push(Notice::warning(format!(
                    "Permission to access the {what} is required"
                )));
                Vec::new()
            }
            DiagnosisEvent::DeviceFailed(err) => {
                tracing::warn!(error = %err, "image acquisition failed");
                self.notices.push(Notice::warning(err.to_string()));
                Vec::new()
            }
            DiagnosisEvent::SubmitRequested => self.submit(),
            DiagnosisEvent::ClassifyCompleted { generation, result } => {
                if self.is_stale(generation, self.phase == DiagnosisPhase::Uploading) {
                    tracing::debug!(%generation, current = %self.generation, "dropping stale classification");
                    return Vec::new();
                }
                self.on_classified(result)
            }
            DiagnosisEvent::EnrichmentCompleted { generation, result } => {
                if self.is_stale(generation, self.phase == DiagnosisPhase::Enriching) {
                    tracing::debug!(%generation, current = %self.generation, "dropping stale enrichment");
                    return Vec::new();
                }
                self.on_enriched(result);
                Vec::new()
            }
            DiagnosisEvent::CategoryCompleted { generation, result } => {
                if self.is_stale(generation, self.category_phase == CategoryPhase::Resolving) {
                    tracing::debug!(%generation, current = %self.generation, "dropping stale category");
                    return Vec::new();
                }
                self.on_category(result);
                Vec::new()
            }
        }
    }

    fn submit(&mut self) -> Vec<DiagnosisEffect> {
        if self.phase != DiagnosisPhase::ImageReady {
            tracing::debug!(phase = ?self.phase, "submit ignored outside ImageReady");
            return Vec::new();
        }
        let Some(image) = self.image.clone() else {
            return Vec::new();
        };
        self.start_generation();
        self.phase = DiagnosisPhase::Uploading;
        tracing::info!(generation = %self.generation, file = image.file_name(), "submitting image for diagnosis");
        vec![DiagnosisEffect::Classify {
            generation: self.generation,
            image,
        }]
    }

    fn on_classified(&mut self, result: Result<String, ClientError>) -> Vec<DiagnosisEffect> {
        match result {
            Ok(label) => {
                self.phase = DiagnosisPhase::Classified;
                let path = EnrichmentPath::for_label(&label);
                tracing::info!(generation = %self.generation, label = %label, ?path, "image classified");
                self.predicted_label = Some(label.clone());

                self.phase = DiagnosisPhase::Enriching;
                self.category_phase = CategoryPhase::Resolving;
                vec![
                    DiagnosisEffect::Enrich {
                        generation: self.generation,
                        path,
                        label: label.clone(),
                    },
                    DiagnosisEffect::ResolveCategory {
                        generation: self.generation,
                        label,
                    },
                ]
            }
            Err(err) => {
                tracing::warn!(generation = %self.generation, error = %err, "classification failed");
                self.notices.push(Notice::from_client(
                    NoticeLevel::Error,
                    "Could not diagnose the image",
                    &err,
                ));
                self.phase = DiagnosisPhase::ImageReady;
                Vec::new()
            }
        }
    }

    fn on_enriched(&mut self, result: Result<String, ClientError>) {
        match result {
            Ok(text) => {
                self.enrichment_text = Some(text);
                self.phase = DiagnosisPhase::Ready;
                tracing::info!(generation = %self.generation, "diagnosis ready");
            }
            Err(err) => {
                tracing::warn!(generation = %self.generation, error = %err, "enrichment failed");
                self.notices.push(Notice::from_client(
                    NoticeLevel::Error,
                    "Could not load advice for this diagnosis",
                    &err,
                ));
                // The label and any category from this attempt go with it; a
                // category reply still in flight is now stale.
                self.start_generation();
                self.phase = DiagnosisPhase::ImageReady;
            }
        }
    }

    fn on_category(&mut self, result: Result<Option<String>, ClientError>) {
        match result {
            Ok(Some(category)) => {
                tracing::debug!(generation = %self.generation, "store category resolved");
                self.recommended_category = Some(category);
                self.category_phase = CategoryPhase::Ready;
            }
            Ok(None) => {
                tracing::debug!(generation = %self.generation, "no store category recommended");
                self.category_phase = CategoryPhase::Absent;
            }
            Err(err) => {
                // Swallowed: the store affordance simply does not appear.
                tracing::warn!(generation = %self.generation, error = %err, "store category lookup failed");
                self.category_phase = CategoryPhase::Absent;
            }
        }
    }

    /// Bumps the generation and clears every field derived from a classification.
    fn start_generation(&mut self) {
        self.generation = self.generation.next();
        self.predicted_label = None;
        self.enrichment_text = None;
        self.recommended_category = None;
        self.category_phase = CategoryPhase::Idle;
    }

    fn is_stale(&self, generation: Generation, expected_phase: bool) -> bool {
        generation != self.generation || !expected_phase
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
