use super::*;

fn image(name: &str) -> ImageRef {
    ImageRef::new(format!("/photos/{name}.jpg"))
}

fn transport_error() -> ClientError {
    ClientError::UnexpectedStatus {
        status: 503,
        endpoint: "/predict",
        message: None,
    }
}

/// Drives a session to `Enriching` for `label` and returns the generation.
fn classified(session: &mut DiagnosisSession, name: &str, label: &str) -> Generation {
    session.reduce(DiagnosisEvent::ImageAcquired(image(name)));
    let effects = session.reduce(DiagnosisEvent::SubmitRequested);
    let generation = session.generation();
    assert_eq!(effects.len(), 1);
    session.reduce(DiagnosisEvent::ClassifyCompleted {
        generation,
        result: Ok(label.to_string()),
    });
    generation
}

#[test]
fn enrichment_path_matches_healthy_case_insensitively() {
    assert_eq!(EnrichmentPath::for_label("Healthy"), EnrichmentPath::HealthyAdvice);
    assert_eq!(
        EnrichmentPath::for_label("Tomato___healthy"),
        EnrichmentPath::HealthyAdvice
    );
    assert_eq!(EnrichmentPath::for_label("UNHEALTHY-LOOKING"), EnrichmentPath::HealthyAdvice);
    assert_eq!(EnrichmentPath::for_label("Leaf Blight"), EnrichmentPath::DiseaseInfo);
}

#[test]
fn new_session_is_idle_without_affordance() {
    let session = DiagnosisSession::new();
    assert_eq!(session.phase(), DiagnosisPhase::Idle);
    assert!(!session.can_find_stores());
    assert!(session.proceed_to_store_resolver().is_none());
}

#[test]
fn permission_denied_warns_and_stays_idle() {
    let mut session = DiagnosisSession::new();
    let effects = session.reduce(DiagnosisEvent::PermissionDenied(ImageSource::Camera));
    assert!(effects.is_empty());
    assert_eq!(session.phase(), DiagnosisPhase::Idle);
    assert_eq!(session.notices().len(), 1);
    assert_eq!(session.notices()[0].level, NoticeLevel::Warning);
    assert!(session.notices()[0].message.contains("camera"));
}

#[test]
fn submit_outside_image_ready_is_ignored() {
    let mut session = DiagnosisSession::new();
    assert!(session.reduce(DiagnosisEvent::SubmitRequested).is_empty());
    assert_eq!(session.phase(), DiagnosisPhase::Idle);
}

#[test]
fn submit_issues_single_classify_effect() {
    let mut session = DiagnosisSession::new();
    session.reduce(DiagnosisEvent::ImageAcquired(image("leaf")));
    let effects = session.reduce(DiagnosisEvent::SubmitRequested);
    assert_eq!(session.phase(), DiagnosisPhase::Uploading);
    assert_eq!(
        effects,
        vec![DiagnosisEffect::Classify {
            generation: session.generation(),
            image: image("leaf"),
        }]
    );
    // A second tap while uploading does nothing.
    assert!(session.reduce(DiagnosisEvent::SubmitRequested).is_empty());
}

#[test]
fn classification_fans_out_exactly_one_enrichment_and_category() {
    let mut session = DiagnosisSession::new();
    session.reduce(DiagnosisEvent::ImageAcquired(image("leaf")));
    session.reduce(DiagnosisEvent::SubmitRequested);
    let generation = session.generation();
    let effects = session.reduce(DiagnosisEvent::ClassifyCompleted {
        generation,
        result: Ok("Leaf Blight".to_string()),
    });

    assert_eq!(session.phase(), DiagnosisPhase::Enriching);
    assert_eq!(session.category_phase(), CategoryPhase::Resolving);
    assert_eq!(session.predicted_label(), Some("Leaf Blight"));
    assert_eq!(session.enrichment_text(), None);
    assert_eq!(
        effects,
        vec![
            DiagnosisEffect::Enrich {
                generation,
                path: EnrichmentPath::DiseaseInfo,
                label: "Leaf Blight".to_string(),
            },
            DiagnosisEffect::ResolveCategory {
                generation,
                label: "Leaf Blight".to_string(),
            },
        ]
    );
}

#[test]
fn classify_failure_returns_to_image_ready_keeping_image() {
    let mut session = DiagnosisSession::new();
    session.reduce(DiagnosisEvent::ImageAcquired(image("leaf")));
    session.reduce(DiagnosisEvent::SubmitRequested);
    let effects = session.reduce(DiagnosisEvent::ClassifyCompleted {
        generation: session.generation(),
        result: Err(transport_error()),
    });

    assert!(effects.is_empty());
    assert_eq!(session.phase(), DiagnosisPhase::ImageReady);
    assert_eq!(session.image(), Some(&image("leaf")));
    assert_eq!(session.notices()[0].level, NoticeLevel::Error);

    // Retry without re-picking.
    assert_eq!(session.reduce(DiagnosisEvent::SubmitRequested).len(), 1);
}

#[test]
fn enrichment_reaches_ready_before_category_lands() {
    let mut session = DiagnosisSession::new();
    let generation = classified(&mut session, "leaf", "Leaf Blight");

    session.reduce(DiagnosisEvent::EnrichmentCompleted {
        generation,
        result: Ok("1. **Causes**: Fungus.".to_string()),
    });
    assert_eq!(session.phase(), DiagnosisPhase::Ready);
    assert!(!session.can_find_stores());
    assert_eq!(session.enrichment_sections().len(), 1);

    session.reduce(DiagnosisEvent::CategoryCompleted {
        generation,
        result: Ok(Some("pesticide_store".to_string())),
    });
    assert_eq!(session.phase(), DiagnosisPhase::Ready);
    assert_eq!(session.enrichment_text(), Some("1. **Causes**: Fungus."));
    assert_eq!(
        session.proceed_to_store_resolver().map(StoreHandoff::into_category),
        Some("pesticide_store".to_string())
    );
}

#[test]
fn category_landing_first_does_not_gate_ready() {
    let mut session = DiagnosisSession::new();
    let generation = classified(&mut session, "leaf", "Leaf Blight");

    session.reduce(DiagnosisEvent::CategoryCompleted {
        generation,
        result: Ok(Some("pesticide_store".to_string())),
    });
    assert_eq!(session.phase(), DiagnosisPhase::Enriching);
    assert!(session.can_find_stores());

    session.reduce(DiagnosisEvent::EnrichmentCompleted {
        generation,
        result: Ok("Spray copper.".to_string()),
    });
    assert_eq!(session.phase(), DiagnosisPhase::Ready);
    assert!(session.can_find_stores());
}

#[test]
fn category_failure_is_swallowed() {
    let mut session = DiagnosisSession::new();
    let generation = classified(&mut session, "leaf", "Healthy");

    session.reduce(DiagnosisEvent::CategoryCompleted {
        generation,
        result: Err(transport_error()),
    });
    session.reduce(DiagnosisEvent::EnrichmentCompleted {
        generation,
        result: Ok("Keep watering.".to_string()),
    });

    assert_eq!(session.phase(), DiagnosisPhase::Ready);
    assert_eq!(session.category_phase(), CategoryPhase::Absent);
    assert!(session.notices().is_empty(), "category failure must not surface");
    assert!(!session.can_find_stores());
}

#[test]
fn enrichment_failure_surfaces_and_rolls_back() {
    let mut session = DiagnosisSession::new();
    let generation = classified(&mut session, "leaf", "Leaf Blight");

    session.reduce(DiagnosisEvent::EnrichmentCompleted {
        generation,
        result: Err(transport_error()),
    });
    assert_eq!(session.phase(), DiagnosisPhase::ImageReady);
    assert_eq!(session.enrichment_text(), None);
    assert_eq!(session.take_notices().len(), 1);
    assert!(session.notices().is_empty());
}

fn assert_rolled_back(session: &DiagnosisSession) {
    assert_eq!(session.phase(), DiagnosisPhase::ImageReady);
    assert_eq!(session.image(), Some(&image("leaf")));
    assert_eq!(session.predicted_label(), None);
    assert_eq!(session.enrichment_text(), None);
    assert_eq!(session.category_phase(), CategoryPhase::Idle);
    assert!(!session.can_find_stores());
    assert!(session.proceed_to_store_resolver().is_none());
}

#[test]
fn category_arriving_after_enrichment_failure_is_dropped() {
    let mut session = DiagnosisSession::new();
    let generation = classified(&mut session, "leaf", "Leaf Blight");

    session.reduce(DiagnosisEvent::EnrichmentCompleted {
        generation,
        result: Err(transport_error()),
    });
    session.reduce(DiagnosisEvent::CategoryCompleted {
        generation,
        result: Ok(Some("pesticide_store".to_string())),
    });

    assert_rolled_back(&session);
}

#[test]
fn category_arriving_before_enrichment_failure_is_cleared() {
    let mut session = DiagnosisSession::new();
    let generation = classified(&mut session, "leaf", "Leaf Blight");

    session.reduce(DiagnosisEvent::CategoryCompleted {
        generation,
        result: Ok(Some("pesticide_store".to_string())),
    });
    assert!(session.can_find_stores());
    session.reduce(DiagnosisEvent::EnrichmentCompleted {
        generation,
        result: Err(transport_error()),
    });

    assert_rolled_back(&session);
}

#[test]
fn retry_after_enrichment_failure_starts_a_fresh_attempt() {
    let mut session = DiagnosisSession::new();
    let failed = classified(&mut session, "leaf", "Leaf Blight");
    session.reduce(DiagnosisEvent::EnrichmentCompleted {
        generation: failed,
        result: Err(transport_error()),
    });

    let effects = session.reduce(DiagnosisEvent::SubmitRequested);
    assert_eq!(effects.len(), 1);
    assert_eq!(session.phase(), DiagnosisPhase::Uploading);
    assert!(session.generation() > failed);
}

#[test]
fn new_image_resets_all_downstream_fields_atomically() {
    let mut session = DiagnosisSession::new();
    let generation = classified(&mut session, "leaf", "Leaf Blight");
    session.reduce(DiagnosisEvent::EnrichmentCompleted {
        generation,
        result: Ok("Spray copper.".to_string()),
    });
    session.reduce(DiagnosisEvent::CategoryCompleted {
        generation,
        result: Ok(Some("pesticide_store".to_string())),
    });

    session.reduce(DiagnosisEvent::ImageAcquired(image("second")));
    assert_eq!(session.phase(), DiagnosisPhase::ImageReady);
    assert_eq!(session.predicted_label(), None);
    assert_eq!(session.enrichment_text(), None);
    assert!(!session.can_find_stores());
    assert_eq!(session.category_phase(), CategoryPhase::Idle);
    assert!(session.generation() > generation);
}

#[test]
fn late_results_from_previous_image_are_dropped() {
    let mut session = DiagnosisSession::new();
    let old = classified(&mut session, "first", "Leaf Blight");

    let new = classified(&mut session, "second", "Healthy");
    assert_ne!(old, new);

    session.reduce(DiagnosisEvent::EnrichmentCompleted {
        generation: old,
        result: Ok("stale disease info".to_string()),
    });
    session.reduce(DiagnosisEvent::CategoryCompleted {
        generation: old,
        result: Ok(Some("pesticide_store".to_string())),
    });
    assert_eq!(session.phase(), DiagnosisPhase::Enriching);
    assert_eq!(session.enrichment_text(), None);
    assert!(!session.can_find_stores());

    session.reduce(DiagnosisEvent::EnrichmentCompleted {
        generation: new,
        result: Ok("fresh advice".to_string()),
    });
    assert_eq!(session.enrichment_text(), Some("fresh advice"));
    assert_eq!(session.predicted_label(), Some("Healthy"));
}

#[test]
fn late_classification_after_new_image_is_dropped() {
    let mut session = DiagnosisSession::new();
    session.reduce(DiagnosisEvent::ImageAcquired(image("first")));
    session.reduce(DiagnosisEvent::SubmitRequested);
    let old = session.generation();

    session.reduce(DiagnosisEvent::ImageAcquired(image("second")));
    let effects = session.reduce(DiagnosisEvent::ClassifyCompleted {
        generation: old,
        result: Ok("Leaf Blight".to_string()),
    });

    assert!(effects.is_empty());
    assert_eq!(session.phase(), DiagnosisPhase::ImageReady);
    assert_eq!(session.predicted_label(), None);
}

#[test]
fn display_label_strips_markdown() {
    let mut session = DiagnosisSession::new();
    classified(&mut session, "leaf", "**Tomato___Late_blight**");
    assert_eq!(session.display_label().as_deref(), Some("Tomato___Late_blight"));
}

#[test]
fn label_is_forwarded_to_enrichment_unchanged() {
    let mut session = DiagnosisSession::new();
    session.reduce(DiagnosisEvent::ImageAcquired(image("leaf")));
    session.reduce(DiagnosisEvent::SubmitRequested);
    let generation = session.generation();
    let effects = session.reduce(DiagnosisEvent::ClassifyCompleted {
        generation,
        result: Ok(" Leaf Blight ".to_string()),
    });

    assert_eq!(session.predicted_label(), Some(" Leaf Blight "));
    assert!(effects.iter().all(|effect| match effect {
        DiagnosisEffect::Enrich { label, .. } | DiagnosisEffect::ResolveCategory { label, .. } =>
            label == " Leaf Blight ",
        DiagnosisEffect::Classify { .. } => false,
    }));
}
