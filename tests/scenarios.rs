use complaint_router::analysis::normalizer::TextNormalizer;
use complaint_router::category::CategoryLabel;
use complaint_router::config::{ClassifierConfig, EngineConfig, VectorizerConfig};
use complaint_router::corpus::{LabeledExample, builtin_corpus};
use complaint_router::engine::Engine;
use complaint_router::error::{Result, RouterError};
use complaint_router::ml::tfidf::FeatureVectorizer;
use complaint_router::ml::vocabulary::VocabularyModel;
use complaint_router::routing::department::DepartmentDirectory;

fn two_example_engine() -> Result<Engine> {
    let corpus = vec![
        LabeledExample::new(
            "boss touches me inappropriately",
            CategoryLabel::WorkplaceHarassment,
        ),
        LabeledExample::new(
            "husband locks me inside daily",
            CategoryLabel::DomesticViolence,
        ),
    ];
    Engine::with_corpus(EngineConfig::default(), &corpus)
}

#[test]
fn confident_prediction_is_accepted() -> Result<()> {
    let engine = two_example_engine()?;

    let result = engine.classify_text("my boss keeps touching me");
    assert_eq!(result.category, CategoryLabel::WorkplaceHarassment);
    assert!(result.accepted);
    assert!(result.confidence >= 0.6);
    Ok(())
}

#[test]
fn empty_text_falls_back() -> Result<()> {
    let engine = two_example_engine()?;

    let result = engine.classify_text("");
    assert_eq!(result.category, CategoryLabel::GeneralComplaint);
    assert!(!result.accepted);
    assert_eq!(result.confidence, 0.0);
    Ok(())
}

#[test]
fn out_of_vocabulary_text_falls_back() -> Result<()> {
    let engine = two_example_engine()?;

    let result = engine.classify_text("xyzzy plugh quux");
    assert_eq!(result.category, CategoryLabel::GeneralComplaint);
    assert!(!result.accepted);
    Ok(())
}

#[test]
fn mismatched_features_and_labels_are_rejected() -> Result<()> {
    let normalizer = TextNormalizer::default();
    let documents = [
        "boss touches me inappropriately",
        "husband locks me inside daily",
        "troll sends threats online",
    ]
    .iter()
    .map(|text| normalizer.normalize(text))
    .collect::<Result<Vec<_>>>()?;

    let vocabulary = VocabularyModel::fit(&documents, &VectorizerConfig::default())?;
    let features = FeatureVectorizer::new(&vocabulary).transform_all(&documents);
    let labels = [
        CategoryLabel::WorkplaceHarassment,
        CategoryLabel::DomesticViolence,
    ];

    let err = ClassifierConfig::default()
        .fit(&vocabulary, &features, &labels)
        .unwrap_err();
    assert!(matches!(
        err,
        RouterError::DimensionMismatch {
            features: 3,
            labels: 2
        }
    ));
    Ok(())
}

#[test]
fn unknown_category_routes_to_fallback_department() {
    let directory = DepartmentDirectory::builtin();

    let record = directory.resolve_name("Unknown Category");
    assert_eq!(record, directory.fallback_record());
    assert_eq!(record.category, CategoryLabel::GeneralComplaint);
}

#[test]
fn title_and_description_are_joined() -> Result<()> {
    let engine = two_example_engine()?;

    assert_eq!(
        engine.classify("my boss", "keeps touching me"),
        engine.classify_text("my boss keeps touching me")
    );
    Ok(())
}

#[test]
fn in_domain_complaints_reach_their_department() -> Result<()> {
    let engine = Engine::with_corpus(EngineConfig::default(), &builtin_corpus()?)?;

    for (title, description, category, department) in [
        (
            "Dowry demands",
            "in-laws keep demanding a car as additional dowry",
            CategoryLabel::DowryHarassment,
            "Dowry Prohibition Cell",
        ),
        (
            "Fake profile",
            "my colleague created a fake dating profile with my photos",
            CategoryLabel::CyberHarassment,
            "Cyber Crime Cell",
        ),
        (
            "Forced marriage",
            "my parents arranged a child marriage and took me out of school",
            CategoryLabel::ChildMarriage,
            "Child Welfare Committee",
        ),
    ] {
        let decision = engine.route_complaint(title, description);
        assert!(decision.prediction.accepted, "{description:?}");
        assert_eq!(decision.prediction.category, category);
        assert_eq!(decision.department.department_name, department);
    }
    Ok(())
}
