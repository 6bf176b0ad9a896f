use quiz_layout::*;
use tempfile::NamedTempFile;

fn sample_options() -> QuizOptions {
    QuizOptions {
        selection: vec![
            CategorySelection::new("arithmetic", "addition", 4),
            CategorySelection::new("geometry", "angles", 2),
        ],
        rounds: 2,
        questions_per_round: 3,
        ..Default::default()
    }
}

#[test]
fn test_default_options() {
    let options = QuizOptions::default();
    assert_eq!(options.rounds, 1);
    assert_eq!(options.questions_per_round, 10);
    assert_eq!(options.max_attempts, DEFAULT_MAX_ATTEMPTS);
    assert_eq!(options.strategy, DistributionStrategy::BalancedRotation);
    assert_eq!(options.grid, GridOptions::new(4, 8));
    assert_eq!(options.placement, PlacementStrategyKind::TopLeft);
    assert!(options.seed.is_none());
}

#[test]
fn test_validate_accepts_sample() {
    let options = sample_options();
    assert!(options.validate().is_ok());
    assert_eq!(options.capacity(), 6);
    assert_eq!(options.requested_total(), 6);
}

#[test]
fn test_validate_rejects_bad_values() {
    let cases: Vec<(QuizOptions, &str)> = vec![
        (
            QuizOptions {
                selection: Vec::new(),
                ..sample_options()
            },
            "No categories selected",
        ),
        (
            QuizOptions {
                rounds: 0,
                ..sample_options()
            },
            "At least one round",
        ),
        (
            QuizOptions {
                questions_per_round: 0,
                ..sample_options()
            },
            "Questions per round",
        ),
        (
            QuizOptions {
                max_attempts: 0,
                ..sample_options()
            },
            "Max attempts",
        ),
        (
            QuizOptions {
                grid: GridOptions::new(0, 8),
                ..sample_options()
            },
            "got 0x8",
        ),
    ];

    for (options, expected) in cases {
        match options.validate() {
            Err(QuizError::Config(msg)) => {
                assert!(msg.contains(expected), "'{}' should mention '{}'", msg, expected)
            }
            other => panic!("Expected Config error for '{}', got {:?}", expected, other),
        }
    }
}

#[tokio::test]
async fn test_save_and_load() {
    let file = NamedTempFile::new().unwrap();
    let options = QuizOptions {
        strategy: DistributionStrategy::DifficultySorted,
        difficulty_order: DifficultyOrder::Descending,
        seed: Some(99),
        placement: PlacementStrategyKind::Compact,
        grid: GridOptions::new(5, 6),
        ..sample_options()
    };

    options.save(file.path()).await.unwrap();
    let loaded = QuizOptions::load(file.path()).await.unwrap();
    assert_eq!(loaded, options);
}

#[tokio::test]
async fn test_load_partial_config_uses_defaults() {
    let file = NamedTempFile::new().unwrap();
    std::fs::write(
        file.path(),
        r#"{
            "selection": [
                { "category": "arithmetic", "subcategory": "addition", "requested_count": 5 }
            ],
            "rounds": 3,
            "strategy": "Random"
        }"#,
    )
    .unwrap();

    let loaded = QuizOptions::load(file.path()).await.unwrap();
    assert_eq!(loaded.rounds, 3);
    assert_eq!(loaded.strategy, DistributionStrategy::Random);
    assert_eq!(loaded.questions_per_round, 10);
    assert_eq!(loaded.grid, GridOptions::default());
    assert_eq!(
        loaded.selection,
        vec![CategorySelection::new("arithmetic", "addition", 5)]
    );
}

#[tokio::test]
async fn test_load_invalid_json_is_config_error() {
    let file = NamedTempFile::new().unwrap();
    std::fs::write(file.path(), "{ rounds: ").unwrap();

    match QuizOptions::load(file.path()).await {
        Err(QuizError::Config(msg)) => assert!(msg.starts_with("Failed to parse config")),
        other => panic!("Expected Config error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = QuizOptions::load(dir.path().join("missing.json")).await;
    assert!(matches!(result, Err(QuizError::Io(_))));
}

#[tokio::test]
async fn test_load_selection_csv() {
    let file = NamedTempFile::new().unwrap();
    std::fs::write(
        file.path(),
        "category,subcategory,requested_count\n\
         arithmetic,addition,3\n\
         geometry , angles , 2\n",
    )
    .unwrap();

    let selection = load_selection_csv(file.path()).await.unwrap();
    assert_eq!(
        selection,
        vec![
            CategorySelection::new("arithmetic", "addition", 3),
            CategorySelection::new("geometry", "angles", 2),
        ]
    );
}
