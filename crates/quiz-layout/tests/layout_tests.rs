use quiz_layout::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn record(size: QuestionSize, round_index: usize, sequence_index: usize) -> QuestionRecord<String> {
    QuestionRecord {
        category: "geometry".to_string(),
        subcategory: "area".to_string(),
        size,
        difficulty: Difficulty::Medium,
        round_index,
        sequence_index,
        payload: format!("q{sequence_index}"),
    }
}

/// Records with random sizes, grouped into rounds of random length
fn random_records(seed: u64, count: usize) -> Vec<QuestionRecord<String>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut round = 0;
    (0..count)
        .map(|i| {
            if i > 0 && rng.random_range(0..6) == 0 {
                round += 1;
            }
            let size = QuestionSize::ALL[rng.random_range(0..QuestionSize::ALL.len())];
            record(size, round, i)
        })
        .collect()
}

fn assert_layout_is_valid<P>(outcome: &LayoutOutcome<P>, grid: &GridOptions) {
    for (i, a) in outcome.placements.iter().enumerate() {
        assert!(a.row_end() <= grid.height, "row overflow: {:?}", (a.row, a.height_cells));
        assert!(a.col_end() <= grid.width, "col overflow: {:?}", (a.col, a.width_cells));
        assert!(a.page_index < outcome.total_pages);

        for b in &outcome.placements[i + 1..] {
            assert!(
                !a.overlaps(b),
                "placements #{} and #{} overlap on page {}",
                a.question_record.sequence_index,
                b.question_record.sequence_index,
                a.page_index
            );
        }
    }

    for pair in outcome.placements.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        if prev.question_record.round_index != next.question_record.round_index {
            assert!(
                next.page_index > prev.page_index,
                "round {} shares page {} with round {}",
                next.question_record.round_index,
                prev.page_index,
                prev.question_record.round_index
            );
        }
    }
}

#[test]
fn test_single_wide_goes_top_left() {
    let engine = LayoutEngine::new(GridOptions::default(), PlacementStrategyKind::TopLeft);
    let outcome = engine.layout(vec![record(QuestionSize::Wide, 0, 0)]).unwrap();

    let placed = &outcome.placements[0];
    assert_eq!(placed.page_index, 0);
    assert_eq!((placed.row, placed.col), (0, 0));
    assert_eq!((placed.width_cells, placed.height_cells), (2, 1));
    assert_eq!(outcome.total_pages, 1);
}

#[test]
fn test_new_round_forces_new_page() {
    // Five small questions, four per round
    let mut registry = GeneratorRegistry::new();
    registry.register("arithmetic", "addition", Difficulty::Easy, || {
        Ok::<_, GenerationError>(GeneratedQuestion {
            content: "1 + 1".to_string(),
            size_code: QuestionSize::Small.code(),
            difficulty: Difficulty::Easy,
            category: "arithmetic".to_string(),
            subcategory: "addition".to_string(),
        })
    });
    let mut distributor = QuestionDistributor::new(registry);
    let distribution = distributor
        .distribute(
            &[CategorySelection::new("arithmetic", "addition", 5)],
            2,
            4,
            DistributionStrategy::BalancedRotation,
        )
        .unwrap();

    let engine = LayoutEngine::new(GridOptions::default(), PlacementStrategyKind::TopLeft);
    let outcome = engine.layout(distribution.records).unwrap();

    let positions: Vec<_> = outcome
        .placements
        .iter()
        .map(|p| (p.page_index, p.row, p.col))
        .collect();
    assert_eq!(
        positions,
        vec![(0, 0, 0), (0, 0, 1), (0, 0, 2), (0, 0, 3), (1, 0, 0)]
    );
    assert_eq!(outcome.total_pages, 2);
}

#[test]
fn test_oversized_item_is_fatal() {
    // Extra is 4 cells wide; a 3-wide grid can never hold it
    let grid = GridOptions::new(3, 8);
    let engine = LayoutEngine::new(grid, PlacementStrategyKind::TopLeft);
    let records = vec![
        record(QuestionSize::Small, 0, 0),
        record(QuestionSize::Extra, 0, 1),
        record(QuestionSize::Small, 0, 2),
    ];

    let err = engine.layout(records).unwrap_err();
    match &err {
        LayoutError::ItemTooLarge {
            category,
            sequence_index,
            width,
            grid_width,
            ..
        } => {
            assert_eq!(category, "geometry");
            assert_eq!(*sequence_index, 1);
            assert_eq!(*width, 4);
            assert_eq!(*grid_width, 3);
        }
        other => panic!("Expected ItemTooLarge, got {:?}", other),
    }
    assert!(err.to_string().contains("#1"));
}

#[test]
fn test_oversized_height_is_fatal() {
    let grid = GridOptions::new(4, 1);
    let engine = LayoutEngine::new(grid, PlacementStrategyKind::Compact);
    let err = engine
        .layout(vec![record(QuestionSize::Square, 0, 0)])
        .unwrap_err();
    assert!(matches!(err, LayoutError::ItemTooLarge { height: 2, .. }));
}

#[test]
fn test_compact_packs_beside_existing_content() {
    // Row 0 = [occupied, empty, empty, empty]
    let mut grid = GridManager::new(4, 8);
    grid.place_at(0, 0, 0, 1, 1).unwrap();

    let (w, h) = QuestionSize::Small.cells();
    assert_eq!(
        CompactStrategy.find_position(&grid, 0, w, h),
        Some(GridPosition::new(0, 1))
    );
}

#[test]
fn test_layout_is_deterministic() {
    let grid = GridOptions::default();
    for kind in [PlacementStrategyKind::TopLeft, PlacementStrategyKind::Compact] {
        let engine = LayoutEngine::new(grid, kind);
        let first = engine.layout(random_records(11, 60)).unwrap();
        let second = engine.layout(random_records(11, 60)).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_random_layouts_are_valid() {
    for grid in [GridOptions::new(4, 8), GridOptions::new(5, 3), GridOptions::new(4, 2)] {
        for kind in [PlacementStrategyKind::TopLeft, PlacementStrategyKind::Compact] {
            let engine = LayoutEngine::new(grid, kind);
            for seed in 0..25 {
                let outcome = engine.layout(random_records(seed, 40)).unwrap();
                assert_eq!(outcome.placements.len(), 40);
                assert_layout_is_valid(&outcome, &grid);
            }
        }
    }
}

#[test]
fn test_placements_keep_input_order_and_payload() {
    let engine = LayoutEngine::new(GridOptions::default(), PlacementStrategyKind::Compact);
    let outcome = engine.layout(random_records(3, 20)).unwrap();

    for (i, placement) in outcome.placements.iter().enumerate() {
        assert_eq!(placement.question_record.sequence_index, i);
        assert_eq!(placement.question_record.payload, format!("q{i}"));
    }
}

#[test]
fn test_engine_from_options() {
    let options = QuizOptions {
        grid: GridOptions::new(6, 4),
        placement: PlacementStrategyKind::Compact,
        ..Default::default()
    };
    let engine = LayoutEngine::from_options(&options);
    assert_eq!(engine.grid(), GridOptions::new(6, 4));
    assert_eq!(engine.strategy_name(), "compact");
}
