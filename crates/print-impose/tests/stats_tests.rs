use print_impose::layout::BookletLayouter;
use print_impose::*;

fn pages(n: usize, width: f32, height: f32) -> Vec<PageBox> {
    (0..n).map(|_| PageBox::new(width, height).unwrap()).collect()
}

#[test]
fn test_grid_statistics() {
    let boxes = pages(5, 50.0, 50.0);
    let containers: Containers = ContainerSpec::new(Container::new(100.0, 100.0).unwrap(), 4).into();
    let strategy = LayoutStrategy::Grid {
        padding: 0.0,
        gap: 0.0,
    };
    let result = strategy.perform_layout(&containers, &boxes).unwrap();
    let stats = calculate_statistics(&boxes, &result);

    assert_eq!(stats.source_pages, 5);
    assert_eq!(stats.sheet_sides, 2);
    assert_eq!(stats.physical_sheets, 2);
    assert_eq!(stats.blank_pages_added, 0);
    assert_eq!(stats.placements_per_side, vec![4, 1]);
    assert!((stats.coverage - 0.625).abs() < 1e-6);
}

#[test]
fn test_booklet_statistics() {
    let boxes = pages(10, 100.0, 150.0);
    let containers: Containers =
        ContainerSpec::new(Container::new(200.0, 150.0).unwrap(), 10).into();
    let result = BookletLayouter::default()
        .perform_layout(&containers, &boxes)
        .unwrap();
    let stats = calculate_statistics(&boxes, &result);

    assert_eq!(stats.source_pages, 10);
    assert_eq!(stats.sheet_sides, 6);
    assert_eq!(stats.physical_sheets, 3);
    assert_eq!(stats.blank_pages_added, 2);
    assert_eq!(stats.placements_per_side.iter().sum::<usize>(), 10);
}

#[test]
fn test_empty_layout_statistics() {
    let containers: Containers = ContainerSpec::new(Container::new(100.0, 100.0).unwrap(), 1).into();
    let result = LayoutStrategy::default()
        .perform_layout(&containers, &[])
        .unwrap();
    let stats = calculate_statistics(&[], &result);
    assert_eq!(stats.sheet_sides, 0);
    assert_eq!(stats.physical_sheets, 0);
    assert_eq!(stats.coverage, 0.0);
}
