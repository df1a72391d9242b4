use print_impose::*;

#[test]
fn test_paper_size_dimensions() {
    assert_eq!(PaperSize::A4.dimensions_mm(), (210.0, 297.0));
    assert_eq!(PaperSize::A3.dimensions_mm(), (297.0, 420.0));
    assert_eq!(PaperSize::A5.dimensions_mm(), (148.0, 210.0));
    assert_eq!(PaperSize::Letter.dimensions_mm(), (215.9, 279.4));
    assert_eq!(PaperSize::Legal.dimensions_mm(), (215.9, 355.6));
    assert_eq!(PaperSize::Tabloid.dimensions_mm(), (279.4, 431.8));

    let custom = PaperSize::Custom {
        width_mm: 100.0,
        height_mm: 200.0,
    };
    assert_eq!(custom.dimensions_mm(), (100.0, 200.0));
}

#[test]
fn test_paper_size_with_orientation() {
    let a4 = PaperSize::A4;
    assert_eq!(
        a4.dimensions_with_orientation(Orientation::Portrait),
        (210.0, 297.0)
    );
    assert_eq!(
        a4.dimensions_with_orientation(Orientation::Landscape),
        (297.0, 210.0)
    );
}

#[test]
fn test_letter_in_points() {
    let (width, height) = paper_dimensions("LETTER").unwrap();
    assert!((width - 612.0).abs() < 0.1);
    assert!((height - 792.0).abs() < 0.1);
}

#[test]
fn test_paper_name_parsing() {
    assert_eq!(
        PaperSize::parse("a4-landscape").unwrap(),
        (PaperSize::A4, Orientation::Landscape)
    );
    assert_eq!(
        PaperSize::parse(" Tabloid ").unwrap(),
        (PaperSize::Tabloid, Orientation::Portrait)
    );

    let (width, height) = paper_dimensions("A4-landscape").unwrap();
    assert!(width > height);
}

#[test]
fn test_unknown_paper_size() {
    match paper_dimensions("B7") {
        Err(ImposeError::UnknownPaperSize(name)) => assert_eq!(name, "B7"),
        other => panic!("Expected UnknownPaperSize, got {:?}", other),
    }
}

#[test]
fn test_paper_ref_resolution() {
    assert_eq!(PaperRef::from((300.0, 400.0)).resolve().unwrap(), (300.0, 400.0));
    assert!(matches!(
        PaperRef::from((0.0, 400.0)).resolve(),
        Err(ImposeError::InvalidGeometry { .. })
    ));
    assert!(PaperRef::default().resolve().is_ok());
}

#[test]
fn test_capacity_errors_are_distinguishable() {
    let insufficient = ImposeError::InsufficientContainers {
        available: 1,
        placed: 1,
        total: 5,
    };
    assert!(insufficient.is_capacity_error());
    assert!(
        ImposeError::InsufficientSheetSides {
            required: 4,
            available: 2
        }
        .is_capacity_error()
    );
    assert!(!ImposeError::UnknownPaperSize("X".into()).is_capacity_error());
    assert!(
        !ImposeError::InvalidPageCount {
            count: 6,
            multiple: 4
        }
        .is_capacity_error()
    );
}

#[test]
fn test_geometry_rejects_non_positive_sizes() {
    assert!(matches!(
        PageBox::new(0.0, 10.0),
        Err(ImposeError::InvalidGeometry { .. })
    ));
    assert!(Container::new(10.0, -1.0).is_err());
    assert!(PageBox::new(f32::NAN, 10.0).is_err());
    assert!(Container::new(10.0, 10.0).is_ok());
}

#[test]
fn test_container_spec_generates_independent_copies() {
    let spec = ContainerSpec::new(Container::new(100.0, 200.0).unwrap(), 3);
    let mut containers = spec.generate(5);
    assert_eq!(containers.len(), 5);
    assert_eq!(spec.generate_containers().len(), 3);

    containers[0] = containers[0].clone().with_tag("cover");
    assert!(containers[0].tags().contains("cover"));
    assert!(containers[1].tags().is_empty());
    assert!(spec.container.tags().is_empty());
}

#[test]
fn test_blank_boxes_copy_template_size() {
    let page = PageBox::new(300.0, 400.0).unwrap().with_tag("chapter-1");
    let blank = PageBox::blank_like(&page);
    assert!(blank.is_blank());
    assert!(!page.is_blank());
    assert_eq!((blank.width(), blank.height()), (300.0, 400.0));
    assert!(!blank.has_tag("chapter-1"));
}
