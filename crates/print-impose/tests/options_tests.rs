use print_impose::*;

#[test]
fn test_default_options_are_valid() {
    let options = ImpositionOptions::default();
    assert!(options.validate().is_ok());
    assert_eq!(options.paper, PaperRef::Named("A4".to_string()));
    assert_eq!(options.max_sheets, None);
}

#[test]
fn test_validation_unknown_paper() {
    let options = ImpositionOptions::new(LayoutStrategy::default(), "Folio-XL");
    assert!(matches!(
        options.validate(),
        Err(ImposeError::UnknownPaperSize(_))
    ));
}

#[test]
fn test_validation_zero_sheets() {
    let options = ImpositionOptions::default().with_max_sheets(0);
    match options.validate() {
        Err(ImposeError::Config(msg)) => assert!(msg.contains("max_sheets")),
        other => panic!("Expected Config error, got {:?}", other),
    }
}

#[test]
fn test_validation_signature_sizes() {
    let signature = |pages| LayoutStrategy::Signature {
        signature_pages: Some(pages),
        mirror_back: false,
        rotate_back_180: false,
        padding: 0.0,
        gap: 0.0,
    };

    for valid in [4, 8, 16, 12] {
        let options = ImpositionOptions::new(signature(valid), "A4");
        assert!(options.validate().is_ok(), "{} should be valid", valid);
    }
    for invalid in [0, 3, 6] {
        let options = ImpositionOptions::new(signature(invalid), "A4");
        assert!(options.validate().is_err(), "{} should be invalid", invalid);
    }
}

#[test]
fn test_validation_negative_leeway() {
    let options = ImpositionOptions::new(
        LayoutStrategy::LeewayGrid {
            padding: 0.0,
            gap: 0.0,
            leeway: -0.5,
        },
        "A4",
    );
    assert!(matches!(options.validate(), Err(ImposeError::Config(_))));
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_save_and_load_options() {
    use tempfile::NamedTempFile;

    let options = ImpositionOptions::new(
        LayoutStrategy::Signature {
            signature_pages: Some(16),
            mirror_back: true,
            rotate_back_180: true,
            padding: 7.5,
            gap: 2.0,
        },
        (842.0, 595.0),
    )
    .with_max_sheets(12);

    let temp = NamedTempFile::new().unwrap();
    options.save(temp.path()).await.unwrap();
    let loaded = ImpositionOptions::load(temp.path()).await.unwrap();

    assert_eq!(loaded, options);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_partial_config_uses_defaults() {
    use tempfile::NamedTempFile;

    let temp = NamedTempFile::new().unwrap();
    tokio::fs::write(temp.path(), r#"{"paper": "letter-landscape"}"#)
        .await
        .unwrap();

    let loaded = ImpositionOptions::load(temp.path()).await.unwrap();
    assert_eq!(loaded.strategy, LayoutStrategy::default());
    assert_eq!(loaded.paper, PaperRef::from("letter-landscape"));
    assert!(loaded.validate().is_ok());
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_invalid_json() {
    use tempfile::NamedTempFile;

    let temp = NamedTempFile::new().unwrap();
    tokio::fs::write(temp.path(), "{ not json").await.unwrap();

    match ImpositionOptions::load(temp.path()).await {
        Err(ImposeError::Config(msg)) => assert!(msg.contains("Failed to parse config")),
        other => panic!("Expected Config error, got {:?}", other),
    }
}
