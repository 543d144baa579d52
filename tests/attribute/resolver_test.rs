use crate::utils::{dataset, mixed_events};
use perf_trends::attribute::{extract_identifier, normalized_query};
use perf_trends::{Catalog, Category, Error, MatchValue, compute_resolved, resolve};

#[test]
fn test_resolve_maps_categories_to_fields() -> perf_trends::Result<()> {
    let cases = [
        ("Genre", "Jazz", "genre"),
        ("Nationality", "France", "nationality_set"),
        ("Work", "Bolero (#w-bolero)", "work_id"),
        ("Composer", "Mozart (#42)", "composer_id"),
    ];
    for (category, value, field) in cases {
        assert_eq!(resolve(category, value)?.field(), field);
    }
    Ok(())
}

#[test]
fn test_identifier_extraction() -> perf_trends::Result<()> {
    assert_eq!(extract_identifier("Mozart (#42)")?, "42");
    assert_eq!(extract_identifier("(#Q254)")?, "Q254");
    assert_eq!(extract_identifier("Title #7) trailing")?, "7");
    assert!(matches!(extract_identifier("Mozart"), Err(Error::MalformedIdentifier { .. })));
    Ok(())
}

#[test]
fn test_catalog_values_resolve_and_match() -> perf_trends::Result<()> {
    let dataset = dataset(&mixed_events());
    let catalog = Catalog::from_dataset(&dataset)?;
    let years = dataset.years()?;

    for category in Category::ALL {
        let values = catalog.values(category);
        assert!(!values.is_empty(), "{category} has no values");
        for value in values {
            let query = resolve(category.name(), value.as_str())?;
            let counts = compute_resolved(&dataset, &years, &query, false)?;
            assert!(
                counts.iter().sum::<f64>() >= 1.0,
                "{category} value {value} occurs in no event"
            );
        }
    }
    Ok(())
}

#[test]
fn test_resolved_and_normalized_queries_agree() -> perf_trends::Result<()> {
    assert_eq!(resolve("Work", "Bolero (#w-bolero)")?, normalized_query("Work", "w-bolero")?);
    assert_eq!(resolve("Genre", "OPERA")?, normalized_query("Genre", "opera")?);
    assert_eq!(
        resolve("Nationality", ["France", "Germany"])?.value(),
        &MatchValue::AnyOf(vec!["France".to_string(), "Germany".to_string()])
    );
    Ok(())
}
