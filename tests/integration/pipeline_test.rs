use crate::utils::{NATIONALITIES_CSV, RAW_EVENTS_CSV, write_file};
use perf_trends::chart::render_text;
use perf_trends::{
    Catalog, Category, FrequencySeries, TrendsConfig, YearSelection, compute_frequencies,
    preprocess, read_dataset, resolve, write_dataset,
};

#[test]
fn test_preprocess_store_and_query() -> perf_trends::Result<()> {
    let dir = tempfile::tempdir().expect("tempdir");
    let events_csv = write_file(dir.path(), "events.csv", RAW_EVENTS_CSV);
    let nationalities_csv = write_file(dir.path(), "nationalities.csv", NATIONALITIES_CSV);
    let config = TrendsConfig::default();

    let built = preprocess::run(&events_csv, Some(&nationalities_csv), &config)?;
    // Event 4 spans two rows; event 6 has no usable date
    assert_eq!(built.len(), 5);
    assert_eq!(built.years()?, vec![1920, 1950]);

    let output = dir.path().join("out").join("events.parquet");
    write_dataset(&built, &output)?;
    let loaded = read_dataset(&output, &config)?;
    assert_eq!(loaded.events()?, built.events()?);

    let years = [1920, 1950];
    for dataset in [&built, &loaded] {
        assert_eq!(
            compute_frequencies(dataset, &years, "Genre", "jazz", false)?,
            vec![2.0, 0.0]
        );
        assert_eq!(
            compute_frequencies(dataset, &years, "Composer", "Q42", false)?,
            vec![0.0, 1.0]
        );
        let nations = ["France", "United States"];
        assert_eq!(
            compute_frequencies(dataset, &years, "Nationality", nations, false)?,
            vec![1.0, 1.0]
        );
        let shares = compute_frequencies(dataset, &years, "Genre", "opera", true)?;
        assert!((shares[0] - 1.0 / 3.0).abs() < 1e-12);
        assert!((shares[1] - 0.5).abs() < 1e-12);
    }
    Ok(())
}

#[test]
fn test_catalog_display_values_drive_charts() -> perf_trends::Result<()> {
    let dir = tempfile::tempdir().expect("tempdir");
    let events_csv = write_file(dir.path(), "events.csv", RAW_EVENTS_CSV);
    let nationalities_csv = write_file(dir.path(), "nationalities.csv", NATIONALITIES_CSV);
    let dataset = preprocess::run(&events_csv, Some(&nationalities_csv), &TrendsConfig::default())?;

    let catalog = Catalog::from_dataset(&dataset)?;
    assert_eq!(catalog.nationalities, vec!["Austria", "France", "Germany", "United States"]);
    let composers = catalog.values(Category::Composer);
    assert!(composers.contains(&"Mozart (#Q42)".to_string()));

    let query = resolve("Composer", "Mozart (#Q42)")?;
    let series = FrequencySeries::compute(
        &dataset,
        YearSelection::Range {
            start: 1949,
            end: 1951,
        },
        &query,
        false,
    )?;
    let counts: Vec<f64> = series.points.iter().map(|p| p.frequency).collect();
    assert_eq!(counts, vec![0.0, 1.0, 0.0]);

    let text = render_text(&series, 20);
    assert!(text.starts_with("Performances of Composer: Q42 by Year"));
    assert_eq!(text.lines().count(), 5);
    Ok(())
}

#[test]
fn test_sharded_directory_matches_single_file() -> perf_trends::Result<()> {
    let dir = tempfile::tempdir().expect("tempdir");
    let events_csv = write_file(dir.path(), "events.csv", RAW_EVENTS_CSV);
    let dataset = preprocess::run(&events_csv, None, &TrendsConfig::default())?;

    let shards = dir.path().join("shards");
    for (i, event) in dataset.events()?.into_iter().enumerate() {
        let shard = perf_trends::EventDataset::from_events(&[event])?;
        write_dataset(&shard, &shards.join(format!("part-{i:03}.parquet")))?;
    }

    let config = TrendsConfig {
        parallel_load: true,
        batch_size: 2,
        ..TrendsConfig::default()
    };
    let loaded = read_dataset(&shards, &config)?;
    assert_eq!(loaded.events()?, dataset.events()?);

    // Without the nationality table every set is empty
    assert_eq!(
        compute_frequencies(&loaded, &[1920, 1950], "Nationality", "Austria", false)?,
        vec![0.0, 0.0]
    );
    Ok(())
}
