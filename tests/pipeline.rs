use sheet_explorer::config::Config;
use sheet_explorer::models::Table;
use sheet_explorer::services::visualizer::{CATEGORICAL_FILE, DISTRIBUTIONS_FILE};
use sheet_explorer::services::{analyze, generate_sample, load, render};
use std::fs;
use tempfile::tempdir;

#[test]
fn full_pipeline_with_missing_input() {
    let _ = sheet_explorer::logging::init_logging();
    let dir = tempdir().unwrap();
    let config = Config::new(dir.path().join("no_such.csv"), dir.path().join("plots"));

    let result = sheet_explorer::run(&config).unwrap();

    assert_eq!(result.shape, (1000, 5));
    assert!(result.numeric_summary.is_some());
    assert!(result.categorical("categoria").is_some());
    assert!(config.output_dir.join(DISTRIBUTIONS_FILE).exists());
    assert!(config.output_dir.join(CATEGORICAL_FILE).exists());
}

#[test]
fn pipeline_runs_twice_in_one_process() {
    let dir = tempdir().unwrap();
    let config = Config::new(dir.path().join("no_such.csv"), dir.path().join("plots"));

    let first = sheet_explorer::run(&config).unwrap();
    let second = sheet_explorer::run(&config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn pipeline_reads_csv_input() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("people.csv");
    fs::write(&data, "id,team,age\n1,red,30\n2,blue,41\n3,red,\n").unwrap();
    let config = Config::new(&data, dir.path().join("out"));

    let result = sheet_explorer::run(&config).unwrap();

    assert_eq!(result.shape, (3, 3));
    assert_eq!(result.total_missing(), 1);
    assert_eq!(result.categorical("team").unwrap().count_of("red"), Some(2));
    assert_eq!(result.numeric("age").unwrap().count, 2);
    assert!(config.output_dir.join(DISTRIBUTIONS_FILE).exists());
}

#[test]
fn malformed_input_falls_back() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("broken.csv");
    fs::write(&data, "a,b\n1,2\n3,4,5,6\n").unwrap();

    let table = load(&data);
    assert_eq!(table.shape(), generate_sample().shape());
}

#[test]
fn load_then_analyze_then_render() {
    let dir = tempdir().unwrap();
    let table = load(dir.path().join("absent.csv"));
    assert_eq!(table, generate_sample());

    let analysis = analyze(&table);
    assert_eq!(analysis.shape, (1000, 5));

    let plots = dir.path().join("plots");
    fs::create_dir_all(&plots).unwrap();
    let written = render(&table, &plots).unwrap();
    assert_eq!(written.len(), 2);
}

#[test]
fn empty_table_through_analysis_and_render() {
    let dir = tempdir().unwrap();
    let table = Table::empty();
    let analysis = analyze(&table);
    assert_eq!(analysis.shape, (0, 0));
    assert!(analysis.numeric_summary.is_none());
    assert!(render(&table, dir.path().join("p")).unwrap().is_empty());
}

#[test]
fn pipeline_handles_infinite_and_nan_cells() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("odd.csv");
    fs::write(&data, "x,y\n1.0,NaN\ninf,2.0\n3.0,4.0\n").unwrap();
    let config = Config::new(&data, dir.path().join("plots"));

    let result = sheet_explorer::run(&config).unwrap();

    assert_eq!(result.shape, (3, 2));
    assert_eq!(result.missing_values, vec![("x".to_string(), 0), ("y".to_string(), 1)]);
    assert_eq!(result.numeric("y").unwrap().mean, Some(3.0));
    assert!(config.output_dir.join(DISTRIBUTIONS_FILE).exists());
}
