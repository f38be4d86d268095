use anyhow::{anyhow, Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;
use std::str::FromStr;

use topicscore::config::{ModelConfig, ModelType};
use topicscore::cross_validation::CrossValidator;
use topicscore::data_handling::Dataset;
use topicscore::io::{read_feature_csv_with_config, CsvReaderConfig};
use topicscore::metrics::Metrics;
use topicscore::preprocessing;

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("TOPICSCORE_LOG", "error,topicscore=info"))
        .init();

    let matches = Command::new("topicscore")
        .version(clap::crate_version!())
        .about("Cross-validated evaluation and cost tuning for binary speech-topic classifiers")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("crossval")
                .about("Run k-fold cross-validation at a fixed cost")
                .args(common_args())
                .arg(
                    Arg::new("cost")
                        .short('c')
                        .long("cost")
                        .help("Regularization cost (inverse penalty strength)")
                        .default_value("1.0")
                        .value_parser(clap::value_parser!(f64)),
                ),
        )
        .subcommand(
            Command::new("tune")
                .about("Grid-search the cost parameter by cross-validated F-measure")
                .args(common_args())
                .arg(
                    Arg::new("costs")
                        .long("costs")
                        .help("Comma-separated candidate costs, tried in order")
                        .default_value("0.01,0.1,1,10,100"),
                ),
        )
        .subcommand(
            Command::new("holdout")
                .about("Evaluate on a single shuffled train/test split")
                .args(common_args())
                .arg(
                    Arg::new("cost")
                        .short('c')
                        .long("cost")
                        .help("Regularization cost (inverse penalty strength)")
                        .default_value("1.0")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    Arg::new("train_fraction")
                        .long("train-fraction")
                        .help("Fraction of rows used for training")
                        .default_value("0.8")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .help("Shuffle seed for the split")
                        .default_value("42")
                        .value_parser(clap::value_parser!(u64)),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("crossval", sub)) => run_crossval(sub),
        Some(("tune", sub)) => run_tune(sub),
        Some(("holdout", sub)) => run_holdout(sub),
        _ => unreachable!("subcommand required"),
    }
}

fn common_args() -> Vec<Arg> {
    vec![
        Arg::new("data")
            .short('d')
            .long("data")
            .help("Path to a labeled feature-matrix CSV")
            .required(true)
            .value_parser(clap::value_parser!(PathBuf))
            .value_hint(ValueHint::FilePath),
        Arg::new("positive")
            .short('p')
            .long("positive")
            .help("Class label treated as positive for precision/recall/F")
            .required(true),
        Arg::new("label_column")
            .long("label-column")
            .help("Name of the CSV column holding class labels")
            .default_value("label"),
        Arg::new("model")
            .short('m')
            .long("model")
            .help("Classifier backend")
            .value_parser(["logistic", "svm"])
            .default_value("logistic"),
        Arg::new("model_config")
            .long("model-config")
            .help("JSON file with backend hyper-parameters; overrides --model")
            .value_parser(clap::value_parser!(PathBuf))
            .value_hint(ValueHint::FilePath),
        Arg::new("folds")
            .short('k')
            .long("folds")
            .help("Number of cross-validation folds")
            .default_value("10")
            .value_parser(clap::value_parser!(usize)),
        Arg::new("threshold")
            .long("threshold")
            .help("Label rows positive when the positive-class probability reaches this value")
            .value_parser(clap::value_parser!(f64)),
        Arg::new("standardize")
            .long("standardize")
            .help("Standardize feature columns before training")
            .action(ArgAction::SetTrue),
    ]
}

fn load_model_config(matches: &ArgMatches) -> Result<ModelConfig> {
    if let Some(path) = matches.get_one::<PathBuf>("model_config") {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read model config: {}", path.display()))?;
        let config: ModelConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse model config: {}", path.display()))?;
        return Ok(config);
    }

    let name = matches
        .get_one::<String>("model")
        .map(String::as_str)
        .unwrap_or("logistic");
    let model_type = ModelType::from_str(name).map_err(|e| anyhow!(e))?;
    Ok(ModelConfig::new(model_type))
}

fn load_dataset(matches: &ArgMatches) -> Result<Dataset> {
    let path = matches
        .get_one::<PathBuf>("data")
        .expect("--data is required");

    let mut reader_config = CsvReaderConfig::default();
    if let Some(label_column) = matches.get_one::<String>("label_column") {
        reader_config.label_column = label_column.clone();
    }

    let mut data = read_feature_csv_with_config(path, &reader_config)?;
    if matches.get_flag("standardize") {
        data.x = preprocessing::fit_transform(&data.x);
    }
    data.log_input_data_summary();
    Ok(data)
}

fn build_validator(matches: &ArgMatches) -> Result<CrossValidator> {
    let model = load_model_config(matches)?;
    let folds = *matches.get_one::<usize>("folds").expect("default");
    let positive = matches
        .get_one::<String>("positive")
        .expect("--positive is required");

    let mut validator = CrossValidator::new(model, folds, positive.clone());
    if let Some(&threshold) = matches.get_one::<f64>("threshold") {
        validator = validator.with_probability_threshold(threshold);
    }
    Ok(validator)
}

fn parse_costs(list: &str) -> Result<Vec<f64>> {
    list.split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .with_context(|| format!("Invalid cost value '{}'", part.trim()))
        })
        .collect()
}

fn print_metrics(metrics: &Metrics) {
    println!("{:<12} {:>10}", "metric", "value");
    println!("{:<12} {:>10.4}", "accuracy", metrics.accuracy);
    println!("{:<12} {:>10.4}", "precision", metrics.precision);
    println!("{:<12} {:>10.4}", "recall", metrics.recall);
    println!("{:<12} {:>10.4}", "specificity", metrics.specificity);
    println!("{:<12} {:>10.4}", "f-measure", metrics.f_measure);
}

fn run_crossval(matches: &ArgMatches) -> Result<()> {
    let data = load_dataset(matches)?;
    let validator = build_validator(matches)?;
    let cost = *matches.get_one::<f64>("cost").expect("default");

    let metrics = validator.cross_validate(&data, cost)?;
    println!(
        "Cross-validated metrics over {} folds (cost {}):",
        matches.get_one::<usize>("folds").expect("default"),
        cost
    );
    print_metrics(&metrics);
    Ok(())
}

fn run_tune(matches: &ArgMatches) -> Result<()> {
    let data = load_dataset(matches)?;
    let validator = build_validator(matches)?;
    let costs = parse_costs(matches.get_one::<String>("costs").expect("default"))?;

    let search = validator.optimize_cost(&data, &costs)?;

    println!("{:<12} {:>10}", "cost", "f-measure");
    for score in search.curve() {
        println!("{:<12} {:>10.4}", score.cost, score.metrics.f_measure);
    }
    println!(
        "Best cost: {} (F = {:.4})",
        search.best_cost(),
        search.best_f_measure()
    );
    Ok(())
}

fn run_holdout(matches: &ArgMatches) -> Result<()> {
    let data = load_dataset(matches)?;
    let validator = build_validator(matches)?;
    let cost = *matches.get_one::<f64>("cost").expect("default");
    let train_fraction = *matches.get_one::<f64>("train_fraction").expect("default");
    let seed = *matches.get_one::<u64>("seed").expect("default");

    let (train, test) = data.split_holdout(train_fraction, seed);
    let metrics = validator.evaluate_split(&train, &test, cost)?;

    println!(
        "Holdout metrics ({} train rows, {} test rows, cost {}):",
        train.len(),
        test.len(),
        cost
    );
    print_metrics(&metrics);
    Ok(())
}
